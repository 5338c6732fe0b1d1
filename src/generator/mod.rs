//! Generator module - builds the static site from fetched documents
//!
//! One logical flow per page: fetch the primary document, look up its two
//! chronological neighbors (concurrently, both keyed on the primary's id),
//! build the view model and render it through the embedded templates.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;

use crate::cms::{CmsClient, Direction, QueryOptions};
use crate::content::{richtext, AdjacentPost, PostView, RawDocument};
use crate::helpers::date::{format_date, format_date_time};
use crate::templates::{
    CommentsData, ConfigData, NavPostData, PostPageData, PostSummaryData, SectionData,
    TemplateRenderer,
};
use crate::Spacetraveling;

/// Freshness hint for the hosting collaborator, written next to the
/// generated pages. Consumers may re-fetch and rebuild a route once
/// `revalidate_secs` have passed.
#[derive(Debug, Serialize)]
pub struct BuildManifest {
    pub generated_at: DateTime<Utc>,
    pub revalidate_secs: u64,
    pub routes: Vec<String>,
}

/// Static site generator
pub struct Generator {
    app: Spacetraveling,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Spacetraveling) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            app: app.clone(),
            renderer,
        })
    }

    /// Generate the entire site: index, one page per post, the 404 page
    /// and the build manifest
    pub async fn generate(&self, client: &CmsClient) -> Result<()> {
        let config = &self.app.config;
        let opts = QueryOptions::default();

        let documents = client
            .list_documents(&config.post_type, config.page_size, &opts)
            .await
            .context("Failed to list documents from the content API")?;
        tracing::info!("Fetched {} documents", documents.len());

        fs::create_dir_all(&self.app.public_dir)?;

        let mut routes = vec![config.root.clone()];

        let index_html = self.render_index(&documents)?;
        self.write_page(&config.root, &index_html)?;

        for doc in documents {
            let route = self.post_route(&doc.uid);
            self.generate_post_page(client, doc, &opts, false).await?;
            routes.push(route);
        }

        let not_found_html = self.render_not_found()?;
        fs::write(self.app.public_dir.join("404.html"), not_found_html)?;

        self.write_manifest(routes)?;

        Ok(())
    }

    /// Generate a single post page by slug
    ///
    /// With a preview ref in `opts` the page is rendered from the draft
    /// revision and written under the preview route. A missing document is
    /// the render pass's not-found outcome and surfaces as an error here.
    pub async fn generate_post(
        &self,
        client: &CmsClient,
        slug: &str,
        opts: &QueryOptions,
    ) -> Result<PathBuf> {
        let preview = opts.preview_ref.is_some();

        let doc = client
            .fetch_by_uid(&self.app.config.post_type, slug, opts)
            .await
            .context("Failed to fetch document from the content API")?;

        let Some(doc) = doc else {
            anyhow::bail!("post not found: {}", slug);
        };

        self.generate_post_page(client, doc, opts, preview).await
    }

    /// Render and write one post page, resolving its neighbors first
    async fn generate_post_page(
        &self,
        client: &CmsClient,
        doc: RawDocument,
        opts: &QueryOptions,
        preview: bool,
    ) -> Result<PathBuf> {
        let post_type = &self.app.config.post_type;

        // The two lookups only depend on the primary document's id, so
        // they run concurrently
        let (prev, next) = tokio::join!(
            client.fetch_adjacent(post_type, &doc.id, Direction::Earlier, opts),
            client.fetch_adjacent(post_type, &doc.id, Direction::Later, opts),
        );
        let prev = prev
            .context("Failed to fetch the previous post")?
            .map(|d| AdjacentPost::from_document(&d));
        let next = next
            .context("Failed to fetch the next post")?
            .map(|d| AdjacentPost::from_document(&d));

        let view = PostView::from_document(doc);
        tracing::debug!(
            "Rendering post {} ({} min read)",
            view.uid,
            view.reading_time_minutes
        );

        let route = if preview {
            self.preview_route(&view.uid)
        } else {
            self.post_route(&view.uid)
        };

        let html = self.render_post_page(&view, prev.as_ref(), next.as_ref(), preview)?;
        self.write_page(&route, &html)
    }

    /// Render the post-detail page
    fn render_post_page(
        &self,
        view: &PostView,
        prev: Option<&AdjacentPost>,
        next: Option<&AdjacentPost>,
        preview: bool,
    ) -> Result<String> {
        let edited_note = if view.was_edited {
            view.last_publication_date
                .map(|d| format!("* editado em {}", format_date_time(&d)))
        } else {
            None
        };

        let sections: Vec<SectionData> = view
            .content
            .iter()
            .map(|block| SectionData {
                heading: block.heading.clone(),
                body_html: richtext::as_html(&block.body),
            })
            .collect();

        let post = PostPageData {
            title: view.title.clone(),
            subtitle: view.subtitle.clone(),
            author: view.author.clone(),
            date: view
                .first_publication_date
                .map(|d| format_date(&d))
                .unwrap_or_default(),
            edited_note,
            banner_url: view.banner_url.clone(),
            reading_time_minutes: view.reading_time_minutes,
            sections,
        };

        let mut context = Context::new();
        context.insert("config", &self.config_data());
        context.insert("comments", &self.comments_data());
        context.insert("post", &post);
        context.insert("prev_post", &prev.map(|p| self.nav_post(p)));
        context.insert("next_post", &next.map(|p| self.nav_post(p)));
        context.insert("preview", &preview);

        self.renderer.render("post.html", &context)
    }

    /// Render the index page post listing
    fn render_index(&self, documents: &[RawDocument]) -> Result<String> {
        let posts: Vec<PostSummaryData> = documents
            .iter()
            .map(|doc| PostSummaryData {
                path: self.post_route(&doc.uid),
                title: doc.data.title.clone(),
                subtitle: doc.data.subtitle.clone(),
                author: doc.data.author.clone(),
                date: doc
                    .first_publication_date
                    .map(|d| format_date(&d))
                    .unwrap_or_default(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("config", &self.config_data());
        context.insert("posts", &posts);

        self.renderer.render("index.html", &context)
    }

    /// Render the 404 page
    fn render_not_found(&self) -> Result<String> {
        let mut context = Context::new();
        context.insert("config", &self.config_data());
        self.renderer.render("not_found.html", &context)
    }

    /// Route of a published post page
    fn post_route(&self, uid: &str) -> String {
        format!(
            "{}{}/{}/",
            self.app.config.root, self.app.config.post_dir, uid
        )
    }

    /// Route of a preview-rendered draft page
    fn preview_route(&self, uid: &str) -> String {
        format!("{}preview/{}/", self.app.config.root, uid)
    }

    fn nav_post(&self, post: &AdjacentPost) -> NavPostData {
        NavPostData {
            path: self.post_route(&post.uid),
            title: post.title.clone(),
        }
    }

    fn config_data(&self) -> ConfigData {
        let config = &self.app.config;
        ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            root: config.root.clone(),
        }
    }

    fn comments_data(&self) -> CommentsData {
        let comments = &self.app.config.comments;
        CommentsData {
            enable: comments.enable,
            repo: comments.repo.clone(),
            issue_term: comments.issue_term.clone(),
            theme: comments.theme.clone(),
        }
    }

    /// Write a rendered page to `<public>/<route>/index.html`
    fn write_page(&self, route: &str, html: &str) -> Result<PathBuf> {
        let file_path = route_to_file(&self.app.public_dir, &self.app.config.root, route);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, html)
            .with_context(|| format!("Failed to write {}", file_path.display()))?;

        tracing::debug!("Wrote {}", file_path.display());
        Ok(file_path)
    }

    /// Write the build manifest with the freshness interval
    fn write_manifest(&self, routes: Vec<String>) -> Result<()> {
        let manifest = BuildManifest {
            generated_at: Utc::now(),
            revalidate_secs: self.app.config.revalidate_secs,
            routes,
        };

        let path = self.app.public_dir.join("build-manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(())
    }
}

/// Map a route like "/post/my-slug/" to its output file under the public
/// directory
fn route_to_file(public_dir: &Path, root: &str, route: &str) -> PathBuf {
    let relative = route.strip_prefix(root).unwrap_or(route);
    let relative = relative.trim_matches('/');

    if relative.is_empty() {
        public_dir.join("index.html")
    } else {
        public_dir.join(relative).join("index.html")
    }
}
