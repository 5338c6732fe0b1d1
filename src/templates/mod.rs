//! Built-in theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Dates arrive in the
//! context already display-formatted and rich-text bodies already
//! serialized to HTML, so the templates themselves stay declarative.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The context carries pre-rendered HTML fragments; autoescaping
        // would double-escape them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("not_found.html", include_str!("theme/not_found.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub root: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsData {
    pub enable: bool,
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
}

/// One entry of the index-page post listing
#[derive(Debug, Clone, Serialize)]
pub struct PostSummaryData {
    pub path: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

/// The full post-detail page context
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Display-formatted first publication date, empty for drafts
    pub date: String,
    /// "editado em ..." line, present only when the post was edited
    pub edited_note: Option<String>,
    pub banner_url: String,
    pub reading_time_minutes: usize,
    pub sections: Vec<SectionData>,
}

/// One rendered content section
#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    pub body_html: String,
}

/// Prev/next navigation entry
#[derive(Debug, Clone, Serialize)]
pub struct NavPostData {
    pub path: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_data() -> ConfigData {
        ConfigData {
            title: "spacetraveling".to_string(),
            description: String::new(),
            language: "pt-BR".to_string(),
            root: "/".to_string(),
        }
    }

    fn comments_disabled() -> CommentsData {
        CommentsData {
            enable: false,
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
        }
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();

        let posts = vec![PostSummaryData {
            path: "/post/first/".to_string(),
            title: "First".to_string(),
            subtitle: "A subtitle".to_string(),
            author: "Jane Doe".to_string(),
            date: "15 mar 2021".to_string(),
        }];

        let mut context = Context::new();
        context.insert("config", &config_data());
        context.insert("posts", &posts);

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains(r#"href="/post/first/""#));
        assert!(html.contains("<h2>First</h2>"));
        assert!(html.contains("15 mar 2021"));
    }

    #[test]
    fn test_render_post_page() {
        let renderer = TemplateRenderer::new().unwrap();

        let post = PostPageData {
            title: "My Post".to_string(),
            subtitle: "Sub".to_string(),
            author: "Jane Doe".to_string(),
            date: "15 mar 2021".to_string(),
            edited_note: Some("* editado em 16 mar 2021, às 09:00".to_string()),
            banner_url: "https://images.example.com/banner.png".to_string(),
            reading_time_minutes: 4,
            sections: vec![SectionData {
                heading: "Intro".to_string(),
                body_html: "<p>Hello</p>".to_string(),
            }],
        };

        let mut context = Context::new();
        context.insert("config", &config_data());
        context.insert("comments", &comments_disabled());
        context.insert("post", &post);
        context.insert("prev_post", &None::<NavPostData>);
        context.insert(
            "next_post",
            &Some(NavPostData {
                path: "/post/later/".to_string(),
                title: "Later Post".to_string(),
            }),
        );
        context.insert("preview", &false);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("My Post | spacetraveling"));
        assert!(html.contains("4 min"));
        assert!(html.contains("editado em 16 mar 2021"));
        assert!(html.contains("<p>Hello</p>"));
        // Absent prev keeps the whole prev anchor out of the page
        assert!(!html.contains("Post anterior"));
        assert!(html.contains("Próximo post"));
        assert!(html.contains(r#"href="/post/later/""#));
        // Comments disabled, no widget script
        assert!(!html.contains("utteranc.es"));
    }

    #[test]
    fn test_render_post_page_preview_banner() {
        let renderer = TemplateRenderer::new().unwrap();

        let post = PostPageData {
            title: "Draft".to_string(),
            subtitle: String::new(),
            author: "Jane Doe".to_string(),
            date: String::new(),
            edited_note: None,
            banner_url: String::new(),
            reading_time_minutes: 0,
            sections: Vec::new(),
        };

        let mut context = Context::new();
        context.insert("config", &config_data());
        context.insert("comments", &comments_disabled());
        context.insert("post", &post);
        context.insert("prev_post", &None::<NavPostData>);
        context.insert("next_post", &None::<NavPostData>);
        context.insert("preview", &true);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("Sair do modo Preview"));
    }

    #[test]
    fn test_render_post_page_comments_enabled() {
        let renderer = TemplateRenderer::new().unwrap();

        let post = PostPageData {
            title: "With Comments".to_string(),
            subtitle: String::new(),
            author: "Jane Doe".to_string(),
            date: "15 mar 2021".to_string(),
            edited_note: None,
            banner_url: String::new(),
            reading_time_minutes: 1,
            sections: Vec::new(),
        };

        let comments = CommentsData {
            enable: true,
            repo: "user/blog-comments".to_string(),
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
        };

        let mut context = Context::new();
        context.insert("config", &config_data());
        context.insert("comments", &comments);
        context.insert("post", &post);
        context.insert("prev_post", &None::<NavPostData>);
        context.insert("next_post", &None::<NavPostData>);
        context.insert("preview", &false);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("https://utteranc.es/client.js"));
        assert!(html.contains(r#"repo="user/blog-comments""#));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert("config", &config_data());

        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Página não encontrada"));
    }
}
