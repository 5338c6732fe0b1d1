//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Content API
    pub api_url: String,
    pub access_token: Option<String>,
    pub post_type: String,
    pub page_size: usize,

    // Directory
    pub public_dir: String,
    pub post_dir: String,

    /// Seconds after which the hosting collaborator may re-fetch and
    /// rebuild a page. Emitted into the build manifest, never enforced
    /// locally.
    pub revalidate_secs: u64,

    // Comment widget
    #[serde(default)]
    pub comments: CommentsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            language: "pt-BR".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            api_url: "https://spacetraveling.cdn.example.io/api/v2".to_string(),
            access_token: None,
            post_type: "posts".to_string(),
            page_size: 20,

            public_dir: "public".to_string(),
            post_dir: "post".to_string(),

            // 24 hours
            revalidate_secs: 86400,

            comments: CommentsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Comment widget configuration (utterances-style script embed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    /// GitHub repository backing the widget, e.g. "user/blog-comments"
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "spacetraveling");
        assert_eq!(config.post_type, "posts");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.revalidate_secs, 86400);
        assert!(!config.comments.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Space Blog
api_url: https://myblog.cdn.example.io/api/v2
page_size: 5
revalidate_secs: 3600
comments:
  enable: true
  repo: user/blog-comments
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Space Blog");
        assert_eq!(config.api_url, "https://myblog.cdn.example.io/api/v2");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.revalidate_secs, 3600);
        assert!(config.comments.enable);
        assert_eq!(config.comments.repo, "user/blog-comments");
        // Unset fields keep their defaults
        assert_eq!(config.post_type, "posts");
        assert_eq!(config.comments.issue_term, "pathname");
    }
}
