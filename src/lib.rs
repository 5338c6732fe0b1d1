//! spacetraveling: a static blog front-end over a headless content API
//!
//! This crate fetches blog posts from a Prismic-style content API, derives
//! a view model per post (estimated reading time, edited-date flag,
//! prev/next navigation) and renders the pages of a static site with Tera
//! templates.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use cms::CmsClient;

/// The main application
#[derive(Clone)]
pub struct Spacetraveling {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Spacetraveling {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Create a content API client from the site configuration
    pub fn client(&self) -> CmsClient {
        CmsClient::new(&self.config.api_url, self.config.access_token.as_deref())
    }
}
