//! Content API adapter - fetches documents from the headless CMS

mod client;
mod error;

pub use client::{CmsClient, Direction, QueryOptions};
pub use error::CmsError;
