//! Typed models for documents returned by the content API
//!
//! The API returns loosely-typed JSON; everything is mapped through these
//! serde models at the fetch boundary so the rest of the crate can assume
//! well-formed input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::richtext::RichTextNode;

/// A single document as returned by the content API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Internal document id (used as the anchor for adjacent queries)
    pub id: String,

    /// URL-friendly unique identifier (the route slug)
    pub uid: String,

    /// First publication timestamp, null for unpublished drafts
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Last publication timestamp, null for unpublished drafts
    #[serde(default)]
    pub last_publication_date: Option<DateTime<Utc>>,

    /// Author-controlled document fields
    pub data: DocumentData,
}

/// The `data` record of a post document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    pub author: String,

    pub banner: Banner,

    /// Ordered content sections; order is author-controlled and preserved
    /// verbatim through the whole pipeline
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Banner image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
}

/// One content section: a heading plus a rich-text body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub heading: String,

    #[serde(default)]
    pub body: Vec<RichTextNode>,
}
