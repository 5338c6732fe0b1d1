//! Post view model
//!
//! Pure transformation from fetched documents into the shape the render
//! layer consumes: flattened post fields, estimated reading time, the
//! edited-date flag, and prev/next navigation stubs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::document::{ContentBlock, RawDocument};
use super::richtext;

/// Assumed reading speed for the estimate
pub const READING_WORDS_PER_MINUTE: usize = 200;

/// View-ready representation of a post, built once per render pass
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: String,
    /// Pass-through content sections, source order preserved
    pub content: Vec<ContentBlock>,
    pub reading_time_minutes: usize,
    pub was_edited: bool,
}

/// Navigation stub for the chronologically previous or next post
#[derive(Debug, Clone, Serialize)]
pub struct AdjacentPost {
    pub uid: String,
    pub title: String,
}

impl PostView {
    /// Build the view model from a fetched document
    pub fn from_document(doc: RawDocument) -> Self {
        let reading_time_minutes = reading_time_minutes(&doc.data.content);
        let was_edited = was_edited(doc.first_publication_date, doc.last_publication_date);

        Self {
            uid: doc.uid,
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: doc.data.title,
            subtitle: doc.data.subtitle,
            author: doc.data.author,
            banner_url: doc.data.banner.url,
            content: doc.data.content,
            reading_time_minutes,
            was_edited,
        }
    }
}

impl AdjacentPost {
    /// Map an adjacent-query result to a navigation stub
    pub fn from_document(doc: &RawDocument) -> Self {
        Self {
            uid: doc.uid.clone(),
            title: doc.data.title.clone(),
        }
    }
}

/// Estimate reading time in whole minutes at 200 words per minute
///
/// Heading and body words both count; bodies are flattened to plain text
/// first. The total is divided by the reading speed and rounded up, so any
/// non-empty content yields at least one minute.
pub fn reading_time_minutes(content: &[ContentBlock]) -> usize {
    let total_words: usize = content.iter().map(block_word_count).sum();
    total_words.div_ceil(READING_WORDS_PER_MINUTE)
}

/// Count whitespace-delimited words in one content block
fn block_word_count(block: &ContentBlock) -> usize {
    let heading_words = block.heading.split_whitespace().count();
    let body_words = richtext::as_text(&block.body).split_whitespace().count();
    heading_words + body_words
}

/// A post counts as edited only when both publication timestamps exist and
/// differ
pub fn was_edited(first: Option<DateTime<Utc>>, last: Option<DateTime<Utc>>) -> bool {
    match (first, last) {
        (Some(first), Some(last)) => first != last,
        _ => false,
    }
}
