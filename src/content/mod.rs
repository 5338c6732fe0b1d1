//! Content module - document models, rich-text serialization, view models

mod document;
mod post;
pub mod richtext;

pub use document::{Banner, ContentBlock, DocumentData, RawDocument};
pub use post::{
    reading_time_minutes, was_edited, AdjacentPost, PostView, READING_WORDS_PER_MINUTE,
};
