//! List posts from the content API

use anyhow::Result;

use crate::cms::QueryOptions;
use crate::helpers::date::format_date;
use crate::Spacetraveling;

/// List all posts with their slug, title and publication date
pub async fn run(app: &Spacetraveling) -> Result<()> {
    let client = app.client();
    let opts = QueryOptions::default();

    let documents = client
        .list_documents(&app.config.post_type, app.config.page_size, &opts)
        .await?;

    println!("Posts ({}):", documents.len());
    for doc in documents {
        let date = doc
            .first_publication_date
            .map(|d| format_date(&d))
            .unwrap_or_else(|| "draft".to_string());
        println!("  {} - {} [{}]", date, doc.data.title, doc.uid);
    }

    Ok(())
}
