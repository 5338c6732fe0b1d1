//! Preview a draft revision of a single post

use anyhow::Result;

use crate::cms::QueryOptions;
use crate::generator::Generator;
use crate::Spacetraveling;

/// Generate one post page from the draft revision selected by the
/// preview token
pub async fn run(app: &Spacetraveling, token: &str, slug: &str) -> Result<()> {
    let client = app.client();
    let generator = Generator::new(app)?;

    let opts = QueryOptions {
        preview_ref: Some(token.to_string()),
    };

    let path = generator.generate_post(&client, slug, &opts).await?;
    println!("Preview page written to {}", path.display());

    Ok(())
}
