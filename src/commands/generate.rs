//! Generate the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Spacetraveling;

/// Fetch all posts from the content API and generate the site
pub async fn run(app: &Spacetraveling) -> Result<()> {
    let client = app.client();
    let generator = Generator::new(app)?;
    generator.generate(&client).await
}
