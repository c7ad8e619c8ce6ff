//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = ApiDoc::openapi().to_pretty_json()?;
    writeln!(io::stdout().lock(), "{json}")?;
    Ok(())
}
