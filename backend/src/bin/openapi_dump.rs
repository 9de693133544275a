//! Print the OpenAPI document as pretty JSON on stdout.

use std::io::Write;

use backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> std::io::Result<()> {
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{document}")
}
