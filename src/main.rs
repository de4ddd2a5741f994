use std::io::{self, Read, Write};

use chrono::Local;
use dotenvy::dotenv;
use quote_engine::{sample_request, JsonRenderer, Normalizer, NormalizerConfig, QuoteService};
use serde_json::Value;

/// Usage: `quote-engine [PATH | -]` reads a request body and writes the
/// rendered document to stdout. `quote-engine --example` prints a sample body.
fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--example") {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &sample_request(Local::now().date_naive()))?;
        return writeln!(out);
    }

    let config = NormalizerConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let input = match arg.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
    };
    let raw: Value = if input.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&input)?
    };

    let service = QuoteService::new(Normalizer::new(config), JsonRenderer::pretty());
    let document = service
        .generate(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    log::info!(
        "Writing {} ({} bytes, {})",
        document.file_name,
        document.bytes.len(),
        document.content_type
    );
    let mut out = io::stdout().lock();
    out.write_all(&document.bytes)?;
    writeln!(out)
}
