//! Demo: build a create-message payload from the command line.
//!
//! Every argument naming an existing file becomes an attachment; all other
//! arguments are joined into the message content.

use std::path::Path;

use tracing::{debug, error, info};

use hata_builder::builder::{Payload, Value};
use hata_builder::message::{create_configuration, MESSAGE_BUILDER_CREATE};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn serialise_defaults() -> bool {
    match std::env::var("HATA_SERIALISE_DEFAULTS") {
        Ok(value) => matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => false,
    }
}

/// Split arguments into attachments and content words.
fn positional_parameters(arguments: impl Iterator<Item = String>) -> std::io::Result<Vec<Value>> {
    let mut files = Vec::new();
    let mut words = Vec::new();

    for argument in arguments {
        let path = Path::new(&argument);
        if path.is_file() {
            let name = path
                .file_name()
                .map_or_else(|| argument.clone(), |name| name.to_string_lossy().into_owned());
            let data = std::fs::read(path)?;
            debug!(file = %path.display(), bytes = data.len(), "attaching file");
            files.push(Value::Tuple(vec![Value::from(name), Value::from(data)]));
        } else {
            words.push(argument);
        }
    }

    let mut parameters = Vec::with_capacity(2);
    if !words.is_empty() {
        parameters.push(Value::from(words.join(" ")));
    }
    if !files.is_empty() {
        parameters.push(Value::List(files));
    }
    Ok(parameters)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    dotenv::dotenv().ok();

    // Initialise tracing (respects RUST_LOG env, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let defaults = serialise_defaults();

    let parameters = match positional_parameters(std::env::args().skip(1)) {
        Ok(parameters) => parameters,
        Err(err) => {
            error!("Failed to read attachment: {err}");
            std::process::exit(1);
        }
    };

    let payload = create_configuration(defaults)
        .and_then(|configuration| {
            MESSAGE_BUILDER_CREATE
                .instantiate(parameters, [])?
                .serialise(&configuration)
        });

    let payload = match payload {
        Ok(payload) => payload,
        Err(err) => {
            error!("Failed to build message: {err}");
            std::process::exit(1);
        }
    };

    match payload {
        Payload::Json(map) => match serde_json::to_string_pretty(&map) {
            Ok(json) => println!("{json}"),
            Err(err) => error!("Failed to render payload: {err}"),
        },
        Payload::Multipart(form) => {
            match serde_json::to_string_pretty(form.payload_json()) {
                Ok(json) => println!("payload_json: {json}"),
                Err(err) => error!("Failed to render payload: {err}"),
            }
            for file in form.files() {
                println!("{}: {} ({} bytes)", file.name, file.filename, file.data.len());
            }
            match form.encode() {
                Ok(encoded) => info!(
                    content_type = %encoded.content_type,
                    bytes = encoded.body.len(),
                    "encoded multipart body"
                ),
                Err(err) => error!("Failed to encode multipart body: {err}"),
            }
        }
    }
}
