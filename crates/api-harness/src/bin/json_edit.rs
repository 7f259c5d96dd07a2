//! `json-edit` — modify or delete a dotted-path key in a JSON document.
//!
//! Usage:
//!   json-edit MODIFY customer.address.city '"Kuwait City"' < body.json
//!   json-edit DELETE customer.phone < body.json
//!
//! The document is read from stdin and the edited document is written to
//! stdout. Set `RUST_LOG=debug` to trace the edit.

use std::io::{self, Read, Write};

use api_harness::json_cli::edit_document;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "json-edit", version, about = "Edit a JSON document read from stdin")]
struct Args {
    /// MODIFY or DELETE
    operation: String,
    /// Dotted key path, e.g. customer.address.city
    path: String,
    /// New value for MODIFY, read as JSON; bare text is taken as a string
    value: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        debug!(error = %e, "failed to read stdin");
        eprintln!("{e}");
        std::process::exit(1);
    }

    match edit_document(&buf, &args.operation, &args.path, args.value.as_deref()) {
        Ok(result) => {
            debug!(bytes = result.len(), "edit applied");
            let mut stdout = io::stdout();
            if let Err(e) = stdout
                .write_all(result.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
            {
                debug!(error = %e, "failed to write stdout");
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            debug!(operation = %args.operation, path = %args.path, error = %e, "edit failed");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
