//! Parses a script and prints its fields as JSON and its rendered text.
//!
//! Usage: `parse-demo [FILE]`. Without a file a built-in sample is parsed.
//! Set `RUST_LOG=parser_framework=trace` to follow the driver.

use grammar_example::parse_script;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"let greeting = concat("hello", "\u{2c} ", name);
let answer = 42;
let ratio = div(answer, -1.5);
let empty = now();
"#;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let source = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("cannot read {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => SAMPLE.to_string(),
    };

    let (driver, id) = match parse_script(&source) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let script = driver.node(id);
    info!(nodes = driver.tree().len(), "parsed script");

    match serde_json::to_string_pretty(&script.to_json()) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("cannot export fields: {}", err),
    }
    println!();
    println!("{}", script.render(None));
    ExitCode::SUCCESS
}
