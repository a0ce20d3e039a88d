//! CLI entry point for chatmark.

mod cli;

use std::io::{self, Read, Write};
use std::path::Path;

use chatmark::config::{load_config, Config, OutputMode};
use chatmark::document::{wrap_document, DocumentOptions};
use chatmark::error::AppError;
use chatmark::highlight::{detect_language, highlight_as, resolve_language};
use chatmark::logging::init_logging;
use chatmark::render::render_message;
use chatmark::transcript::{load_transcript, render_transcript};
use clap::Parser;

use cli::Command;

fn main() {
    let args = cli::Args::parse();

    // Load config.
    let loaded = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", AppError::from(e));
            std::process::exit(1);
        }
    };
    init_logging(&loaded.config.logging.filter);
    tracing::debug!(source = %loaded.source, "config source");

    // Apply CLI overrides.
    let mut config = loaded.config;
    args.apply_overrides(&mut config);

    if let Err(e) = run(&args, &config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &cli::Args, config: &Config) -> Result<(), AppError> {
    let output = match args.command() {
        Command::Render { input } => {
            let text = read_input(input.as_deref())?;
            package(render_message(&text), config)
        }
        Command::Highlight { input, lang } => {
            let code = read_input(input.as_deref())?;
            let language = resolve_language(&code, lang.as_deref());
            let body = format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                language.tag(),
                highlight_as(&code, language)
            );
            package(body, config)
        }
        Command::Detect { input } => {
            let code = read_input(input.as_deref())?;
            format!("{}\n", detect_language(&code).tag())
        }
        Command::Transcript { input } => {
            let messages = load_transcript(&input)?;
            package(render_transcript(&messages)?, config)
        }
    };
    write_output(args.output.as_deref(), &output)?;
    Ok(())
}

/// Read the whole input from `path`, or stdin for `-` or no path.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Emit `body` bare or wrapped in a page, per the configured output mode.
fn package(body: String, config: &Config) -> String {
    match config.output.mode {
        OutputMode::Fragment => format!("{body}\n"),
        OutputMode::Document => wrap_document(&body, &DocumentOptions::from(&config.output)),
    }
}

fn write_output(path: Option<&Path>, text: &str) -> io::Result<()> {
    match path {
        Some(p) => std::fs::write(p, text),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()
        }
    }
}
