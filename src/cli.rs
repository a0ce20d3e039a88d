//! CLI argument parsing via clap.

use std::path::PathBuf;

use chatmark::config::{Config, OutputMode};
use clap::{Parser, Subcommand};

/// Render chat-model output as structured, highlighted HTML.
#[derive(Debug, Parser)]
#[command(name = "chatmark", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: ./chatmark.toml or ~/.config/chatmark/chatmark.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output", global = true)]
    pub output: Option<PathBuf>,

    /// Wrap output in a complete HTML page.
    #[arg(long = "document", global = true, conflicts_with = "fragment")]
    pub document: bool,

    /// Emit a bare HTML fragment.
    #[arg(long = "fragment", global = true)]
    pub fragment: bool,

    /// Page title for document output.
    #[arg(long = "title", global = true)]
    pub title: Option<String>,

    /// Stylesheet href linked from document output.
    #[arg(long = "stylesheet", global = true)]
    pub stylesheet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Render raw model output (the default when no command is given).
    Render {
        /// Input file; `-` or absent reads stdin.
        input: Option<PathBuf>,
    },
    /// Highlight a code snippet.
    Highlight {
        /// Input file; `-` or absent reads stdin.
        input: Option<PathBuf>,
        /// Language label; detected from content when absent.
        #[arg(short = 'l', long = "lang")]
        lang: Option<String>,
    },
    /// Print the detected language of a code snippet.
    Detect {
        /// Input file; `-` or absent reads stdin.
        input: Option<PathBuf>,
    },
    /// Render a saved conversation (JSON).
    Transcript {
        /// Transcript file.
        input: PathBuf,
    },
}

impl Args {
    /// The requested command, defaulting to `render` from stdin.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Render { input: None })
    }

    /// Apply command-line overrides on top of file and env config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.document {
            config.output.mode = OutputMode::Document;
        }
        if self.fragment {
            config.output.mode = OutputMode::Fragment;
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            config.output.title = title.to_string();
        }
        if let Some(href) = self.stylesheet.as_deref().filter(|h| !h.trim().is_empty()) {
            config.output.stylesheet = Some(href.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_means_render_from_stdin() {
        let args = Args::parse_from(["chatmark"]);
        assert_eq!(args.command(), Command::Render { input: None });
    }

    #[test]
    fn highlight_takes_a_language() {
        let args = Args::parse_from(["chatmark", "highlight", "snippet.txt", "--lang", "rust"]);
        assert_eq!(
            args.command(),
            Command::Highlight {
                input: Some(PathBuf::from("snippet.txt")),
                lang: Some("rust".to_string()),
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::parse_from([
            "chatmark",
            "transcript",
            "chat.json",
            "--document",
            "--title",
            "Chat",
            "-o",
            "out.html",
        ]);
        assert!(args.document);
        assert_eq!(args.title.as_deref(), Some("Chat"));
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn document_conflicts_with_fragment() {
        assert!(Args::try_parse_from(["chatmark", "--document", "--fragment"]).is_err());
    }

    #[test]
    fn overrides_beat_config() {
        let args = Args::parse_from(["chatmark", "--document", "--stylesheet", "s.css"]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.output.mode, OutputMode::Document);
        assert_eq!(config.output.stylesheet.as_deref(), Some("s.css"));
        assert_eq!(config.output.title, "Conversation");
    }

    #[test]
    fn fragment_flag_turns_document_config_off() {
        let args = Args::parse_from(["chatmark", "render", "--fragment"]);
        let mut config = Config::default();
        config.output.mode = OutputMode::Document;
        args.apply_overrides(&mut config);
        assert_eq!(config.output.mode, OutputMode::Fragment);
    }
}
