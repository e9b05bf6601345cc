use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::enumeration::Bounds;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file (default: sampler.toml, if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the validator answers
    Message,

    /// Generate a bounded sample of a grammar and test a word against it
    Validate {
        /// Grammar identifier
        id: String,

        /// Word to look up in the generated sample
        #[arg(short, long)]
        word: Option<String>,

        #[command(flatten)]
        bounds: BoundsArgs,
    },

    /// Print the bounded sample of a grammar, one word per line
    Generate {
        /// Grammar identifier
        id: String,

        #[command(flatten)]
        bounds: BoundsArgs,
    },
}

/// Overrides for the configured bounds
#[derive(Args)]
pub struct BoundsArgs {
    /// Maximum number of rewrites behind a word
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Maximum number of generated words
    #[arg(long, value_name = "N")]
    pub max_words: Option<usize>,

    /// Maximum sentential form length, in symbols
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,
}

impl BoundsArgs {
    pub fn over(&self, defaults: Bounds) -> Bounds {
        Bounds {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_words: self.max_words.unwrap_or(defaults.max_words),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_arguments() {
        let cli = Cli::try_parse_from([
            "grammar-sampler",
            "--config",
            "custom.toml",
            "validate",
            "anbn",
            "--word",
            "a c b",
            "--max-depth",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Command::Validate { id, word, bounds } = cli.command else {
            panic!("expected validate subcommand");
        };
        assert_eq!(id, "anbn");
        assert_eq!(word.as_deref(), Some("a c b"));
        assert_eq!(
            bounds.over(Bounds::default()),
            Bounds {
                max_depth: 4,
                ..Bounds::default()
            }
        );
    }

    #[test]
    fn generate_without_overrides_keeps_configured_bounds() {
        let cli = Cli::try_parse_from(["grammar-sampler", "generate", "expr"]).unwrap();
        let configured = Bounds {
            max_depth: 2,
            max_words: 3,
            max_tokens: 4,
        };

        let Command::Generate { id, bounds } = cli.command else {
            panic!("expected generate subcommand");
        };
        assert_eq!(id, "expr");
        assert_eq!(bounds.over(configured), configured);
    }

    #[test]
    fn non_numeric_bound_is_rejected() {
        assert!(Cli::try_parse_from(["grammar-sampler", "generate", "expr", "--max-words", "many"]).is_err());
    }
}
