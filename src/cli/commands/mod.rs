//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod classify;
mod highlight;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;

#[derive(Parser)]
#[command(name = "corbas")]
#[command(about = "Linguistic annotation service for corpus analysis")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the annotation web server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: from config, 0.0.0.0:10000)
        bind: Option<String>,
    },

    /// Annotate text and print one row per token
    Analyze {
        /// Text to analyze (reads --file or stdin if omitted)
        text: Option<String>,
        /// Read text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Corpus label echoed in the response
        #[arg(long)]
        corpus_name: Option<String>,
        /// Print the JSON response instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the rule-based semantic code for a lemma and part of speech
    Classify {
        /// Lemma (case-insensitive)
        lemma: String,
        /// Universal POS tag (e.g. NOUN, VERB)
        pos: String,
    },

    /// Highlight phrases in a PDF
    Highlight {
        /// PDF file to highlight
        pdf: PathBuf,
        /// Phrase to highlight (repeatable)
        #[arg(short, long = "phrase", required = true)]
        phrases: Vec<String>,
        /// Highlight color as #RRGGBB
        #[arg(long, default_value = "#FFFF00")]
        color: String,
        /// Output path (default: <name>_highlighted.pdf next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (settings, _config) = load_settings(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Analyze {
            text,
            file,
            corpus_name,
            json,
        } => analyze::cmd_analyze(&settings, text, file.as_deref(), corpus_name, json).await,
        Commands::Classify { lemma, pos } => classify::cmd_classify(&lemma, &pos),
        Commands::Highlight {
            pdf,
            phrases,
            color,
            output,
        } => highlight::cmd_highlight(&settings, &pdf, phrases, &color, output).await,
    }
}
