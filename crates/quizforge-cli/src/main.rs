//! quizforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Extract quiz questions from exam documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions from a document
    Extract {
        /// Source document (.html, .htm or .txt)
        #[arg(long)]
        input: PathBuf,

        /// Output format: json, table, markdown
        #[arg(long, default_value = "json")]
        format: String,

        /// Write a full extraction report (JSON) to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check extracted questions for structural problems
    Validate {
        /// Source document (.html, .htm or .txt)
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the role assigned to every block of a document
    Classify {
        /// Source document (.html, .htm or .txt)
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and a sample exam
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            format,
            output,
            config,
        } => commands::extract::execute(input, format, output, config).await,
        Commands::Validate { input, config } => commands::validate::execute(input, config).await,
        Commands::Classify { input, config } => commands::classify::execute(input, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
