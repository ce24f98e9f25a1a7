//! pixmark: drive an image session against the pixmark service
//!
//! Each subcommand is one user action. The active image ID is kept in a
//! small session file between invocations.

use clap::{Parser, Subcommand};
use pixmark_cli::{OutputFormat, Status};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod report;

use commands::{health, preview, resize, session, upload, watermark};
use context::{AppContext, GlobalArgs};

/// Image session client for the pixmark service
#[derive(Parser)]
#[command(name = "pixmark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: .pixmark.toml, pixmark.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Service base URL, overriding config and PIXMARK_API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session file holding the active image ID
    #[arg(long, global = true, env = "PIXMARK_STORE")]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and make it the active image
    Upload {
        /// Image file to upload
        file: Option<PathBuf>,
    },

    /// Resize the active image to a preset
    Resize {
        /// Size preset (default from config)
        #[arg(short, long)]
        size: Option<String>,
    },

    /// Manage and apply the watermark
    Watermark {
        #[command(subcommand)]
        action: WatermarkAction,
    },

    /// Fetch a resized or watermarked variant of the active image
    Preview {
        /// Which variant to fetch
        #[arg(value_enum)]
        target: preview::Target,

        /// Size preset (default from config)
        #[arg(short, long)]
        size: Option<String>,

        /// Directory to write the fetched images into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Check that the service is reachable
    Health,

    /// Inspect the local session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum WatermarkAction {
    /// Upload a watermark image under a name
    Upload {
        /// Watermark image file
        file: Option<PathBuf>,

        /// Name the service stores the watermark under
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Composite the watermark onto the active image
    Apply {
        /// Size preset (default from config)
        #[arg(short, long)]
        size: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the active image ID
    Show,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pixmark=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::resolve(&GlobalArgs {
        config: cli.config,
        base_url: cli.base_url,
        store: cli.store,
        format: cli.format,
    })?;

    match cli.command {
        Commands::Upload { file } => upload::run(&ctx, file.as_deref()).await,
        Commands::Resize { size } => resize::run(&ctx, size.as_deref()).await,
        Commands::Watermark { action } => match action {
            WatermarkAction::Upload { file, name } => {
                watermark::upload(&ctx, file.as_deref(), name.as_deref()).await
            }
            WatermarkAction::Apply { size } => watermark::apply(&ctx, size.as_deref()).await,
        },
        Commands::Preview {
            target,
            size,
            output,
        } => preview::run(&ctx, target, size.as_deref(), &output).await,
        Commands::Health => health::run(&ctx).await,
        Commands::Session { action } => match action {
            SessionAction::Show => session::show(&ctx),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format.is_json() {
                println!("{}", report::json_report(&e));
            }
            Status::error(&report::user_message(&e));
            ExitCode::from(report::exit_code(&e))
        }
    }
}
