//! skythread - Read a Bluesky post thread in the terminal
//!
//! This is the main entry point for the skythread application.

use anyhow::Result;
use bsky::ServiceConfig;
use clap::{Parser, Subcommand};
use log::error;
use std::io::Write;
use std::process::ExitCode;

mod app;
mod components;
mod views;

use app::{OutputFormat, SkythreadApp, render_thread};
use components::{ErrorDisplay, LoadingIndicator, RenderOnce};

#[derive(Parser)]
#[command(version, about = "Read a Bluesky post thread in the terminal", long_about = None)]
struct Cli {
    /// Post URL, e.g. https://bsky.app/profile/alice.bsky.social/post/3kabc
    url: Option<String>,

    /// XRPC service to query (defaults to the configured service)
    #[arg(long)]
    service: Option<String>,

    /// Levels of replies to request from the service
    #[arg(long)]
    depth: Option<u16>,

    /// Levels of parent posts to request from the service
    #[arg(long)]
    parent_height: Option<u16>,

    /// Levels of replies to print
    #[arg(long, default_value_t = 3)]
    max_depth: usize,

    /// Print the thread as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the AT URI for a post URL
    Uri {
        /// Post URL
        url: String,

        /// XRPC service used to resolve handles
        #[arg(long)]
        service: Option<String>,
    },
    /// Show or change the default service
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the service that would be used
    Show,
    /// Persist a default service
    SetService {
        /// Service base URL, e.g. https://public.api.bsky.app
        url: String,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Uri { url, service }) => {
            let app = SkythreadApp::new(service)?;
            match app.resolve_uri(&url) {
                Ok(uri) => {
                    println!("{uri}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprint!("{}", ErrorDisplay::new(&e).to_text());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Some(Commands::Config { action }) => {
            match action {
                ConfigAction::Show => {
                    let config = ServiceConfig::load()?;
                    println!("{}", config.service);
                    if let Some(path) = ServiceConfig::default_config_path() {
                        println!("config file: {}", path.display());
                    }
                }
                ConfigAction::SetService { url } => {
                    let path = ServiceConfig::new(url)?.save()?;
                    println!("Saved {}", path.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let Some(url) = cli.url else {
                anyhow::bail!("A post URL is required. Run with --help for usage.");
            };
            let app = SkythreadApp::new(cli.service)?;
            let format = if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text {
                    max_depth: cli.max_depth,
                }
            };

            if !cli.json {
                eprint!("{}", LoadingIndicator::new(&url).to_text());
            }

            match app.load_thread(&url, cli.depth, cli.parent_height) {
                Ok(thread) => {
                    let output = render_thread(&thread, format)?;
                    std::io::stdout().lock().write_all(output.as_bytes())?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprint!("{}", ErrorDisplay::new(&e).to_text());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
