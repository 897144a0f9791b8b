//! Flickrbb: Flickr URLs in, BBCode out.
//!
//! Flickrbb resolves a Flickr photo or photo-set URL through the public
//! REST API and emits `[IMG]...[/IMG]` BBCode blocks with caption lines,
//! ready to paste into forum posts.
//!
//! # Modules
//!
//! - [`asset`]: typed photo/set identifiers extracted from URLs
//! - [`api`]: the REST client and typed response models
//! - [`resolve`]: size lookup and title/description extraction
//! - [`convert`]: the orchestrator sequencing extractor → client → resolver
//! - [`prefs`]: the persisted API key and preferred size label
//! - [`render`]: the sink that writes BBCode
//! - [`error`]: error types for flickrbb operations

pub mod api;
pub mod asset;
pub mod convert;
pub mod error;
pub mod prefs;
pub mod render;
pub mod resolve;

use clap::{Parser, Subcommand};

use crate::api::RestClient;
use crate::convert::Converter;
use crate::prefs::{PrefField, PrefStore};
use crate::render::{BbcodeSink, Sink};

pub use error::FlickrbbError;

/// The flickrbb CLI application.
#[derive(Parser)]
#[command(name = "flickrbb")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a Flickr photo or set URL into BBCode image tags.
    Convert(ConvertArgs),

    /// Read or write persisted preferences.
    Prefs(PrefsArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Flickr photo or photo-set URL.
    url: String,

    /// Size label to resolve (e.g. 'Medium', 'Large'). Persisted as the
    /// preferred size for later runs.
    #[arg(long)]
    size: Option<String>,

    /// Flickr API key. Persisted for later runs.
    #[arg(long, env = "FLICKR_API_KEY")]
    api_key: Option<String>,
}

/// Arguments for the prefs subcommand.
#[derive(clap::Args)]
struct PrefsArgs {
    #[command(subcommand)]
    action: PrefsAction,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print a stored preference ('api-key' or 'size').
    Get { field: String },
    /// Store a preference ('api-key' or 'size').
    Set { field: String, value: String },
}

/// Run the flickrbb CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FlickrbbError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Prefs(args)) => run_prefs(args),
        None => {
            println!("flickrbb {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert Flickr photo and set URLs into BBCode image tags.");
            println!();
            println!("Run 'flickrbb --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), FlickrbbError> {
    let store = PrefStore::open_default()?;

    // Read-or-init: supplied values are persisted, absent ones fall back
    // to the store.
    let api_key = store
        .resolve(PrefField::ApiKey, args.api_key.as_deref())?
        .ok_or(FlickrbbError::MissingParameter("api key"))?;
    let size_label = store
        .resolve(PrefField::SizeLabel, args.size.as_deref())?
        .unwrap_or_default();

    let converter = Converter::new(RestClient::new());
    let outcome = converter.convert_url(&args.url, &size_label, &api_key)?;

    let stdout = std::io::stdout();
    let mut sink = BbcodeSink::new(stdout.lock());
    sink.render_all(&outcome.results)
}

/// Execute the prefs subcommand.
fn run_prefs(args: PrefsArgs) -> Result<(), FlickrbbError> {
    let store = PrefStore::open_default()?;

    match args.action {
        PrefsAction::Get { field } => {
            let field: PrefField = field.parse()?;
            match store.get(field)? {
                Some(value) => println!("{value}"),
                None => println!(),
            }
            Ok(())
        }
        PrefsAction::Set { field, value } => {
            let field: PrefField = field.parse()?;
            store.set(field, &value)
        }
    }
}
