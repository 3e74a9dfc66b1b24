//! Lensmark CLI - image survey catalog with EXIF and drone telemetry extraction.
//!
//! Lensmark registers survey images, extracts normalized EXIF metadata from
//! them, and keeps a catalog of questions, answers and region annotations.
//!
//! # Usage
//!
//! ```bash
//! # Print metadata for one file or a directory
//! lensmark extract DJI_0001.JPG
//! lensmark extract ./flight_7/ -r --format jsonl
//!
//! # Register everything in the image directory
//! lensmark scan
//!
//! # Catalog management (admin)
//! lensmark --as ada image import ./DJI_0001.JPG --type 1
//! lensmark --as ada question add "Any visible damage?" --image-type 1
//!
//! # Survey work (expert)
//! lensmark --as grace answer set 1 1 2
//! lensmark --as grace annotate box 1 3 10 20 64 48
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Lensmark - image survey catalog with EXIF and drone telemetry extraction.
#[derive(Parser, Debug)]
#[command(name = "lensmark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Act as this catalog user
    #[arg(long = "as", global = true, env = "LENSMARK_USER", value_name = "USERNAME")]
    as_user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract and print metadata from image files
    Extract(cli::extract::ExtractArgs),

    /// Register every image in the image directory
    Scan,

    /// Manage registered images
    Image(cli::images::ImageArgs),

    /// Manage image types
    ImageType(cli::taxonomy::ImageTypeArgs),

    /// Manage expert types
    ExpertType(cli::taxonomy::ExpertTypeArgs),

    /// Manage annotation labels
    Label(cli::taxonomy::LabelArgs),

    /// Manage questions
    Question(cli::questions::QuestionArgs),

    /// Manage answer options of a question
    Option(cli::questions::OptionArgs),

    /// Manage users
    User(cli::users::UserArgs),

    /// Answer questions about images
    Answer(cli::survey::AnswerArgs),

    /// Annotate regions of images
    Annotate(cli::survey::AnnotateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match lensmark_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lensmark config path`."
            );
            lensmark_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lensmark v{}", lensmark_core::VERSION);

    let as_user = cli.as_user;
    let session = move |config| cli::Session::open(config, as_user);

    match cli.command {
        Commands::Extract(args) => cli::extract::execute(&config, args),
        Commands::Scan => cli::scan::execute(session(config)?),
        Commands::Image(args) => cli::images::execute(session(config)?, args),
        Commands::ImageType(args) => cli::taxonomy::image_types(session(config)?, args),
        Commands::ExpertType(args) => cli::taxonomy::expert_types(session(config)?, args),
        Commands::Label(args) => cli::taxonomy::labels(session(config)?, args),
        Commands::Question(args) => cli::questions::questions(session(config)?, args),
        Commands::Option(args) => cli::questions::options(session(config)?, args),
        Commands::User(args) => cli::users::execute(session(config)?, args),
        Commands::Answer(args) => cli::survey::answers(session(config)?, args),
        Commands::Annotate(args) => cli::survey::annotations(session(config)?, args),
        Commands::Config(args) => cli::config::execute(args),
    }
}
