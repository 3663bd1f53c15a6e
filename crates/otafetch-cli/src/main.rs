use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "otafetch")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Scrape and download the latest Android OTA package for a device",
    long_about = "otafetch reads a device list from a YAML file and drives headless Chrome \
                  against Google's public Android OTA listing page to find, print, and \
                  download the latest over-the-air package for a device codename."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print device records from the configuration file
    Devices {
        /// Path to the device list
        #[arg(long, value_name = "FILE", default_value = "devices.yaml")]
        file: PathBuf,

        /// Only print this field for each device (e.g. codename)
        #[arg(long)]
        field: Option<String>,
    },

    /// Scrape the OTA listing page and download the latest package
    Fetch {
        /// Device codename (e.g. cheetah, panther)
        #[arg(long)]
        device: String,

        /// Run Chrome headed and enable debug output
        #[arg(long)]
        debug: bool,

        /// Only print the latest OTA URL, do not download
        #[arg(long)]
        no_download: bool,

        /// Silent mode: print nothing but the URL
        #[arg(long)]
        silent: bool,

        /// Path to the Chrome binary
        #[arg(long, value_name = "PATH")]
        chrome_path: Option<PathBuf>,

        /// Override the OTA listing page URL
        #[arg(long, hide = true, default_value = otafetch_browser::OTA_LISTING_URL)]
        listing_url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Silent mode wins over --debug: nothing but the URL may reach stdout.
    let (debug_requested, silent_requested) = match &cli.command {
        Commands::Fetch { debug, silent, .. } => (*debug, *silent),
        _ => (false, false),
    };
    init_logging(cli.verbose || (debug_requested && !silent_requested));

    match cli.command {
        Commands::Devices { file, field } => commands::devices::execute(&file, field.as_deref()),
        Commands::Fetch {
            device,
            debug,
            no_download,
            silent,
            chrome_path,
            listing_url,
        } => commands::fetch::execute(
            &device,
            debug,
            !no_download,
            silent,
            chrome_path,
            &listing_url,
        ),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("otafetch=debug,otafetch_core=debug,otafetch_browser=debug")
    } else {
        EnvFilter::new("otafetch=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
