//! binhaul CLI - command-line interface
//!
//! This binary provides a command-line interface to the binhaul library.

mod commands;
mod error;

use clap::{Parser, Subcommand, ValueEnum};

use error::CliError;

#[derive(Parser)]
#[command(name = "binhaul")]
#[command(
    about = "Installs binaries from release sources and keeps them updated",
    long_about = None
)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a binary found at a URL
    Install {
        /// Source URL: a github.com repository, a checksum listing, or a
        /// dl.k8s.io download path
        url: String,

        /// Type of package
        #[arg(long, value_enum, default_value_t = SourceTypeArg::Github)]
        r#type: SourceTypeArg,

        /// If the source offers multiple files, glob selecting which to
        /// install
        #[arg(long, default_value = "")]
        file: String,

        /// The local file name or path
        #[arg(long, default_value = "")]
        outfile: String,
    },

    /// Update installed binaries to their latest versions
    Update {
        /// Package names to update; all packages when empty
        packages: Vec<String>,
    },

    /// Check for updates without installing anything
    Status,

    /// List installed binaries and where they came from
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceTypeArg {
    /// GitHub release assets
    Github,
    /// Alias of shasumurl
    Tarball,
    /// A URL pointing directly at a checksum listing
    Shasumurl,
    /// A dl.k8s.io download path tracking the stable channel
    Kubeurl,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = binhaul::logging::init(&cli.log_level) {
        CliError::LoggingInit(e).exit();
    }

    let result = match cli.command {
        Commands::Install {
            url,
            r#type,
            file,
            outfile,
        } => commands::install::run(&url, r#type, &file, &outfile),
        Commands::Update { packages } => commands::update::run(&packages),
        Commands::Status => commands::status::run(),
        Commands::List => commands::list::run(),
    };

    if let Err(e) = result {
        e.exit();
    }
}
