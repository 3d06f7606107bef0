// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// zora                                  -> prints a short usage banner
// zora download <github-folder-url>     -> downloads the folder as a zip
//
// Rust concepts:
// - Derive macros: clap generates the parser from the structs below
// - Option<T>: the subcommand and the output path are both optional
// =============================================================================

use clap::builder::TypedValueParser as _; // brings .map() into scope for value parsers
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use zora::config::{Config, DEFAULT_API_BASE, DEFAULT_USER_AGENT, DEFAULT_WORKER_CAP};

#[derive(Parser, Debug)]
#[command(
    name = "zora",
    version,
    about = "Zora is a CLI tool to download a specific folder from GitHub.",
    long_about = "A fast and simple command-line tool to download a specific folder \
                  from a public GitHub repository without cloning the entire project."
)]
pub struct Cli {
    /// Show every listing call and download
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Downloads a folder from the provided GitHub URL into a zip file
    ///
    /// Example: zora download https://github.com/spf13/cobra/tree/main/docs
    Download {
        /// GitHub folder URL (https://github.com/<owner>/<repo>/tree/<branch>/<path>)
        url: String,

        /// Output zip file (defaults to <folder name>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of files downloaded at the same time
        #[arg(
            short = 'j',
            long,
            default_value_t = DEFAULT_WORKER_CAP,
            value_parser = clap::value_parser!(u16).range(1..=256).map(usize::from)
        )]
        concurrency: usize,

        /// Base address of the GitHub REST API
        #[arg(long, env = "ZORA_API_BASE", default_value = DEFAULT_API_BASE)]
        api_base: String,

        /// Seconds to wait for a connection to open (downloads themselves have no limit)
        #[arg(long, default_value_t = 30)]
        connect_timeout: u64,
    },
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }
}

/// Turns the download flags into the library's Config
pub fn build_config(concurrency: usize, api_base: &str, connect_timeout: u64) -> Config {
    Config::default()
        .api_base(api_base)
        .user_agent(DEFAULT_USER_AGENT)
        .worker_cap(concurrency)
        .connect_timeout(Duration::from_secs(connect_timeout))
}
