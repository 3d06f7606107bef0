// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (simple_logger behind the `log` facade)
// 3. Turn the GitHub URL into a RepositoryLocation
// 4. Run the download pipeline and report the result
// 5. Exit with 0 on success, 1 on any error
// =============================================================================

mod cli; // src/cli.rs - command-line parsing

use anyhow::Result; // the binary reports errors with anyhow, the library with zora::Error
use clap::Parser; // Parser trait enables Cli::parse()
use cli::{Cli, Commands};
use simple_logger::SimpleLogger; // backend for the log::info!/debug! calls in the library
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zora::{download_folder, GitHubClient, RepositoryLocation};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new()
        .with_level(cli.log_level())
        .without_timestamps()
        .init()
    {
        eprintln!("Warning: could not initialise logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Download {
            url,
            output,
            concurrency,
            api_base,
            connect_timeout,
        }) => {
            let config = cli::build_config(concurrency, &api_base, connect_timeout);
            handle_download(&url, output, &config).await
        }
        None => {
            print_banner();
            Ok(())
        }
    }
}

async fn handle_download(url: &str, output: Option<PathBuf>, config: &zora::Config) -> Result<()> {
    let location = RepositoryLocation::parse(url)?;
    let destination = output.unwrap_or_else(|| PathBuf::from(location.default_archive_name()));

    println!("📦 Downloading {} into {}", url, destination.display());

    let client = Arc::new(GitHubClient::new(config)?);
    let summary = match download_folder(client, &location, &destination, config).await {
        Ok(summary) => summary,
        Err(e) => {
            let context = failure_context(&e, url, &destination);
            return Err(anyhow::Error::new(e).context(context));
        }
    };

    println!(
        "✅ Saved {} file(s) ({} bytes) to {}",
        summary.entries,
        summary.bytes,
        summary.destination.display()
    );
    Ok(())
}

// Points at the output file for local write problems and at the URL otherwise
fn failure_context(error: &zora::Error, url: &str, destination: &Path) -> String {
    if error.is_write_error() {
        format!("could not write {}", destination.display())
    } else {
        format!("could not download {}", url)
    }
}

fn print_banner() {
    println!("Zora");
    println!();
    println!("A fast and simple tool to download specific folders from GitHub.");
    println!("-----------------------------------------------------------------");
    println!("\nUsage:");
    println!("  zora download <github-folder-url> [flags]");
    println!("\nExample:");
    println!("  zora download https://github.com/spf13/cobra/tree/main/docs");
    println!("\nRun 'zora download --help' for more information.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_context_names_output_for_write_errors() {
        let dup = zora::Error::DuplicateEntry("docs/a.txt".to_string());
        let msg = failure_context(&dup, "https://github.com/a/b/tree/main", Path::new("out.zip"));
        assert_eq!(msg, "could not write out.zip");
    }

    #[test]
    fn test_failure_context_names_url_for_network_errors() {
        let listing = zora::Error::Listing {
            url: "https://api.github.com/repos/a/b/contents/?ref=main".to_string(),
            detail: "github API responded with status: 404 Not Found".to_string(),
        };
        let msg = failure_context(&listing, "https://github.com/a/b/tree/main", Path::new("b.zip"));
        assert_eq!(msg, "could not download https://github.com/a/b/tree/main");
    }
}
