// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, on stderr)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = a failure was shown, 2 = error)
//
// Rust concepts used:
// - async/await: every command talks to a remote API
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Generics: the README viewer works with any Surface
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - owner, hosts, exclusions
mod contact;  // src/contact.rs - contact form submission
mod document; // src/document/ - typed document tree + HTML output
mod error;    // src/error.rs - README pipeline errors
mod github;   // src/github/ - GitHub API access
mod readme;   // src/readme/ - the README pipeline
mod view;     // src/view/ - viewer controller, surfaces, page effects

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::SiteConfig;
use github::{GithubClient, Listing, ReadmeRequest, RepoCard};
use readme::ImageReference;
use view::{
    render_portfolio_page, HtmlPageSurface, InvocationState, PageEffects, Surface, TerminalSurface,
    ViewController,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error: print the whole context chain and exit with 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays machine-readable.
// RUST_LOG still works for finer control.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = cli.site_config();

    match cli.command {
        Commands::Repos { json, out } => handle_repos(&config, json, out.as_deref()).await,
        Commands::Readme { repo, json, out, focus } => {
            handle_readme(&config, &repo, json, out.as_deref(), focus).await
        }
        Commands::Contact { fields } => handle_contact(&config, &fields).await,
    }
}

// Handles the 'repos' subcommand
//
//   --json     cards as JSON (or an {error, message} object)
//   --out FILE the animated portfolio page
//   (default)  a table on the terminal
async fn handle_repos(config: &SiteConfig, json: bool, out: Option<&str>) -> Result<i32> {
    let client = GithubClient::new(config)?;

    if !json {
        println!("🔍 Loading repositories for {}", config.owner);
    }

    let listing = Listing::from_result(client.list_repos(&config.owner).await, config, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&listing.to_json()?)?);
        return Ok(listing.exit_code());
    }

    if let Some(path) = out {
        let page = render_portfolio_page(&config.owner, &listing, &PageEffects::default());
        std::fs::write(path, page).with_context(|| format!("Failed to write {}", path))?;
        println!("📄 Wrote {}", path);
    }

    match (&listing, listing.message()) {
        (Listing::Cards(cards), _) if out.is_none() => print_cards(cards),
        (Listing::Cards(cards), _) => println!("📋 Total: {}", cards.len()),
        (failed, Some(message)) if failed.is_failure() => println!("❌ {}", message),
        (_, Some(message)) => println!("{}", message),
        (_, None) => {}
    }

    Ok(listing.exit_code())
}

// Handles the 'readme' subcommand
//
// Three ways to present the result:
//   --json     the pipeline output as JSON
//   --out FILE a standalone HTML page
//   (default)  printed to the terminal
async fn handle_readme(
    config: &SiteConfig,
    repo: &str,
    json: bool,
    out: Option<&str>,
    focus: Option<usize>,
) -> Result<i32> {
    let client = GithubClient::new(config)?;

    if json {
        return print_readme_json(config, &client, repo).await;
    }

    match out {
        Some(path) => {
            let mut controller =
                ViewController::new(HtmlPageSurface::new(), &config.owner, &config.raw_base);
            let ready = open_and_focus(&mut controller, &client, repo, focus).await;

            std::fs::write(path, controller.surface().to_page())
                .with_context(|| format!("Failed to write {}", path))?;

            if let Some(view) = controller.current() {
                println!("🖼️  {} image(s) indexed", view.readme.images.len());
            }
            println!("📄 Wrote {}", path);
            controller.close();
            Ok(if ready { 0 } else { 1 })
        }
        None => {
            let mut controller =
                ViewController::new(TerminalSurface, &config.owner, &config.raw_base);
            let ready = open_and_focus(&mut controller, &client, repo, focus).await;
            controller.close();
            Ok(if ready { 0 } else { 1 })
        }
    }
}

// Opens the README and, if it loaded, activates the requested thumbnail.
// Returns whether the README is showing.
async fn open_and_focus<S: Surface>(
    controller: &mut ViewController<S>,
    client: &GithubClient,
    repo: &str,
    focus: Option<usize>,
) -> bool {
    controller.subscribe(|event| debug!(?event, "viewer event"));

    controller.open_readme(client, repo).await;
    let ready = matches!(controller.state(), InvocationState::Ready);

    if let (true, Some(index)) = (ready, focus) {
        if !controller.activate_thumbnail(index) {
            warn!(index, "no image behind that thumbnail");
        }
    }

    ready
}

#[derive(Serialize)]
struct ReadmeJson<'a> {
    owner: &'a str,
    repo: &'a str,
    images: &'a [ImageReference],
    html: String,
}

async fn print_readme_json(config: &SiteConfig, client: &GithubClient, repo: &str) -> Result<i32> {
    let request = ReadmeRequest::new(config.owner.clone(), repo);

    let result = readme::run(client, &request, &config.raw_base, |stage| {
        debug!(?stage, repo, "pipeline stage")
    })
    .await;

    match result {
        Ok(readme) => {
            let output = ReadmeJson {
                owner: &readme.request.owner,
                repo: &readme.request.repo,
                images: &readme.images,
                html: readme.document.to_html(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(0)
        }
        Err(e) => {
            let output = serde_json::json!({
                "error": e.kind(),
                "message": e.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(1)
        }
    }
}

// Handles the 'contact' subcommand
async fn handle_contact(config: &SiteConfig, raw_fields: &[String]) -> Result<i32> {
    let fields = raw_fields
        .iter()
        .map(|raw| contact::parse_field(raw))
        .collect::<Result<Vec<_>>>()?;

    let client = GithubClient::new(config)?;

    println!("{}", contact::SENDING_MESSAGE);
    let outcome = contact::submit_contact(client.http(), &config.form_endpoint, &fields).await;

    if outcome.is_success() {
        println!("✅ {}", outcome.message());
        Ok(0)
    } else {
        println!("❌ {}", outcome.message());
        Ok(1)
    }
}

// Prints project cards as a human-readable table
fn print_cards(cards: &[RepoCard]) {
    println!(
        "{:<30} {:<12} {:>6} {:<12} {}",
        "NAME", "LANGUAGE", "STARS", "UPDATED", "DESCRIPTION"
    );
    println!("{}", "=".repeat(110));

    for card in cards {
        println!(
            "{:<30} {:<12} {:>6} {:<12} {}",
            truncate(&card.name, 30),
            card.language.as_deref().unwrap_or("-"),
            card.stars,
            card.updated,
            truncate(&card.description, 46),
        );
        if let Some(website) = &card.website {
            println!("{:<30} 🌐 {}", "", website);
        }
    }

    println!();
    println!("📋 Total: {}", cards.len());
}

// Shortens text to `max` characters (not bytes), marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééé", 6), "ééé...");
    }
}
