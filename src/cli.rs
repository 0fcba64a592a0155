// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described with structs,
// enums and #[...] attributes, and clap generates the parser.
//
// Global options (owner, hosts, verbosity) live on `Cli` so every subcommand
// can use them; each subcommand only declares what it needs on top.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{
    SiteConfig, DEFAULT_API_BASE, DEFAULT_FORM_ENDPOINT, DEFAULT_OWNER, DEFAULT_RAW_BASE,
};

#[derive(Parser, Debug)]
#[command(
    name = "folio-viewer",
    version,
    about = "Render a developer portfolio from the command line",
    long_about = "folio-viewer lists a GitHub user's public repositories, renders any \
                  repository's README with its images resolved, and submits the contact form."
)]
pub struct Cli {
    /// GitHub account whose repositories are shown
    #[arg(long, global = true, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Base URL of the raw file host used for README images
    #[arg(long, global = true, default_value = DEFAULT_RAW_BASE)]
    pub raw_base: String,

    /// Form-submission endpoint for the contact form
    #[arg(long, global = true, default_value = DEFAULT_FORM_ENDPOINT)]
    pub form_endpoint: String,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List public repositories as project cards
    ///
    /// Example: folio-viewer repos --out projects.html
    Repos {
        /// Output cards as JSON instead of a table
        #[arg(long, conflicts_with = "out")]
        json: bool,

        /// Write the animated portfolio page instead of printing a table
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },

    /// Fetch and render a repository's README
    ///
    /// Example: folio-viewer readme gitvault --out gitvault.html --focus 0
    Readme {
        /// Repository name (owned by --owner)
        repo: String,

        /// Output the rendered README and its image index as JSON
        #[arg(long, conflicts_with = "out")]
        json: bool,

        /// Write a standalone HTML page instead of printing
        #[arg(long, value_name = "FILE")]
        out: Option<String>,

        /// Activate thumbnail N after loading (scrolls to that image)
        #[arg(long, value_name = "N")]
        focus: Option<usize>,
    },

    /// Submit the contact form
    ///
    /// Example: folio-viewer contact --field access_key=KEY --field name=Ada --field message=Hi
    Contact {
        /// Form field as key=value (repeatable)
        #[arg(long = "field", value_name = "KEY=VALUE", required = true)]
        fields: Vec<String>,
    },
}

impl Cli {
    // Site configuration with the command-line overrides applied
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            owner: self.owner.clone(),
            api_base: self.api_base.clone(),
            raw_base: self.raw_base.clone(),
            form_endpoint: self.form_endpoint.clone(),
            ..SiteConfig::default()
        }
    }
}
