// src/config.rs
// =============================================================================
// Site configuration: whose repositories we show and which hosts we talk to.
//
// Everything here has a sensible default and can be overridden from the
// command line (see cli.rs). Nothing is read from disk or the environment.
// =============================================================================

/// GitHub account whose portfolio is rendered
pub const DEFAULT_OWNER: &str = "davidsnyder-nc";
/// REST API host used for listings and README metadata
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Host that serves raw file contents (README images live here)
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
/// Form-submission endpoint for the contact form
pub const DEFAULT_FORM_ENDPOINT: &str = "https://api.web3forms.com/submit";

// The portfolio's own hosting repositories never show up as project cards
const EXCLUDED_REPOS: [&str; 2] = ["dsnyder.cloud", "davidsnyder-nc.github.io"];

// Repositories that have a dedicated website besides their GitHub page
const SPECIAL_WEBSITES: [(&str, &str); 1] = [("gitvault", "https://gitvault.app")];

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub owner: String,
    pub api_base: String,
    pub raw_base: String,
    pub form_endpoint: String,
    /// Lowercased repository names hidden from the listing
    pub excluded_repos: Vec<String>,
    /// (lowercased repository name, website URL)
    pub special_websites: Vec<(String, String)>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            excluded_repos: EXCLUDED_REPOS.iter().map(|s| s.to_string()).collect(),
            special_websites: SPECIAL_WEBSITES
                .iter()
                .map(|(name, url)| (name.to_string(), url.to_string()))
                .collect(),
        }
    }
}

impl SiteConfig {
    /// Case-insensitive check against the exclusion list
    pub fn is_excluded(&self, repo_name: &str) -> bool {
        let name = repo_name.to_lowercase();
        self.excluded_repos.iter().any(|excluded| *excluded == name)
    }

    /// Website URL for a repository, if it has one
    pub fn website_for(&self, repo_name: &str) -> Option<&str> {
        let name = repo_name.to_lowercase();
        self.special_websites
            .iter()
            .find(|(repo, _)| *repo == name)
            .map(|(_, url)| url.as_str())
    }
}
