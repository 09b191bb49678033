//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.ulasan.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `ULASAN_API_URL`, `ULASAN_SENTIMENT`, ...
//! 4. **Command-line arguments** – `--api-url`/`-u`, `--list`/`-l`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "http://localhost:8000"
//! sentiment = "negatif"
//! rating = 2
//! sort_by = "rating"
//! sort_order = "asc"
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::gateway::DEFAULT_API_URL;
use crate::api::models::Sentiment;
use crate::api::query::{FeedbackQuery, SortKey, SortOrder};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Full-screen terminal client with form, list, and dashboard views.
    Interactive,
    /// Print the feedback list once and exit.
    ListFeedback,
    /// Print the analytics summary once and exit.
    ShowAnalytics,
    /// Ask the backend to recompute sentiments and exit.
    FixSentiments,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use ulasan::UlasanConfig;
///
/// let config = UlasanConfig::load().expect("failed to load configuration");
/// let base_url = config.api_url();
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "ULASAN",
    discovery(
        dotfile_name = ".ulasan.toml",
        config_file_name = "ulasan.toml",
        app_name = "ulasan"
    )
)]
pub struct UlasanConfig {
    /// Base URL of the feedback service.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-u <URL>`
    /// - Environment: `ULASAN_API_URL`
    /// - Config file: `api_url = "..."`
    ///
    /// Defaults to `http://localhost:8000`.
    #[ortho_config(cli_short = 'u')]
    pub api_url: Option<String>,

    /// Prints the feedback list and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--list` / `-l`
    /// - Config file: `list = true`
    #[ortho_config(cli_short = 'l')]
    pub list: bool,

    /// Prints the analytics summary and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--analytics` / `-a`
    /// - Config file: `analytics = true`
    #[ortho_config(cli_short = 'a')]
    pub analytics: bool,

    /// Asks the backend to recompute stored sentiments and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--fix-sentiments`
    /// - Config file: `fix_sentiments = true`
    #[ortho_config()]
    pub fix_sentiments: bool,

    /// Initial sentiment filter (`positif`, `negatif`, or `neutral`).
    ///
    /// Applies to list mode and to the list view of the interactive client.
    #[ortho_config(cli_short = 's')]
    pub sentiment: Option<String>,

    /// Initial rating filter (1 to 5).
    #[ortho_config(cli_short = 'r')]
    pub rating: Option<u8>,

    /// Initial sort key (`created_at`, `name`, `rating`, or `sentiment`).
    #[ortho_config()]
    pub sort_by: Option<String>,

    /// Initial sort direction (`asc` or `desc`).
    #[ortho_config()]
    pub sort_order: Option<String>,

    /// Initial free-text search applied locally to the fetched list.
    #[ortho_config(cli_short = 'q')]
    pub search: Option<String>,

    /// Emits telemetry events to stderr as JSON lines.
    ///
    /// Can be provided via:
    /// - CLI: `--telemetry`
    /// - Config file: `telemetry = true`
    #[ortho_config()]
    pub telemetry: bool,
}

impl UlasanConfig {
    /// Returns the configured backend URL or the default.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    /// Determines the operation mode based on the mode flags.
    ///
    /// Call [`UlasanConfig::validate`] first; when several flags are set the
    /// first of list, analytics, and fix-sentiments wins.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.list {
            OperationMode::ListFeedback
        } else if self.analytics {
            OperationMode::ShowAnalytics
        } else if self.fix_sentiments {
            OperationMode::FixSentiments
        } else {
            OperationMode::Interactive
        }
    }

    /// Checks that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when more than one mode flag is set
    /// or when a filter value is invalid.
    pub fn validate(&self) -> Result<(), ApiError> {
        let modes = [self.list, self.analytics, self.fix_sentiments]
            .into_iter()
            .filter(|flag| *flag)
            .count();
        if modes > 1 {
            return Err(ApiError::Configuration {
                message: "--list, --analytics, and --fix-sentiments are mutually exclusive"
                    .to_owned(),
            });
        }
        self.list_query().map(|_| ())
    }

    /// Builds the initial listing query from the filter settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for an unknown sentiment, a rating
    /// outside 1..=5, or an unknown sort key or direction.
    pub fn list_query(&self) -> Result<FeedbackQuery, ApiError> {
        let sentiment = self
            .sentiment
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(parse_sentiment_filter)
            .transpose()?;

        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            return Err(ApiError::Configuration {
                message: format!("rating filter must be between 1 and 5, got {rating}"),
            });
        }

        let sort_by = self
            .sort_by
            .as_deref()
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        let sort_order = self
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        Ok(FeedbackQuery {
            sentiment,
            rating: self.rating,
            sort_by,
            sort_order,
        })
    }

    /// Returns the initial search term, or an empty string.
    #[must_use]
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

fn parse_sentiment_filter(value: &str) -> Result<Sentiment, ApiError> {
    match Sentiment::from_label(value) {
        Sentiment::Other(label) => Err(ApiError::Configuration {
            message: format!(
                "unknown sentiment filter '{label}' (expected positif, negatif, or neutral)"
            ),
        }),
        known => Ok(known),
    }
}
