//! Outlet configuration: the static map of outlet name to acquisition
//! endpoint, loaded once at startup.
//!
//! A YAML file can override the built-in outlet set:
//!
//! ```yaml
//! outlets:
//!   - name: CNN
//!     endpoint:
//!       kind: feed
//!       url: http://rss.cnn.com/rss/cnn_allpolitics.rss
//!   - name: Fox News
//!     endpoint:
//!       kind: listing
//!       url: https://www.foxnews.com/politics
//!       section: /politics/
//!   - name: ABC News
//!     endpoint:
//!       kind: headline_api
//!       source_id: abc-news
//! ```
//!
//! Validation happens here, before any network activity: outlet names must be
//! unique, the map must be non-empty, and a headline-API outlet requires the
//! `NEWS_API_KEY` credential.

use crate::error::ConfigError;
use crate::models::{AcquisitionEndpoint, Outlet};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::info;

/// Top-level shape of the YAML outlet file.
#[derive(Debug, Deserialize)]
struct OutletFile {
    outlets: Vec<Outlet>,
}

/// Validated run configuration.
#[derive(Debug)]
pub struct RunConfig {
    pub outlets: Vec<Outlet>,
    /// Headline-API credential, present whenever any outlet needs it.
    pub api_key: Option<String>,
}

/// Built-in outlet set: the political sections of three majors, all via
/// syndication feeds.
pub fn default_outlets() -> Vec<Outlet> {
    vec![
        Outlet {
            name: "CNN".to_string(),
            endpoint: AcquisitionEndpoint::Feed {
                url: "http://rss.cnn.com/rss/cnn_allpolitics.rss".to_string(),
            },
        },
        Outlet {
            name: "Fox News".to_string(),
            endpoint: AcquisitionEndpoint::Feed {
                url: "http://feeds.foxnews.com/foxnews/politics".to_string(),
            },
        },
        Outlet {
            name: "NYT".to_string(),
            endpoint: AcquisitionEndpoint::Feed {
                url: "https://rss.nytimes.com/services/xml/rss/nyt/Politics.xml".to_string(),
            },
        },
    ]
}

/// Load and validate the run configuration.
///
/// `path` is an optional YAML outlet file; without it the built-in set is
/// used. `api_key` comes from the environment via the CLI.
pub fn load(path: Option<&str>, api_key: Option<String>) -> Result<RunConfig, ConfigError> {
    let outlets = match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p).map_err(|e| ConfigError::Unreadable {
                path: p.to_string(),
                source: e,
            })?;
            let file: OutletFile =
                serde_yaml::from_str(&raw).map_err(|e| ConfigError::Malformed {
                    path: p.to_string(),
                    source: e,
                })?;
            info!(path = p, count = file.outlets.len(), "Loaded outlet config");
            file.outlets
        }
        None => {
            let outlets = default_outlets();
            info!(count = outlets.len(), "Using built-in outlet set");
            outlets
        }
    };

    validate(&outlets, api_key.as_deref())?;
    Ok(RunConfig { outlets, api_key })
}

fn validate(outlets: &[Outlet], api_key: Option<&str>) -> Result<(), ConfigError> {
    if outlets.is_empty() {
        return Err(ConfigError::EmptyOutlets);
    }

    let mut seen = HashSet::new();
    for outlet in outlets {
        if !seen.insert(outlet.name.as_str()) {
            return Err(ConfigError::DuplicateOutlet(outlet.name.clone()));
        }
    }

    let needs_credential = outlets
        .iter()
        .any(|o| matches!(o.endpoint, AcquisitionEndpoint::HeadlineApi { .. }));
    if needs_credential && api_key.is_none_or(str::is_empty) {
        return Err(ConfigError::MissingCredential {
            var: "NEWS_API_KEY",
        });
    }

    Ok(())
}
