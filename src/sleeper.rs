// Sleeper draft pick retrieval.
//
// One GET against the public Sleeper API per invocation. The pick list is
// reduced straight to a set of normalized player names; no draft state
// survives between calls, so a re-run always reflects the live draft.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::name::normalize;

/// Public Sleeper API base. Overridable through settings for tests/proxies.
pub const DEFAULT_BASE_URL: &str = "https://api.sleeper.app/v1";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Sleeper API returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode pick list from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Raw wire types (private) — Sleeper pick objects
// ---------------------------------------------------------------------------

/// One entry of the pick array. Sleeper sends many more fields (round, slot,
/// roster ids); only the player metadata matters here.
#[derive(Debug, Deserialize)]
struct RawPick {
    #[serde(default)]
    metadata: Option<RawPickMetadata>,
}

/// Player metadata attached to completed player picks. Picks not yet made
/// and non-player picks carry no usable name fields.
#[derive(Debug, Deserialize)]
struct RawPickMetadata {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Thin client for the Sleeper draft-picks endpoint.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    /// Create a client for the given API base URL with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client { source: e })?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the pick list for `draft_id` and reduce it to the set of
    /// normalized names of every player already drafted.
    ///
    /// Picks without player metadata are skipped silently. An empty pick
    /// list is a valid empty set; transport failures, non-2xx statuses, and
    /// undecodable bodies propagate as errors with no retry.
    pub async fn drafted_names(&self, draft_id: &str) -> Result<HashSet<String>, FetchError> {
        let url = format!("{}/draft/{}/picks", self.base_url, draft_id);
        info!(%url, "fetching draft picks");

        let response = self.http.get(&url).send().await.map_err(|e| FetchError::Request {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        let body = response.text().await.map_err(|e| FetchError::Request {
            url: url.clone(),
            source: e,
        })?;
        let picks: Vec<RawPick> = serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: url.clone(),
            source: e,
        })?;

        let names = reduce_picks(&picks);
        info!(
            "Fetched {} picks, {} drafted player names",
            picks.len(),
            names.len()
        );
        Ok(names)
    }
}

/// Collapse raw picks into the set of normalized player names.
fn reduce_picks(picks: &[RawPick]) -> HashSet<String> {
    let mut names = HashSet::new();
    for pick in picks {
        match &pick.metadata {
            Some(RawPickMetadata {
                first_name: Some(first),
                last_name: Some(last),
            }) => {
                names.insert(normalize(&format!("{first} {last}")));
            }
            Some(_) => debug!("skipping pick with incomplete player metadata"),
            None => debug!("skipping pick without metadata"),
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_picks(json: &str) -> Vec<RawPick> {
        serde_json::from_str(json).expect("test JSON should parse")
    }

    // -- Picks with metadata become normalized names --

    #[test]
    fn player_picks_reduce_to_normalized_names() {
        let picks = parse_picks(
            r#"[
                {"round": 1, "metadata": {"first_name": "Justin", "last_name": "Jefferson", "position": "WR"}},
                {"round": 1, "metadata": {"first_name": "Ja'Marr", "last_name": "Chase"}}
            ]"#,
        );
        let names = reduce_picks(&picks);
        assert_eq!(names.len(), 2);
        assert!(names.contains("justin jefferson"));
        assert!(names.contains("jamarr chase"));
    }

    // -- Suffixes normalized away on the draft side too --

    #[test]
    fn suffixed_pick_matches_plain_ranking_name() {
        let picks = parse_picks(
            r#"[{"metadata": {"first_name": "Odell", "last_name": "Beckham Jr."}}]"#,
        );
        let names = reduce_picks(&picks);
        assert!(names.contains("odell beckham"));
    }

    // -- Picks without metadata skipped --

    #[test]
    fn picks_without_metadata_are_skipped() {
        let picks = parse_picks(
            r#"[
                {"round": 2},
                {"round": 2, "metadata": null},
                {"metadata": {"first_name": "CeeDee", "last_name": "Lamb"}}
            ]"#,
        );
        let names = reduce_picks(&picks);
        assert_eq!(names.len(), 1);
        assert!(names.contains("ceedee lamb"));
    }

    // -- Metadata missing name fields skipped --

    #[test]
    fn metadata_without_name_fields_is_skipped() {
        let picks = parse_picks(
            r#"[
                {"metadata": {"position": "DEF"}},
                {"metadata": {"first_name": "Lone"}},
                {"metadata": {"last_name": "Name"}}
            ]"#,
        );
        assert!(reduce_picks(&picks).is_empty());
    }

    // -- Empty pick list --

    #[test]
    fn empty_pick_list_yields_empty_set() {
        assert!(reduce_picks(&parse_picks("[]")).is_empty());
    }

    // -- Duplicate players collapse to one entry --

    #[test]
    fn duplicate_names_collapse() {
        let picks = parse_picks(
            r#"[
                {"metadata": {"first_name": "Justin", "last_name": "Jefferson"}},
                {"metadata": {"first_name": "JUSTIN", "last_name": "JEFFERSON"}}
            ]"#,
        );
        assert_eq!(reduce_picks(&picks).len(), 1);
    }
}
