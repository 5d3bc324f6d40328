// Rankings CSV filtering.
//
// Reads a user-supplied rankings file in one of two supported layouts and
// keeps the rows whose player has not been drafted yet. Rows come back as
// ready-to-print display lines in the file's original order.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::name::normalize;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("failed to read rankings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("rankings file {path} is missing required column `{column}`")]
    MissingColumn { path: String, column: String },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Reader-level failure, before a file path is known. The public path-based
/// wrapper attaches the path.
#[derive(Debug)]
enum ReadError {
    MissingColumn(String),
    Csv(csv::Error),
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        ReadError::Csv(e)
    }
}

impl ReadError {
    fn with_path(self, path: &Path) -> RankingError {
        let path = path.display().to_string();
        match self {
            ReadError::MissingColumn(column) => RankingError::MissingColumn { path, column },
            ReadError::Csv(source) => RankingError::Csv { path, source },
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized rankings format `{0}`, expected `standard` or `bc`")]
pub struct ParseFormatError(String);

// ---------------------------------------------------------------------------
// Format selection
// ---------------------------------------------------------------------------

/// Column layout of a rankings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingFormat {
    /// FantasyPros-style export: `PLAYER NAME`, `TEAM`, `POS`, `RK`.
    Standard,
    /// Tiered export: `Player.Name`, `Tier`, `Position`, `Rank`.
    Bc,
}

impl RankingFormat {
    /// Columns that must be present in the header row for this layout.
    fn required_columns(&self) -> &'static [&'static str] {
        match self {
            RankingFormat::Standard => &["PLAYER NAME", "TEAM", "POS", "RK"],
            RankingFormat::Bc => &["Player.Name", "Tier", "Position", "Rank"],
        }
    }

    /// Return the display string for this format.
    pub fn display_str(&self) -> &'static str {
        match self {
            RankingFormat::Standard => "standard",
            RankingFormat::Bc => "bc",
        }
    }
}

impl fmt::Display for RankingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

impl FromStr for RankingFormat {
    type Err = ParseFormatError;

    // Case-insensitive: the selector arrives as a UI label ("Standard",
    // "BC") as often as a lowercase flag value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(RankingFormat::Standard),
            "bc" => Ok(RankingFormat::Bc),
            _ => Err(ParseFormatError(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Standard layout row. All fields stay strings; ranks are echoed back into
/// the display line exactly as the file spells them. Extra columns are
/// ignored.
#[derive(Debug, Deserialize)]
struct RawStandardRow {
    #[serde(rename = "PLAYER NAME")]
    name: String,
    #[serde(rename = "TEAM")]
    team: String,
    #[serde(rename = "POS")]
    pos: String,
    #[serde(rename = "RK")]
    rank: String,
}

/// BC layout row.
#[derive(Debug, Deserialize)]
struct RawBcRow {
    #[serde(rename = "Player.Name")]
    name: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Rank")]
    rank: String,
}

// ---------------------------------------------------------------------------
// Reader-based filter (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn check_columns(headers: &csv::StringRecord, required: &[&str]) -> Result<(), ReadError> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(ReadError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

fn filter_from_reader<R: Read>(
    rdr: R,
    drafted: &HashSet<String>,
    format: RankingFormat,
) -> Result<Vec<String>, ReadError> {
    let mut reader = csv::Reader::from_reader(rdr);
    check_columns(reader.headers()?, format.required_columns())?;

    let mut lines = Vec::new();
    match format {
        RankingFormat::Standard => {
            for result in reader.deserialize::<RawStandardRow>() {
                let row = result?;
                let name = row.name.trim();
                if !drafted.contains(&normalize(name)) {
                    lines.push(format!(
                        "{}. {} ({}, {})",
                        row.rank.trim(),
                        name,
                        row.team.trim(),
                        row.pos.trim()
                    ));
                }
            }
        }
        RankingFormat::Bc => {
            for result in reader.deserialize::<RawBcRow>() {
                let row = result?;
                let name = row.name.trim();
                if !drafted.contains(&normalize(name)) {
                    lines.push(format!(
                        "Tier {} — {}. {} ({})",
                        row.tier.trim(),
                        row.rank.trim(),
                        name,
                        row.position.trim()
                    ));
                }
            }
        }
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Public path-based filter
// ---------------------------------------------------------------------------

/// Read the rankings file at `path` and return a display line for every row
/// whose normalized player name is absent from `drafted`, preserving the
/// file's row order.
///
/// A missing or unreadable file, a missing required column, and a malformed
/// row each abort the whole operation.
pub fn filter_rankings(
    path: &Path,
    drafted: &HashSet<String>,
    format: RankingFormat,
) -> Result<Vec<String>, RankingError> {
    let file = std::fs::File::open(path).map_err(|e| RankingError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let lines = filter_from_reader(file, drafted, format).map_err(|e| e.with_path(path))?;
    info!(
        "Filtered rankings ({} format): {} players still available",
        format,
        lines.len()
    );
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
