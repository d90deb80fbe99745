//! Flat-file roster: one participant per line, `<handle> <yes> <no> <abstain>`.
//!
//! The parser is forgiving. Lines with the wrong number of fields are skipped
//! and numbers that fail to parse count as zero.

use crate::utils::logging::{log_store_error, log_store_operation};
use crate::voting::{Participant, Tally};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FIELD_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write roster file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A line that did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    pub content: String,
}

/// Result of parsing a roster file.
#[derive(Debug, Clone, Default)]
pub struct ParsedRoster {
    pub participants: Vec<Participant>,
    pub skipped: Vec<SkippedLine>,
}

pub fn parse_roster(input: &str) -> ParsedRoster {
    let mut parsed = ParsedRoster::default();

    for (i, line) in input.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            // Blank lines are not worth reporting.
            if !fields.is_empty() {
                parsed.skipped.push(SkippedLine {
                    line_no: i + 1,
                    content: line.to_string(),
                });
            }
            continue;
        }

        let number = |s: &str| s.parse::<i64>().unwrap_or(0);
        parsed.participants.push(Participant::new(
            fields[0],
            Tally::new(number(fields[1]), number(fields[2]), number(fields[3])),
        ));
    }

    parsed
}

/// Writes the canonical form: single spaces, plain decimal numbers, `\n` endings.
///
/// Canonical lines survive a parse/render round trip byte for byte. Anything
/// else (leading zeros, `+` signs, tabs, `\r\n`) comes back normalised.
pub fn render_roster(participants: &[Participant]) -> String {
    let mut out = String::new();
    for p in participants {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            p.handle, p.history.yes, p.history.no, p.history.abstain
        );
    }
    out
}

/// Reads and writes the roster file at a fixed path.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the roster, including the lines that were skipped.
    pub fn load_detailed(&self) -> Result<ParsedRoster, RosterError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            log_store_error("load", &self.path.display().to_string(), &source.to_string());
            RosterError::Read {
                path: self.path.clone(),
                source,
            }
        })?;

        let parsed = parse_roster(&content);
        for skipped in &parsed.skipped {
            tracing::debug!(
                "Skipping roster line {}: '{}'",
                skipped.line_no,
                skipped.content
            );
        }
        log_store_operation(
            "load",
            &self.path.display().to_string(),
            Some(&format!(
                "{} participants, {} skipped",
                parsed.participants.len(),
                parsed.skipped.len()
            )),
        );
        Ok(parsed)
    }

    pub fn load(&self) -> Result<Vec<Participant>, RosterError> {
        self.load_detailed().map(|parsed| parsed.participants)
    }

    /// Rewrites the whole file from `participants`.
    pub fn save(&self, participants: &[Participant]) -> Result<(), RosterError> {
        std::fs::write(&self.path, render_roster(participants)).map_err(|source| {
            log_store_error("save", &self.path.display().to_string(), &source.to_string());
            RosterError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        log_store_operation(
            "save",
            &self.path.display().to_string(),
            Some(&format!("{} participants", participants.len())),
        );
        Ok(())
    }
}
