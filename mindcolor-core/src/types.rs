//! Data model for a session: user input and the analysis result.
//!
//! The wire types use camelCase field names to match the JSON the
//! generation service returns.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Six-hex-digit color code, e.g. `#1A2B3C`.
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// Finalized user input, snapshotted by the intake form on submit.
///
/// Immutable once produced; discarded when a new session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    /// Full name, non-empty
    pub full_name: String,
    /// Birth date (calendar date, no time component)
    pub birth_date: NaiveDate,
    /// Optional free-text intention; `None` when left blank
    pub intention: Option<String>,
}

/// One self-contained facet of the analysis, rendered in given order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    /// Facet label
    pub title: String,
    /// Short descriptive value
    pub value: String,
    /// Optional accent color for the facet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
    /// Optional numeric code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

/// Structured analysis returned by the oracle, one per successful call.
///
/// Immutable once received; replaced, not mutated, on restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Short headline text
    pub introduction: String,
    /// Short text describing the main color
    pub main_color_description: String,
    /// Six-hex-digit color code, `#RRGGBB`
    pub main_color_hex: String,
    /// Ordered facets; 21 expected, any non-negative count tolerated
    pub indicators: Vec<Indicator>,
    /// Long reading using blank-line blocks and `##` section headings
    pub full_reading: String,
    /// Short closing text
    pub blessing: String,
}

/// Contract violation in an oracle response.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid color code: {value:?} (expected #RRGGBB)")]
    InvalidColor { value: String },
}

impl AnalysisResult {
    /// Validate the oracle's structural contract.
    ///
    /// Checked by the flow controller immediately after a successful call;
    /// a violation is routed through the same path as any oracle failure.
    /// Indicator attributes are opaque to the core and are not inspected.
    pub fn validate(&self) -> Result<(), ContractError> {
        let required: [(&'static str, &str); 4] = [
            ("introduction", &self.introduction),
            ("mainColorDescription", &self.main_color_description),
            ("fullReading", &self.full_reading),
            ("blessing", &self.blessing),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ContractError::MissingField { field });
            }
        }

        if !HEX_COLOR.is_match(&self.main_color_hex) {
            return Err(ContractError::InvalidColor {
                value: self.main_color_hex.clone(),
            });
        }

        Ok(())
    }
}
