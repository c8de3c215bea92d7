//! Oracle seam for Mind Color Map.
//!
//! The core never talks to a network; it emits an effect asking for an
//! analysis and consumes the outcome as an event. This crate is the seam
//! in between: the [`Oracle`] trait, a uniform [`OracleError`], and the
//! Gemini-backed implementation.

mod gemini;
mod prompt;

pub use gemini::GeminiOracle;
pub use prompt::{system_instruction, user_prompt};

use async_trait::async_trait;
use mindcolor_core::{AnalysisResult, UserInput};

/// External analysis service.
///
/// Implementations handle authentication, request formatting, and
/// response parsing. Callers treat any failure uniformly; the error is
/// opaque beyond its message.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Oracle name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Produce a structured analysis for one finalized input.
    async fn analyze(&self, input: &UserInput) -> Result<AnalysisResult, OracleError>;
}

/// Error from an oracle.
#[derive(Debug, Clone)]
pub struct OracleError {
    pub oracle: String,
    pub model: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.oracle, self.model, self.message)
    }
}

impl std::error::Error for OracleError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mindcolor_core::Indicator;

    struct MockOracle;

    #[async_trait]
    impl Oracle for MockOracle {
        fn name(&self) -> &str {
            "mock"
        }

        async fn analyze(&self, input: &UserInput) -> Result<AnalysisResult, OracleError> {
            Ok(AnalysisResult {
                introduction: format!("A reading for {}", input.full_name),
                main_color_description: "Still water.".into(),
                main_color_hex: "#123456".into(),
                indicators: vec![Indicator {
                    title: "Life Path".into(),
                    value: "7".into(),
                    color_hex: None,
                    number: Some(7),
                }],
                full_reading: "## Opening\n\nAll flows.".into(),
                blessing: "Be well.".into(),
            })
        }
    }

    #[tokio::test]
    async fn mock_oracle_works() {
        let oracle = MockOracle;
        assert_eq!(oracle.name(), "mock");

        let input = UserInput {
            full_name: "Nguyen Van A".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            intention: None,
        };
        let analysis = oracle.analyze(&input).await.unwrap();
        assert_eq!(analysis.introduction, "A reading for Nguyen Van A");
        assert!(analysis.validate().is_ok());
    }

    #[test]
    fn oracle_error_display() {
        let err = OracleError {
            oracle: "gemini".into(),
            model: "gemini-2.0-flash".into(),
            message: "API error (429): quota".into(),
            status_code: Some(429),
        };
        assert_eq!(
            err.to_string(),
            "[gemini:gemini-2.0-flash] API error (429): quota"
        );
    }
}
