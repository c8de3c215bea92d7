//! Interactive session loop.
//!
//! The boundary layer around the core state machine: reads user events
//! from the terminal, applies them to the session, and executes the
//! effects the machine returns. The oracle call happens here, inside the
//! effect runner, so the machine itself stays free of I/O. Required
//! fields are enforced by the prompt validators, which is why a refused
//! submit never needs an error message.

use std::collections::VecDeque;

use anyhow::Result;
use chrono::NaiveDate;
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use mindcolor_core::{Effect, IntakeField, OracleFailure, Session, SessionEvent, SessionPhase};
use mindcolor_oracle::Oracle;

use crate::render;

/// Run one terminal session until the user declines a new journey.
pub async fn run(oracle: &dyn Oracle) -> Result<()> {
    let term = Term::stdout();
    let mut session = Session::new();

    loop {
        match session.phase() {
            SessionPhase::Intro => {
                term.write_line(&render::intro_banner())?;
                let begin = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Begin the journey?")
                    .default(true)
                    .interact()?;
                if !begin {
                    break;
                }
                let effects = session.apply(SessionEvent::Start);
                execute_effects(&mut session, oracle, &term, effects).await?;
            }

            SessionPhase::Intake => {
                prompt_intake(&mut session)?;
                let effects = session.apply(SessionEvent::Submit);
                execute_effects(&mut session, oracle, &term, effects).await?;
            }

            // The effect runner resolves the oracle call before returning,
            // so the loop never observes this phase.
            SessionPhase::Submitting => break,

            SessionPhase::Report => {
                if let Some(report) = session.report() {
                    term.write_line(&render::report_to_string(&report))?;
                }
                let again = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Begin a new journey?")
                    .default(false)
                    .interact()?;
                if !again {
                    break;
                }
                let effects = session.apply(SessionEvent::Restart);
                execute_effects(&mut session, oracle, &term, effects).await?;
            }
        }
    }

    Ok(())
}

/// Fill the intake draft from terminal prompts.
///
/// The validators are the input mechanism's required-field gate: an
/// empty name or a malformed date re-prompts instead of submitting. On a
/// retry after an oracle failure the preserved draft pre-fills the
/// prompts so the user only confirms.
fn prompt_intake(session: &mut Session) -> Result<()> {
    let theme = ColorfulTheme::default();
    let Some(form) = session.form_mut() else {
        return Ok(());
    };

    let full_name: String = Input::with_theme(&theme)
        .with_prompt("Full name")
        .with_initial_text(form.full_name())
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("a full name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    form.update(IntakeField::FullName, &full_name);

    let birth_date: String = Input::with_theme(&theme)
        .with_prompt("Birth date (YYYY-MM-DD)")
        .with_initial_text(form.birth_date())
        .validate_with(|value: &String| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "expected a date like 1990-05-01")
        })
        .interact_text()?;
    form.update(IntakeField::BirthDate, &birth_date);

    let intention: String = Input::with_theme(&theme)
        .with_prompt("What are you seeking on this journey? (optional)")
        .with_initial_text(form.intention())
        .allow_empty(true)
        .interact_text()?;
    form.update(IntakeField::Intention, &intention);

    Ok(())
}

/// Execute the effects a transition returned, feeding oracle resolutions
/// back into the machine until the queue drains.
async fn execute_effects(
    session: &mut Session,
    oracle: &dyn Oracle,
    term: &Term,
    effects: Vec<Effect>,
) -> Result<()> {
    let mut queue: VecDeque<Effect> = effects.into();

    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::InvokeOracle(input) => {
                term.write_line(&render::consulting_line())?;
                let outcome = oracle.analyze(&input).await.map_err(|e| {
                    tracing::warn!(error = %e, "Oracle call failed");
                    OracleFailure::new(e.to_string())
                });
                queue.extend(session.apply(SessionEvent::OracleResolved(outcome)));
            }
            Effect::ScrollToTop => {
                term.clear_screen()?;
            }
            Effect::Notify(message) => {
                term.write_line(&style(message).yellow().to_string())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mindcolor_core::{AnalysisResult, Indicator, UserInput};
    use mindcolor_oracle::OracleError;

    struct StubOracle {
        fail: bool,
    }

    #[async_trait]
    impl Oracle for StubOracle {
        fn name(&self) -> &str {
            "stub"
        }

        async fn analyze(&self, input: &UserInput) -> Result<AnalysisResult, OracleError> {
            if self.fail {
                return Err(OracleError {
                    oracle: "stub".into(),
                    model: "none".into(),
                    message: "the line is down".into(),
                    status_code: None,
                });
            }
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

    fn submitted_session() -> (Session, Vec<Effect>) {
        let mut session = Session::new();
        session.apply(SessionEvent::Start);
        let form = session.form_mut().unwrap();
        form.update(IntakeField::FullName, "Nguyen Van A");
        form.update(IntakeField::BirthDate, "1990-05-01");
        let effects = session.apply(SessionEvent::Submit);
        (session, effects)
    }

    #[tokio::test]
    async fn effect_runner_drives_success_to_report() {
        let (mut session, effects) = submitted_session();
        let oracle = StubOracle { fail: false };
        let term = Term::stdout();

        execute_effects(&mut session, &oracle, &term, effects)
            .await
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::Report);
        let report = session.report().unwrap();
        assert_eq!(report.header.introduction, "A reading for Nguyen Van A");
    }

    #[tokio::test]
    async fn effect_runner_routes_failure_back_to_intake() {
        let (mut session, effects) = submitted_session();
        let oracle = StubOracle { fail: true };
        let term = Term::stdout();

        execute_effects(&mut session, &oracle, &term, effects)
            .await
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::Intake);
        assert_eq!(session.form().unwrap().full_name(), "Nguyen Van A");
    }
}
