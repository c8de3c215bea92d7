//! Session flow controller.
//!
//! An explicit finite-state machine over the four session phases. Every
//! transition goes through [`Session::apply`], which mutates the session
//! and returns the effects the boundary layer must execute: invoking the
//! oracle, resetting scroll position, or showing a transient notice. The
//! machine itself never performs I/O, so the whole flow is testable by
//! feeding it events.
//!
//! The oracle call is the session's sole suspension point: `apply` hands
//! out [`Effect::InvokeOracle`] and the boundary feeds the outcome back as
//! [`SessionEvent::OracleResolved`]. While a call is in flight the draft
//! cannot be mutated ([`Session::form_mut`] is gated on the intake phase).
//! No cancellation or timeout exists in the core; a hanging oracle leaves
//! the session in `Submitting` (known gap, left to the HTTP client's own
//! timeouts).

use crate::intake::IntakeForm;
use crate::report::{render, Report};
use crate::types::{AnalysisResult, UserInput};

/// Transient notice shown when the oracle fails.
pub const BUSY_NOTICE: &str = "The channel is busy right now. Try again in a moment.";

/// The four phases of a session. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Intro,
    Intake,
    Submitting,
    Report,
}

/// Opaque oracle failure.
///
/// The core treats every failure uniformly and never inspects the cause;
/// the message is carried only for the boundary's logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleFailure {
    pub message: String,
}

impl OracleFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OracleFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Discrete events driving the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// User leaves the introduction
    Start,
    /// User submits the intake form
    Submit,
    /// The boundary layer finished the oracle call
    OracleResolved(Result<AnalysisResult, OracleFailure>),
    /// User starts a fresh session from the report
    Restart,
}

/// Side effects for the boundary layer, emitted alongside transitions.
///
/// The machine decides, the boundary executes; the two never mix.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the asynchronous analysis call with the finalized input and
    /// feed the outcome back as [`SessionEvent::OracleResolved`].
    InvokeOracle(UserInput),
    /// Reset the presentation to the top of the report.
    ScrollToTop,
    /// Show a transient, non-blocking notice.
    Notify(String),
}

/// One interactive session from intro to restart.
///
/// Invariants: the analysis exists iff the phase is `Report`; the
/// finalized input exists iff the phase is `Submitting` or `Report`.
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
}

/// Internal phase state; data lives with the phase that owns it.
#[derive(Debug)]
enum Phase {
    Intro,
    Intake { form: IntakeForm },
    Submitting { form: IntakeForm, input: UserInput },
    Report { input: UserInput, analysis: AnalysisResult },
}

impl Default for Phase {
    fn default() -> Self {
        Self::Intro
    }
}

impl Session {
    /// Create a session in the introduction phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::Intro => SessionPhase::Intro,
            Phase::Intake { .. } => SessionPhase::Intake,
            Phase::Submitting { .. } => SessionPhase::Submitting,
            Phase::Report { .. } => SessionPhase::Report,
        }
    }

    /// Read access to the intake draft, in any phase that holds one.
    pub fn form(&self) -> Option<&IntakeForm> {
        match &self.phase {
            Phase::Intake { form } | Phase::Submitting { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Mutable access to the intake draft.
    ///
    /// Only available during the intake phase, so no event can mutate the
    /// draft while the oracle call is in flight.
    pub fn form_mut(&mut self) -> Option<&mut IntakeForm> {
        match &mut self.phase {
            Phase::Intake { form } => Some(form),
            _ => None,
        }
    }

    /// The finalized input, once the draft has been submitted.
    pub fn input(&self) -> Option<&UserInput> {
        match &self.phase {
            Phase::Submitting { input, .. } | Phase::Report { input, .. } => Some(input),
            _ => None,
        }
    }

    /// The analysis, present only in the report phase.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Report { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    /// Project the current state into the report view model.
    ///
    /// Re-derivable at any time; `None` outside the report phase.
    pub fn report(&self) -> Option<Report> {
        match &self.phase {
            Phase::Report { input, analysis } => Some(render(input, analysis)),
            _ => None,
        }
    }

    /// Apply one event and return the effects to execute.
    ///
    /// Events that do not apply to the current phase are ignored and
    /// return no effects.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        match (std::mem::take(&mut self.phase), event) {
            (Phase::Intro, SessionEvent::Start) => {
                self.phase = Phase::Intake {
                    form: IntakeForm::new(),
                };
                Vec::new()
            }

            (Phase::Intake { form }, SessionEvent::Submit) => match form.try_submit() {
                Ok(input) => {
                    tracing::info!(name = %input.full_name, "Intake finalized, consulting oracle");
                    let effect = Effect::InvokeOracle(input.clone());
                    self.phase = Phase::Submitting { form, input };
                    vec![effect]
                }
                Err(err) => {
                    // Required-field gaps stay silent: the input mechanism
                    // blocks submission until corrected.
                    tracing::debug!(%err, "Submit refused, staying in intake");
                    self.phase = Phase::Intake { form };
                    Vec::new()
                }
            },

            (Phase::Submitting { form, input }, SessionEvent::OracleResolved(outcome)) => {
                match outcome {
                    Ok(analysis) => {
                        if let Err(violation) = analysis.validate() {
                            // Contract violation by the oracle: routed
                            // through the same path as any failure, with
                            // the draft preserved for a retry.
                            tracing::warn!(%violation, "Oracle returned a malformed analysis");
                            self.phase = Phase::Intake { form };
                            return vec![Effect::Notify(BUSY_NOTICE.to_string())];
                        }
                        tracing::info!(
                            indicators = analysis.indicators.len(),
                            "Analysis received"
                        );
                        self.phase = Phase::Report { input, analysis };
                        vec![Effect::ScrollToTop]
                    }
                    Err(failure) => {
                        tracing::warn!(%failure, "Oracle call failed");
                        self.phase = Phase::Intake { form };
                        vec![Effect::Notify(BUSY_NOTICE.to_string())]
                    }
                }
            }

            (Phase::Report { .. }, SessionEvent::Restart) => {
                tracing::info!("Session restarted");
                self.phase = Phase::Intro;
                Vec::new()
            }

            // Anything else does not apply to the current phase.
            (phase, event) => {
                tracing::trace!(?event, "Event ignored in current phase");
                self.phase = phase;
                Vec::new()
            }
        }
    }
}
