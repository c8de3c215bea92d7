//! Mind Color Map core - session state machine and report pipeline.
//!
//! Everything in this crate is pure and synchronous: the session flow is
//! an explicit finite-state machine whose transitions return effect values
//! for a boundary layer to execute, the reading parser is a pure function,
//! and the report is a projection of session state. The external analysis
//! call lives behind the `Oracle` seam in `mindcolor-oracle`; this crate
//! only sees its outcome as an event.
//!
//! ## Example
//!
//! ```ignore
//! use mindcolor_core::{Session, SessionEvent, IntakeField};
//!
//! let mut session = Session::new();
//! session.apply(SessionEvent::Start);
//! let form = session.form_mut().unwrap();
//! form.update(IntakeField::FullName, "Nguyen Van A");
//! form.update(IntakeField::BirthDate, "1990-05-01");
//! let effects = session.apply(SessionEvent::Submit);
//! // effects now carries Effect::InvokeOracle for the boundary to run
//! ```

pub mod intake;
pub mod report;
pub mod segment;
pub mod session;
pub mod types;

pub use intake::{IntakeField, IntakeForm, ValidationError};
pub use report::{render, IndicatorCard, ReadingBlock, Report, ReportHeader};
pub use segment::{segment, Segment, SegmentKind};
pub use session::{Effect, OracleFailure, Session, SessionEvent, SessionPhase, BUSY_NOTICE};
pub use types::{AnalysisResult, ContractError, Indicator, UserInput};
