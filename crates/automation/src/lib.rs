//! # Automation Crate
//!
//! UI automation driver for WallSync: given a published level record, locate
//! the target indicator inside the charting host's live object tree, open
//! its configuration surface, inject the new values, and commit.
//!
//! ## Architecture
//!
//! The host UI is an uncontrolled, version-fragile external object graph, so
//! all interaction goes through the [`ChartSurface`] capability trait. The
//! driver owns the heuristic sequencing (locate, open, settle, match fields,
//! inject, commit); adapters own the transport. [`BridgeSurface`] is the
//! shipped adapter, speaking to a local object-model bridge over HTTP; tests
//! use hand-rolled fakes.
//!
//! ## Key Invariants
//!
//! - A locate failure touches nothing in the host
//! - Later failures leave the configuration surface open for manual
//!   completion - the driver never force-closes a partially edited dialog
//! - Partial field application is allowed, committed, and reported as a
//!   failure so the caller retries the full record next cycle

pub mod bridge;
pub mod driver;
pub mod error;
pub mod fields;
pub mod surface;

pub use bridge::BridgeSurface;
pub use driver::{ApplyReport, AutomationDriver};
pub use error::AutomationError;
pub use fields::LevelField;
pub use surface::{ChartSurface, ElementId, InputId, LabeledInput, SurfaceError};

pub type AutomationResult<T> = std::result::Result<T, AutomationError>;
