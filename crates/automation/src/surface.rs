//! The chart surface capability seam.
//!
//! Everything the driver needs from the host is expressed as six
//! capabilities over opaque handles. The host's object tree is externally
//! owned and changes shape between host versions, so nothing here assumes a
//! stable schema - only that elements have visible labels and inputs can be
//! written and nudged with a change notification.

use async_trait::async_trait;
use thiserror::Error;

/// Opaque handle to an element in the host's object tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementId(pub String);

/// Opaque handle to an input field on the open configuration surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputId(pub String);

/// An input field together with its nearby label text (possibly empty when
/// the host version exposes no labels).
#[derive(Debug, Clone)]
pub struct LabeledInput {
    pub id: InputId,
    pub label: String,
}

/// Adapter-level fault: the surface itself could not be reached or answered
/// incoherently. Distinct from "the element is not there", which the
/// capabilities express through `Option`/`bool` returns.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Surface transport error: {0}")]
    Transport(String),
}

/// Capabilities the driver needs from the charting host.
///
/// `bool`/`Option` returns mean "the target was not there" (a normal
/// outcome in a UI the user is concurrently driving); `Err` means the
/// adapter transport itself failed.
#[async_trait]
pub trait ChartSurface: Send + Sync {
    /// Search the current object tree for an element whose visible label
    /// contains `name_fragment` (case-insensitive).
    async fn locate(&self, name_fragment: &str) -> Result<Option<ElementId>, SurfaceError>;

    /// Trigger the located element's configuration action.
    async fn open_configuration(&self, element: &ElementId) -> Result<(), SurfaceError>;

    /// Input fields currently visible on the configuration surface, in
    /// host order.
    async fn labeled_inputs(&self) -> Result<Vec<LabeledInput>, SurfaceError>;

    /// Write a value into an input. Returns `false` if the input is gone
    /// (e.g. the user closed the dialog mid-sequence).
    async fn set_value(&self, input: &InputId, value: f64) -> Result<bool, SurfaceError>;

    /// Raise the host's change-notification for an input so the programmatic
    /// edit registers as a genuine user edit.
    async fn notify_changed(&self, input: &InputId) -> Result<(), SurfaceError>;

    /// Trigger the configuration surface's confirm action. Returns `false`
    /// when no confirm action can be found.
    async fn commit(&self) -> Result<bool, SurfaceError>;
}
