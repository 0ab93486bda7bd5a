//! HTTP adapter for a local chart object-model bridge.
//!
//! The charting host does not expose its object tree directly to this
//! process; a small bridge running next to the host does, as versioned JSON
//! endpoints. This adapter maps those endpoints onto [`ChartSurface`]:
//!
//! - `GET  /elements` - visible elements with their labels
//! - `POST /elements/{id}/configure` - trigger the configuration action
//! - `GET  /dialog/inputs` - inputs on the open configuration surface
//! - `POST /inputs/{id}/value` - write a value
//! - `POST /inputs/{id}/changed` - raise the change notification
//! - `POST /dialog/commit` - trigger the confirm action
//!
//! A 404 from the dialog endpoints means the widget is gone (user closed
//! the dialog, host re-rendered) and maps to the "not there" returns; any
//! other failure is a [`SurfaceError::Transport`].

use crate::surface::{ChartSurface, ElementId, InputId, LabeledInput, SurfaceError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct BridgeElement {
    id: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct BridgeInput {
    id: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Serialize)]
struct ValueBody {
    value: f64,
}

/// [`ChartSurface`] implementation over the local bridge.
pub struct BridgeSurface {
    client: reqwest::Client,
    base_url: String,
}

impl BridgeSurface {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, SurfaceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ChartSurface for BridgeSurface {
    async fn locate(&self, name_fragment: &str) -> Result<Option<ElementId>, SurfaceError> {
        let elements: Vec<BridgeElement> = self
            .client
            .get(self.url("/elements"))
            .send()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SurfaceError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;

        let fragment = name_fragment.to_lowercase();
        let hit = elements
            .into_iter()
            .find(|e| e.label.to_lowercase().contains(&fragment));
        debug!(fragment = %name_fragment, found = hit.is_some(), "Bridge locate");
        Ok(hit.map(|e| ElementId(e.id)))
    }

    async fn open_configuration(&self, element: &ElementId) -> Result<(), SurfaceError> {
        self.client
            .post(self.url(&format!("/elements/{}/configure", element.0)))
            .send()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn labeled_inputs(&self) -> Result<Vec<LabeledInput>, SurfaceError> {
        let inputs: Vec<BridgeInput> = self
            .client
            .get(self.url("/dialog/inputs"))
            .send()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SurfaceError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;

        Ok(inputs
            .into_iter()
            .map(|i| LabeledInput {
                id: InputId(i.id),
                label: i.label,
            })
            .collect())
    }

    async fn set_value(&self, input: &InputId, value: f64) -> Result<bool, SurfaceError> {
        let response = self
            .client
            .post(self.url(&format!("/inputs/{}/value", input.0)))
            .json(&ValueBody { value })
            .send()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(SurfaceError::Transport(format!(
                "value write returned status {status}"
            ))),
        }
    }

    async fn notify_changed(&self, input: &InputId) -> Result<(), SurfaceError> {
        self.client
            .post(self.url(&format!("/inputs/{}/changed", input.0)))
            .send()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn commit(&self) -> Result<bool, SurfaceError> {
        let response = self
            .client
            .post(self.url("/dialog/commit"))
            .send()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(SurfaceError::Transport(format!(
                "commit returned status {status}"
            ))),
        }
    }
}
