//! The heuristic apply sequence.

use crate::error::AutomationError;
use crate::fields::LevelField;
use crate::surface::{ChartSurface, ElementId, InputId, LabeledInput};
use crate::AutomationResult;
use levels::AggregatedLevel;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a successful attempt actually did.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub target: ElementId,
    pub applied: Vec<LevelField>,
}

/// Best-effort state machine that propagates one level record into the
/// charting host: locate, open configuration, settle, resolve fields,
/// inject, commit.
pub struct AutomationDriver {
    surface: Arc<dyn ChartSurface>,
    target_fragment: String,
    settle_delay: Duration,
}

impl AutomationDriver {
    pub fn new(
        surface: Arc<dyn ChartSurface>,
        target_fragment: String,
        settle_delay: Duration,
    ) -> Self {
        Self {
            surface,
            target_fragment,
            settle_delay,
        }
    }

    /// Run one full attempt. Success means all four fields were written and
    /// the edit was committed; anything less is an error the caller retries
    /// on its next cycle.
    pub async fn apply(&self, record: &AggregatedLevel) -> AutomationResult<ApplyReport> {
        // Locate. A miss here is non-fatal and touches nothing.
        let target = self
            .surface
            .locate(&self.target_fragment)
            .await?
            .ok_or_else(|| AutomationError::TargetNotFound(self.target_fragment.clone()))?;
        debug!(target = ?target, "Located target indicator");

        // Open the configuration surface, then wait a fixed bound for the
        // host's own asynchronous UI update. The host exposes no readiness
        // signal, so this is a polling delay, not a wait-for-condition.
        self.surface.open_configuration(&target).await?;
        tokio::time::sleep(self.settle_delay).await;

        let inputs = self.surface.labeled_inputs().await?;
        let resolved = resolve_fields(&inputs);

        let mut applied = Vec::new();
        let mut missing = Vec::new();
        for field in LevelField::ALL {
            let Some(input) = resolved.iter().find(|(f, _)| *f == field).map(|(_, i)| i) else {
                warn!(%field, "No input resolved for field, skipping");
                missing.push(field);
                continue;
            };

            let value = field.value(record);
            if self.surface.set_value(input, value).await? {
                // The change notification is what makes the host treat the
                // write as a user edit rather than a stale programmatic one.
                self.surface.notify_changed(input).await?;
                debug!(%field, value, "Injected field value");
                applied.push(field);
            } else {
                warn!(%field, "Input vanished before write, skipping");
                missing.push(field);
            }
        }

        if applied.is_empty() {
            // Nothing was written, so there is nothing worth committing.
            // The configuration surface stays open for manual completion.
            return Err(AutomationError::FieldsNotFound { applied, missing });
        }

        if !self.surface.commit().await? {
            return Err(AutomationError::CommitNotFound);
        }

        if !missing.is_empty() {
            // Partial application: what resolved is committed, but the
            // attempt still counts as failed so the full record is retried.
            return Err(AutomationError::FieldsNotFound { applied, missing });
        }

        info!(target = ?target, "All level fields applied and committed");
        Ok(ApplyReport { target, applied })
    }
}

/// Map level fields to inputs by label fragment; when the host version
/// exposes no labels at all, fall back to positional assignment (first four
/// inputs in field order).
fn resolve_fields(inputs: &[LabeledInput]) -> Vec<(LevelField, InputId)> {
    let has_labels = inputs.iter().any(|i| !i.label.trim().is_empty());

    if !has_labels {
        return LevelField::ALL
            .iter()
            .zip(inputs.iter())
            .map(|(field, input)| (*field, input.id.clone()))
            .collect();
    }

    let mut resolved = Vec::new();
    let mut used = vec![false; inputs.len()];
    for field in LevelField::ALL {
        let hit = inputs.iter().enumerate().find(|(idx, input)| {
            if used[*idx] {
                return false;
            }
            let label = input.label.to_lowercase();
            field
                .label_fragments()
                .iter()
                .any(|fragment| label.contains(fragment))
        });
        if let Some((idx, input)) = hit {
            used[idx] = true;
            resolved.push((field, input.id.clone()));
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceError;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};

    fn record() -> AggregatedLevel {
        AggregatedLevel {
            date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            call_wall: 65_000.0,
            put_wall: 58_000.0,
            buyer_gamma_strike: 64_000.0,
            seller_gamma_strike: 60_000.0,
        }
    }

    fn labeled(id: &str, label: &str) -> LabeledInput {
        LabeledInput {
            id: InputId(id.to_string()),
            label: label.to_string(),
        }
    }

    /// Hand-rolled fake host surface recording every capability call.
    #[derive(Default)]
    struct FakeSurface {
        element: Option<ElementId>,
        inputs: Vec<LabeledInput>,
        commit_found: bool,
        vanished_inputs: HashSet<String>,
        calls: Mutex<Vec<String>>,
        written: Mutex<HashMap<String, f64>>,
        notified: Mutex<Vec<String>>,
    }

    impl FakeSurface {
        fn with_standard_dialog() -> Self {
            Self {
                element: Some(ElementId("indicator-7".to_string())),
                inputs: vec![
                    labeled("in-1", "Resistance level"),
                    labeled("in-2", "Support level"),
                    labeled("in-3", "Gamma buyer"),
                    labeled("in-4", "Gamma seller"),
                ],
                commit_found: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl ChartSurface for FakeSurface {
        async fn locate(&self, fragment: &str) -> Result<Option<ElementId>, SurfaceError> {
            self.calls.lock().push(format!("locate({fragment})"));
            Ok(self.element.clone())
        }

        async fn open_configuration(&self, element: &ElementId) -> Result<(), SurfaceError> {
            self.calls.lock().push(format!("open({})", element.0));
            Ok(())
        }

        async fn labeled_inputs(&self) -> Result<Vec<LabeledInput>, SurfaceError> {
            self.calls.lock().push("inputs".to_string());
            Ok(self.inputs.clone())
        }

        async fn set_value(&self, input: &InputId, value: f64) -> Result<bool, SurfaceError> {
            self.calls.lock().push(format!("set({})", input.0));
            if self.vanished_inputs.contains(&input.0) {
                return Ok(false);
            }
            self.written.lock().insert(input.0.clone(), value);
            Ok(true)
        }

        async fn notify_changed(&self, input: &InputId) -> Result<(), SurfaceError> {
            self.notified.lock().push(input.0.clone());
            Ok(())
        }

        async fn commit(&self) -> Result<bool, SurfaceError> {
            self.calls.lock().push("commit".to_string());
            Ok(self.commit_found)
        }
    }

    fn driver(surface: Arc<FakeSurface>) -> AutomationDriver {
        AutomationDriver::new(surface, "GEX Levels".to_string(), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_full_success_applies_all_fields_and_commits() {
        let surface = Arc::new(FakeSurface::with_standard_dialog());
        let report = driver(surface.clone()).apply(&record()).await.unwrap();

        assert_eq!(report.applied.len(), 4);
        let written = surface.written.lock().clone();
        assert_eq!(written["in-1"], 65_000.0);
        assert_eq!(written["in-2"], 58_000.0);
        assert_eq!(written["in-3"], 64_000.0);
        assert_eq!(written["in-4"], 60_000.0);
        // Every write raised a change notification.
        assert_eq!(surface.notified.lock().len(), 4);
        assert!(surface.calls().contains(&"commit".to_string()));
    }

    #[tokio::test]
    async fn test_target_not_found_touches_nothing() {
        let surface = Arc::new(FakeSurface {
            element: None,
            ..FakeSurface::default()
        });
        let result = driver(surface.clone()).apply(&record()).await;

        assert_matches!(result, Err(AutomationError::TargetNotFound(_)));
        // Only the locate probe ran; the host UI was not touched.
        assert_eq!(surface.calls(), vec!["locate(GEX Levels)".to_string()]);
    }

    #[tokio::test]
    async fn test_partial_fields_committed_but_reported() {
        let mut surface = FakeSurface::with_standard_dialog();
        surface.inputs.remove(3); // host version lost the seller input
        let surface = Arc::new(surface);

        let result = driver(surface.clone()).apply(&record()).await;
        assert_matches!(
            result,
            Err(AutomationError::FieldsNotFound { ref applied, ref missing })
                if applied.len() == 3 && missing == &vec![LevelField::SellerGamma]
        );
        // What resolved was still written and committed.
        assert_eq!(surface.written.lock().len(), 3);
        assert!(surface.calls().contains(&"commit".to_string()));
    }

    #[tokio::test]
    async fn test_no_fields_resolved_skips_commit() {
        let mut surface = FakeSurface::with_standard_dialog();
        surface.inputs = vec![labeled("in-9", "Line width")];
        let surface = Arc::new(surface);

        let result = driver(surface.clone()).apply(&record()).await;
        assert_matches!(
            result,
            Err(AutomationError::FieldsNotFound { ref applied, .. }) if applied.is_empty()
        );
        assert!(!surface.calls().contains(&"commit".to_string()));
    }

    #[tokio::test]
    async fn test_missing_commit_action_reported() {
        let mut surface = FakeSurface::with_standard_dialog();
        surface.commit_found = false;
        let surface = Arc::new(surface);

        let result = driver(surface.clone()).apply(&record()).await;
        assert_matches!(result, Err(AutomationError::CommitNotFound));
        // Edited state is left as-is; no rollback writes happened.
        assert_eq!(surface.written.lock().len(), 4);
    }

    #[tokio::test]
    async fn test_positional_fallback_when_labels_unavailable() {
        let mut surface = FakeSurface::with_standard_dialog();
        surface.inputs = vec![
            labeled("in-1", ""),
            labeled("in-2", ""),
            labeled("in-3", ""),
            labeled("in-4", ""),
        ];
        let surface = Arc::new(surface);

        driver(surface.clone()).apply(&record()).await.unwrap();
        let written = surface.written.lock().clone();
        // First matching input of the right affordance, in field order.
        assert_eq!(written["in-1"], 65_000.0);
        assert_eq!(written["in-4"], 60_000.0);
    }

    #[tokio::test]
    async fn test_vanished_input_is_skipped_individually() {
        let mut surface = FakeSurface::with_standard_dialog();
        surface.vanished_inputs.insert("in-2".to_string());
        let surface = Arc::new(surface);

        let result = driver(surface.clone()).apply(&record()).await;
        assert_matches!(
            result,
            Err(AutomationError::FieldsNotFound { ref missing, .. })
                if missing == &vec![LevelField::PutWall]
        );
    }
}
