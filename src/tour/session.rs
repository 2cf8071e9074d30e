//! Tour session — the flattened, gate-bound step sequence for one run.

use std::sync::Arc;

use crate::catalog::{Feature, Gate, Step};

/// Snapshot of the relevant UI state, taken when the tour is triggered and
/// restored when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedUiState {
    pub side_panel_open: bool,
    pub presentation_open: bool,
}

/// One tour run's step sequence.
///
/// Created fresh per "start tour"; the current position lives in the
/// controller's state (`Showing(i)`). Flattening walks features in catalog
/// order and binds the default target-presence gate to every step that does
/// not carry its own.
#[derive(Debug)]
pub struct TourSession {
    steps: Vec<Step>,
    captured: CapturedUiState,
}

impl TourSession {
    pub fn new(features: Vec<Feature>, captured: CapturedUiState) -> Self {
        let mut steps = Vec::new();
        for feature in features {
            if feature.steps.is_empty() {
                tracing::warn!(feature = %feature.name, "Feature has no steps, skipping");
                continue;
            }
            for mut step in feature.steps {
                if step.gate.is_none() {
                    let selector = step.target.selector.clone();
                    let gate: Gate = Arc::new(move |dom| dom.element_present(&selector));
                    step.gate = Some(gate);
                }
                steps.push(step);
            }
        }
        Self { steps, captured }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> &Step {
        &self.steps[index]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn captured(&self) -> CapturedUiState {
        self.captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Placement, Target};
    use crate::host::{DomQuery, Selector};

    struct EmptyDom;
    impl DomQuery for EmptyDom {
        fn element_present(&self, _selector: &Selector) -> bool {
            false
        }
    }

    struct FullDom;
    impl DomQuery for FullDom {
        fn element_present(&self, _selector: &Selector) -> bool {
            true
        }
    }

    fn captured() -> CapturedUiState {
        CapturedUiState {
            side_panel_open: true,
            presentation_open: true,
        }
    }

    fn step(id: &str) -> Step {
        Step::new(
            id,
            Target::new(r#"[data-test="x"]"#, Placement::Top),
            "text",
        )
    }

    #[test]
    fn flattening_preserves_feature_and_step_order() {
        let session = TourSession::new(
            vec![
                Feature::new("a", vec![step("a.1"), step("a.2")]),
                Feature::new("b", vec![step("b.1")]),
            ],
            captured(),
        );
        let ids: Vec<&str> = session.steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a.1", "a.2", "b.1"]);
    }

    #[test]
    fn default_gate_tracks_element_presence() {
        let session = TourSession::new(vec![Feature::new("a", vec![step("a.1")])], captured());
        let gate = session.step(0).gate.as_ref().unwrap();
        assert!(gate(&FullDom));
        assert!(!gate(&EmptyDom));
    }

    #[test]
    fn explicit_gate_is_kept() {
        let gated = step("a.1").with_gate(Arc::new(|_| false));
        let session = TourSession::new(vec![Feature::new("a", vec![gated])], captured());
        let gate = session.step(0).gate.as_ref().unwrap();
        // Custom gate wins even when the element would be present.
        assert!(!gate(&FullDom));
    }

    #[test]
    fn empty_feature_is_dropped() {
        let session = TourSession::new(
            vec![Feature::new("empty", vec![]), Feature::new("b", vec![step("b.1")])],
            captured(),
        );
        assert_eq!(session.len(), 1);
    }
}
