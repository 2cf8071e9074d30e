//! Tour catalog data model — features, steps, and buttons.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::host::{DomQuery, Selector};

/// Preferred tooltip position relative to the target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    TopStart,
    Bottom,
}

/// The element a step attaches to, with its preferred tooltip placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub selector: Selector,
    pub placement: Placement,
}

impl Target {
    pub fn new(selector: impl Into<Selector>, placement: Placement) -> Self {
        Self {
            selector: selector.into(),
            placement,
        }
    }
}

/// What pressing a step button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Advance to the next eligible step.
    Next,
    /// Return to the previous eligible step.
    Back,
    /// End the tour as completed.
    Close,
    /// Open an external link; does not move the tour.
    OpenLink(String),
}

/// A navigation button on a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
    /// Styling hint only; no behavioral effect.
    pub secondary: bool,
}

/// Side-effect callback run immediately before a step renders, used to make
/// the step's target visible (open/close a panel, open the presentation).
pub type BeforeShow = Arc<dyn Fn() + Send + Sync>;

/// Visibility predicate re-evaluated every time the step is about to show.
/// Never a pre-computed boolean: DOM presence is dynamic.
pub type Gate = Arc<dyn Fn(&dyn DomQuery) -> bool + Send + Sync>;

/// A single tooltip attached to one UI element.
#[derive(Clone)]
pub struct Step {
    /// Unique id within the flattened sequence.
    pub id: String,
    pub target: Target,
    pub title: Option<String>,
    pub text: String,
    pub buttons: Vec<Button>,
    pub before_show: Option<BeforeShow>,
    /// When absent, the session attaches the default target-presence gate.
    pub gate: Option<Gate>,
}

impl Step {
    pub fn new(id: impl Into<String>, target: Target, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target,
            title: None,
            text: text.into(),
            buttons: Vec::new(),
            before_show: None,
            gate: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_before_show(mut self, hook: BeforeShow) -> Self {
        self.before_show = Some(hook);
        self
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("title", &self.title)
            .field("text", &self.text)
            .field("buttons", &self.buttons)
            .field("before_show", &self.before_show.is_some())
            .field("gate", &self.gate.is_some())
            .finish()
    }
}

/// A named group of steps covering one product capability.
#[derive(Debug, Clone)]
pub struct Feature {
    pub name: String,
    /// When this feature's tour content was introduced. Kept for future
    /// "new since last seen" filtering; currently not used to filter.
    pub release_date: DateTime<Utc>,
    /// Ordered, non-empty.
    pub steps: Vec<Step>,
}

impl Feature {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            release_date: DateTime::<Utc>::UNIX_EPOCH,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_builder_defaults() {
        let step = Step::new(
            "audio",
            Target::new(r#"[data-test="joinAudio"]"#, Placement::Top),
            "Join the audio conference",
        );
        assert_eq!(step.id, "audio");
        assert!(step.title.is_none());
        assert!(step.buttons.is_empty());
        assert!(step.before_show.is_none());
        assert!(step.gate.is_none());
    }

    #[test]
    fn feature_release_date_defaults_to_epoch() {
        let feature = Feature::new("audio", vec![]);
        assert_eq!(feature.release_date, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn debug_elides_callbacks() {
        let step = Step::new(
            "video",
            Target::new(r#"[data-test="joinVideo"]"#, Placement::Top),
            "text",
        )
        .with_before_show(Arc::new(|| {}));
        let dbg = format!("{step:?}");
        assert!(dbg.contains("before_show: true"));
        assert!(dbg.contains("gate: false"));
    }
}
