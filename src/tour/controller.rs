//! Tour controller — drives the step sequence as a small state machine.
//!
//! Navigation runs each candidate step's `before_show` hook and only then
//! evaluates its gate, so a hook can make the target element appear before
//! presence is checked. Gated-out steps are skipped in the direction of
//! travel.

use std::sync::Arc;

use crate::catalog::{Button, ButtonAction, Feature};
use crate::host::{DomQuery, HostUi, PresentedStep, StepPresenter};

use super::events::{EventRegistry, TourEvent};
use super::session::{CapturedUiState, TourSession};

/// Controller states. `Showing(i)` carries the current step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourState {
    Idle,
    Showing(usize),
    Completed,
    Cancelled,
}

impl TourState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Sequential, navigable walkthrough over a flattened step sequence.
pub struct TourController {
    session: TourSession,
    state: TourState,
    /// Set once the first step of this session has rendered; the first
    /// rendered step never offers a Back button.
    rendered_any: bool,
    dom: Arc<dyn DomQuery>,
    presenter: Arc<dyn StepPresenter>,
    ui: Arc<dyn HostUi>,
    events: Arc<EventRegistry>,
}

impl TourController {
    pub fn new(
        features: Vec<Feature>,
        captured: CapturedUiState,
        dom: Arc<dyn DomQuery>,
        presenter: Arc<dyn StepPresenter>,
        ui: Arc<dyn HostUi>,
        events: Arc<EventRegistry>,
    ) -> Self {
        Self {
            session: TourSession::new(features, captured),
            state: TourState::Idle,
            rendered_any: false,
            dom,
            presenter,
            ui,
            events,
        }
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn captured(&self) -> CapturedUiState {
        self.session.captured()
    }

    /// Begin the tour: show the first eligible step, or complete immediately
    /// if no step is eligible (not an error).
    pub fn start(&mut self) {
        if self.state != TourState::Idle {
            tracing::warn!(state = ?self.state, "start() ignored, tour already running or ended");
            return;
        }
        match self.seek_forward(0) {
            Some(i) => self.show(i),
            None => {
                tracing::info!("No eligible steps, completing tour immediately");
                self.finish(TourEvent::Complete);
            }
        }
    }

    /// Advance to the next eligible step, or complete past the last one.
    pub fn next(&mut self) {
        let TourState::Showing(i) = self.state else {
            tracing::debug!(state = ?self.state, "next() ignored outside Showing");
            return;
        };
        match self.seek_forward(i + 1) {
            Some(j) => self.show(j),
            None => self.finish(TourEvent::Complete),
        }
    }

    /// Return to the previous eligible step; stays put when none exists.
    pub fn back(&mut self) {
        let TourState::Showing(i) = self.state else {
            tracing::debug!(state = ?self.state, "back() ignored outside Showing");
            return;
        };
        match self.seek_backward(i) {
            Some(j) => self.show(j),
            None => tracing::debug!(index = i, "No eligible previous step, staying"),
        }
    }

    /// Explicit close action: end the tour as completed.
    pub fn complete(&mut self) {
        if let TourState::Showing(_) = self.state {
            self.finish(TourEvent::Complete);
        }
    }

    /// Dismissal via the cancel icon or a click outside the highlight.
    pub fn cancel(&mut self) {
        if let TourState::Showing(_) = self.state {
            self.finish(TourEvent::Cancel);
        }
    }

    /// Route a button press from the presenter.
    pub fn handle_button(&mut self, action: &ButtonAction) {
        match action {
            ButtonAction::Next => self.next(),
            ButtonAction::Back => self.back(),
            ButtonAction::Close => self.complete(),
            ButtonAction::OpenLink(url) => {
                tracing::info!(url, "Opening external link");
                self.ui.open_link(url);
            }
        }
    }

    /// Run a candidate step's hook, then its gate. Hook first, always: the
    /// hook may open the panel that makes the target element exist.
    fn eligible(&self, index: usize) -> bool {
        let step = self.session.step(index);
        if let Some(hook) = &step.before_show {
            hook();
        }
        match &step.gate {
            Some(gate) => gate(self.dom.as_ref()),
            None => true,
        }
    }

    fn seek_forward(&self, from: usize) -> Option<usize> {
        (from..self.session.len()).find(|&j| self.eligible(j))
    }

    fn seek_backward(&self, up_to: usize) -> Option<usize> {
        (0..up_to).rev().find(|&j| self.eligible(j))
    }

    fn show(&mut self, index: usize) {
        let step = self.session.step(index);
        let mut buttons: Vec<Button> = step.buttons.clone();
        if !self.rendered_any {
            // Whatever renders first has no previous step to go back to,
            // even when gating skipped the nominal first step.
            buttons.retain(|b| b.action != ButtonAction::Back);
        }
        let presented = PresentedStep {
            id: step.id.clone(),
            title: step.title.clone(),
            text: step.text.clone(),
            target: step.target.clone(),
            buttons,
        };
        self.state = TourState::Showing(index);
        self.rendered_any = true;
        tracing::debug!(step = %presented.id, index, "Showing tour step");
        self.presenter.present(&presented);
    }

    fn finish(&mut self, event: TourEvent) {
        if self.rendered_any {
            self.presenter.dismiss();
        }
        self.state = match event {
            TourEvent::Complete => TourState::Completed,
            TourEvent::Cancel => TourState::Cancelled,
        };
        tracing::info!(state = ?self.state, "Tour ended");
        self.events.emit(event);
    }
}
