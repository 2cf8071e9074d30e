//! Host binding — wires the tour engine into the hosting client.
//!
//! Owns the menu entry that triggers the tour, the captured-state snapshot,
//! the settle delay before starting, and the end-of-tour restoration
//! listeners. The engine itself never talks to the host except through the
//! traits in [`crate::host::traits`].

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::{tour_features, ButtonAction};
use crate::config::TourConfig;
use crate::error::Result;
use crate::host::settings::{SettingsSubscription, TopicUrls};
use crate::host::{DomQuery, HostUi, MenuAction, MenuEntry, StepPresenter};
use crate::i18n::{messages as msg, Localizer};
use crate::tour::{
    CapturedUiState, EventRegistry, EventsListenerGuard, TourController, TourEvent, TourState,
};

/// Start the tour: build the catalog for this run, flatten it, and show the
/// first eligible step. Returns immediately with the live controller; the
/// host routes button presses and cancellation back into it.
pub fn start_tour(
    localizer: &Localizer,
    urls: &TopicUrls,
    ui: Arc<dyn HostUi>,
    dom: Arc<dyn DomQuery>,
    presenter: Arc<dyn StepPresenter>,
    events: Arc<EventRegistry>,
    captured: CapturedUiState,
) -> TourController {
    let features = tour_features(
        localizer,
        urls,
        Arc::clone(&ui),
        captured.side_panel_open,
        captured.presentation_open,
    );
    let mut controller = TourController::new(features, captured, dom, presenter, ui, events);
    controller.start();
    controller
}

/// The tour plugin instance bound to one hosting client.
pub struct TourPlugin {
    uuid: Uuid,
    config: TourConfig,
    localizer: Localizer,
    ui: Arc<dyn HostUi>,
    dom: Arc<dyn DomQuery>,
    presenter: Arc<dyn StepPresenter>,
    settings: SettingsSubscription,
    events: Arc<EventRegistry>,
    active: Mutex<Option<TourController>>,
}

impl TourPlugin {
    /// Bind the plugin: resolves the locale bundle (fatal if neither the
    /// selected nor the fallback bundle loads) and prepares the event
    /// registry shared across tour runs.
    pub fn new(
        config: TourConfig,
        ui: Arc<dyn HostUi>,
        dom: Arc<dyn DomQuery>,
        presenter: Arc<dyn StepPresenter>,
        settings: SettingsSubscription,
    ) -> Result<Arc<Self>> {
        let selection = ui.current_locale();
        let localizer = Localizer::load(&config.locales_dir, &selection)?;
        Ok(Arc::new(Self {
            uuid: Uuid::new_v4(),
            config,
            localizer,
            ui,
            dom,
            presenter,
            settings,
            events: Arc::new(EventRegistry::new()),
            active: Mutex::new(None),
        }))
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn events(&self) -> &Arc<EventRegistry> {
        &self.events
    }

    /// Register the "start tour" entry in the host's options menu.
    pub fn register_menu(self: &Arc<Self>) {
        self.ui.register_menu_entry(MenuEntry {
            label: self.localizer.message(msg::START_TOUR),
            icon: self.config.menu_icon.clone(),
            action: Arc::clone(self) as Arc<dyn MenuAction>,
        });
    }

    /// The menu-click sequence: snapshot UI state, force the relevant
    /// panels open, wait for layout to settle, then start the tour.
    ///
    /// The settle delay has no cancellation path; if the user changes the
    /// layout during it, the tour starts against whatever state results.
    pub async fn trigger(&self) {
        // A tour may already be up (menu re-opened mid-tour). End it first
        // so its restore listeners fire and the snapshot below sees the
        // restored layout, not the old session's.
        {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(controller) = active.as_mut() {
                tracing::warn!(uuid = %self.uuid, "Tour already running, cancelling it first");
                controller.cancel();
                *active = None;
            }
        }

        let captured = CapturedUiState {
            side_panel_open: self.ui.side_panel_open(),
            presentation_open: self.ui.presentation_open(),
        };
        tracing::info!(uuid = %self.uuid, "Starting tour");

        // Ensure only the user list panel is open (also matters on mobile),
        // and that the presentation is up before the whiteboard steps.
        self.ui.close_side_panel();
        self.ui.open_side_panel();
        self.ui.open_presentation_area();
        tokio::time::sleep(self.config.settle_delay).await;

        self.install_restore_listeners(captured);

        let controller = start_tour(
            &self.localizer,
            &self.settings.urls(),
            Arc::clone(&self.ui),
            Arc::clone(&self.dom),
            Arc::clone(&self.presenter),
            Arc::clone(&self.events),
            captured,
        );

        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        // A tour with no eligible steps ends inside start(); keep only a
        // live controller.
        *active = (!controller.state().is_terminal()).then_some(controller);
    }

    /// Restore the captured UI state when the tour ends, however it ends.
    ///
    /// Both terminal events share one guard, so restoration runs exactly
    /// once per session and both listeners detach on first fire — nothing
    /// leaks into the next run.
    fn install_restore_listeners(&self, captured: CapturedUiState) {
        let guard = EventsListenerGuard::new(Arc::clone(&self.events));
        for event in [TourEvent::Complete, TourEvent::Cancel] {
            let ui = Arc::clone(&self.ui);
            let handler_guard = guard.clone();
            guard.attach(
                event,
                Arc::new(move |_| {
                    // Reopen the panel that hosts the trigger menu.
                    ui.open_side_panel();
                    // Put the presentation back the way the user had it.
                    if captured.presentation_open != ui.presentation_open() {
                        if captured.presentation_open {
                            ui.open_presentation_area();
                        } else {
                            ui.close_presentation_area();
                        }
                    }
                    handler_guard.detach_all();
                }),
            );
        }
    }

    /// Route a button press from the presenter into the active tour.
    pub fn handle_button(&self, action: &ButtonAction) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(controller) = active.as_mut() {
            controller.handle_button(action);
            if controller.state().is_terminal() {
                *active = None;
            }
        } else {
            tracing::debug!("Button press with no active tour");
        }
    }

    /// Dismissal via the cancel icon or a click outside the highlight.
    pub fn cancel(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(controller) = active.as_mut() {
            controller.cancel();
            *active = None;
        }
    }

    /// Current tour state, if a tour is active.
    pub fn tour_state(&self) -> Option<TourState> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(TourController::state)
    }
}

#[async_trait]
impl MenuAction for TourPlugin {
    async fn on_click(&self) {
        self.trigger().await;
    }
}
