//! Seams to the hosting client.
//!
//! The engine never touches the DOM or layout state directly; everything
//! goes through these traits so the host (or a simulation) stays in control
//! of its own UI.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{Button, Target};
use crate::host::Selector;
use crate::i18n::LocaleSelection;

/// UI commands and ambient state exposed by the hosting client.
pub trait HostUi: Send + Sync {
    /// Open the side panel that hosts the user list and the trigger menu.
    fn open_side_panel(&self);
    fn close_side_panel(&self);
    /// Open the presentation/content area (whiteboard, slides).
    fn open_presentation_area(&self);
    fn close_presentation_area(&self);

    fn side_panel_open(&self) -> bool;
    fn presentation_open(&self) -> bool;

    /// Open an external link ("know more" buttons).
    fn open_link(&self, url: &str);

    /// The user's selected locale plus the host's fallback.
    fn current_locale(&self) -> LocaleSelection;

    /// Register one entry in the host's options menu.
    fn register_menu_entry(&self, entry: MenuEntry);
}

/// Read-only element presence queries against the rendered document.
pub trait DomQuery: Send + Sync {
    fn element_present(&self, selector: &Selector) -> bool;
}

/// Renders tour tooltips. The controller calls `present` once per shown step
/// and `dismiss` when the tour reaches a terminal state.
pub trait StepPresenter: Send + Sync {
    fn present(&self, step: &PresentedStep);
    fn dismiss(&self);
}

/// What the presenter receives for one step: fully resolved content, no
/// callbacks. Button presses come back through the controller.
#[derive(Debug, Clone)]
pub struct PresentedStep {
    pub id: String,
    pub title: Option<String>,
    pub text: String,
    pub target: Target,
    pub buttons: Vec<Button>,
}

/// Click handler for a registered menu entry.
#[async_trait]
pub trait MenuAction: Send + Sync {
    async fn on_click(&self);
}

/// A menu entry registered with the host's options menu.
#[derive(Clone)]
pub struct MenuEntry {
    pub label: String,
    pub icon: String,
    pub action: Arc<dyn MenuAction>,
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .finish()
    }
}
