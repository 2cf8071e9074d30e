//! Simulated meeting client — backs the demo binary and integration tests.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::host::{DomQuery, MenuEntry, Selector};
use crate::i18n::LocaleSelection;

use super::traits::HostUi;

#[derive(Debug, Default)]
struct SimState {
    side_panel_open: bool,
    presentation_open: bool,
    elements: HashSet<String>,
    opened_links: Vec<String>,
    call_log: Vec<String>,
}

/// In-memory stand-in for the hosting client: panel flags, a set of
/// rendered elements keyed by selector, and a log of every UI command.
pub struct SimulatedHost {
    state: Mutex<SimState>,
    menu: Mutex<Vec<MenuEntry>>,
    locale: LocaleSelection,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::with_locale(LocaleSelection::default())
    }

    pub fn with_locale(locale: LocaleSelection) -> Self {
        Self {
            state: Mutex::new(SimState {
                side_panel_open: true,
                presentation_open: true,
                ..SimState::default()
            }),
            menu: Mutex::new(Vec::new()),
            locale,
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self, call: &str) {
        self.state().call_log.push(call.to_string());
    }

    /// Make an element present in the simulated document.
    pub fn add_element(&self, selector: &str) {
        self.state().elements.insert(selector.to_string());
    }

    pub fn remove_element(&self, selector: &str) {
        self.state().elements.remove(selector);
    }

    pub fn set_side_panel_open(&self, open: bool) {
        self.state().side_panel_open = open;
    }

    pub fn set_presentation_open(&self, open: bool) {
        self.state().presentation_open = open;
    }

    pub fn opened_links(&self) -> Vec<String> {
        self.state().opened_links.clone()
    }

    /// Every UI command received, in order.
    pub fn call_log(&self) -> Vec<String> {
        self.state().call_log.clone()
    }

    pub fn clear_call_log(&self) {
        self.state().call_log.clear();
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.menu
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostUi for SimulatedHost {
    fn open_side_panel(&self) {
        self.log("open_side_panel");
        self.state().side_panel_open = true;
    }

    fn close_side_panel(&self) {
        self.log("close_side_panel");
        self.state().side_panel_open = false;
    }

    fn open_presentation_area(&self) {
        self.log("open_presentation_area");
        self.state().presentation_open = true;
    }

    fn close_presentation_area(&self) {
        self.log("close_presentation_area");
        self.state().presentation_open = false;
    }

    fn side_panel_open(&self) -> bool {
        self.state().side_panel_open
    }

    fn presentation_open(&self) -> bool {
        self.state().presentation_open
    }

    fn open_link(&self, url: &str) {
        self.log("open_link");
        self.state().opened_links.push(url.to_string());
    }

    fn current_locale(&self) -> LocaleSelection {
        self.locale.clone()
    }

    fn register_menu_entry(&self, entry: MenuEntry) {
        self.menu
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

impl DomQuery for SimulatedHost {
    fn element_present(&self, selector: &Selector) -> bool {
        let state = self.state();
        if state.elements.contains(selector.raw()) {
            return true;
        }
        // Also match on the parsed attribute pair, so `[id="x"]` added with
        // different whitespace or quoting still resolves.
        let Some(wanted) = selector.attribute() else {
            return false;
        };
        state
            .elements
            .iter()
            .any(|e| Selector::new(e.as_str()).attribute() == Some(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_mutate_state_and_log() {
        let host = SimulatedHost::new();
        host.close_side_panel();
        host.close_presentation_area();
        assert!(!host.side_panel_open());
        assert!(!host.presentation_open());
        host.open_side_panel();
        assert!(host.side_panel_open());
        assert_eq!(
            host.call_log(),
            ["close_side_panel", "close_presentation_area", "open_side_panel"]
        );
    }

    #[test]
    fn element_presence_matches_by_attribute() {
        let host = SimulatedHost::new();
        host.add_element(r#"[data-test="joinAudio"]"#);
        assert!(host.element_present(&Selector::new(r#"[data-test="joinAudio"]"#)));
        assert!(!host.element_present(&Selector::new(r#"[data-test="joinVideo"]"#)));
        host.remove_element(r#"[data-test="joinAudio"]"#);
        assert!(!host.element_present(&Selector::new(r#"[data-test="joinAudio"]"#)));
    }
}
