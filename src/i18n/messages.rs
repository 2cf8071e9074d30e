//! Message ids used by the tour. Ids mirror the keys in the locale bundles.

pub const START_TOUR: &str = "app.tour.startTour";

pub const BUTTON_NEXT: &str = "app.tour.button.next";
pub const BUTTON_BACK: &str = "app.tour.button.back";
pub const BUTTON_KNOW_MORE: &str = "app.tour.button.knowMore";
pub const BUTTON_CLOSE: &str = "app.tour.button.close";

pub const TOGGLE_MIC: &str = "app.tour.toggleMic";
pub const AUDIO: &str = "app.tour.audio";
pub const SELECTOR_AUDIO: &str = "app.tour.selectorAudio";
pub const LEAVE_AUDIO: &str = "app.tour.leaveAudio";
pub const VIDEO: &str = "app.tour.video";
pub const SCREENSHARE: &str = "app.tour.screenshare";
pub const INTERACTIONS: &str = "app.tour.interactions";
pub const RAISE_HAND: &str = "app.tour.raiseHand";
pub const LEAVE_SESSION: &str = "app.tour.leaveSession";

pub const WHITEBOARD_TITLE: &str = "app.tour.whiteboard.title";
pub const WHITEBOARD_INTRO: &str = "app.tour.whiteboard.intro";
pub const WHITEBOARD_UPLOAD: &str = "app.tour.whiteboard.upload";
pub const WHITEBOARD_TOOLBAR: &str = "app.tour.whiteboard.toolbar";
pub const WHITEBOARD_MULTIUSER: &str = "app.tour.whiteboard.multiuser";

pub const CLOSE_PRESENTATION: &str = "app.tour.closePresentation";
pub const USER_LIST_TOGGLE: &str = "app.tour.userListToggle";
pub const PANEL_SHARED_NOTES: &str = "app.tour.panel.sharedNotes";
pub const PANEL_CHAT: &str = "app.tour.panel.chat";
pub const PANEL_QUESTIONS: &str = "app.tour.panel.questions";
pub const PLUS_ACTIONS: &str = "app.tour.plusActions";
pub const RECORDING: &str = "app.tour.recording";
pub const CONNECTION_STATUS: &str = "app.tour.connectionStatus";
pub const MORE_OPTIONS: &str = "app.tour.moreOptions";
pub const END_TOUR: &str = "app.tour.endTour";
