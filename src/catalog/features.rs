//! The tour content: every feature walked by the guided tour, in
//! presentation order.
//!
//! Pure construction — text is resolved through the localizer, link URLs
//! come from the per-meeting settings, and the side-effect hooks only
//! invoke the host callbacks handed in. Content changes happen here,
//! controller logic never does.

use std::sync::Arc;

use crate::host::settings::TopicUrls;
use crate::host::HostUi;
use crate::i18n::{messages as msg, Localizer};

use super::model::{BeforeShow, Button, ButtonAction, Feature, Placement, Step, Target};

/// Pre-show side effects shared by the catalog's steps.
///
/// The "initially open" flags are captured at trigger time: panels the user
/// already had open are left alone, so end-of-tour restoration lands back
/// on the user's own layout.
struct StepActions {
    ui: Arc<dyn HostUi>,
    side_panel_initially_open: bool,
    presentation_initially_open: bool,
}

impl StepActions {
    /// Close the side panel so toolbar targets are unobstructed.
    fn close_panel(&self) -> BeforeShow {
        let ui = Arc::clone(&self.ui);
        Arc::new(move || ui.close_side_panel())
    }

    /// Open the side panel (user list) unless it was already open.
    fn open_side_panel(&self) -> BeforeShow {
        let ui = Arc::clone(&self.ui);
        let already_open = self.side_panel_initially_open;
        Arc::new(move || {
            if !already_open {
                ui.open_side_panel();
            }
        })
    }

    /// Open the presentation area unless it was already open.
    fn open_presentation(&self) -> BeforeShow {
        let ui = Arc::clone(&self.ui);
        let already_open = self.presentation_initially_open;
        Arc::new(move || {
            if !already_open {
                ui.open_presentation_area();
            }
        })
    }
}

fn next_button(loc: &Localizer) -> Button {
    Button {
        label: loc.message(msg::BUTTON_NEXT),
        action: ButtonAction::Next,
        secondary: false,
    }
}

fn back_button(loc: &Localizer) -> Button {
    Button {
        label: loc.message(msg::BUTTON_BACK),
        action: ButtonAction::Back,
        secondary: true,
    }
}

fn close_button(loc: &Localizer) -> Button {
    Button {
        label: loc.message(msg::BUTTON_CLOSE),
        action: ButtonAction::Close,
        secondary: false,
    }
}

/// "Know more" link button. Omitted entirely when no URL is configured for
/// the topic, rather than opening an empty link target.
fn know_more_button(loc: &Localizer, url: Option<&String>) -> Option<Button> {
    url.map(|url| Button {
        label: loc.message(msg::BUTTON_KNOW_MORE),
        action: ButtonAction::OpenLink(url.clone()),
        secondary: true,
    })
}

fn nav_buttons(loc: &Localizer) -> Vec<Button> {
    vec![back_button(loc), next_button(loc)]
}

/// Build the full ordered feature catalog.
pub fn tour_features(
    loc: &Localizer,
    urls: &TopicUrls,
    ui: Arc<dyn HostUi>,
    side_panel_initially_open: bool,
    presentation_initially_open: bool,
) -> Vec<Feature> {
    let actions = StepActions {
        ui,
        side_panel_initially_open,
        presentation_initially_open,
    };

    let panel = Feature::new(
        "panel",
        vec![
            Step::new(
                "panel.sharedNotes",
                Target::new(r#"[data-test="sharedNotesButton"]"#, Placement::Bottom),
                loc.message(msg::PANEL_SHARED_NOTES),
            )
            .with_buttons(nav_buttons(loc))
            .with_before_show(actions.open_side_panel()),
            Step::new(
                "panel.chat",
                Target::new(r#"[data-test="chatButton"]"#, Placement::Bottom),
                loc.message(msg::PANEL_CHAT),
            )
            .with_buttons(nav_buttons(loc)),
            Step::new(
                "panel.questions",
                Target::new(r#"[data-test="questionsButton"]"#, Placement::Bottom),
                loc.message(msg::PANEL_QUESTIONS),
            )
            .with_buttons(nav_buttons(loc)),
        ],
    );

    let plus_actions = Feature::new(
        "plusActions",
        vec![Step::new(
            "plusActions",
            Target::new(r#"[data-test="actionsButton"]"#, Placement::Top),
            loc.message(msg::PLUS_ACTIONS),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let microphone_toggle = Feature::new(
        "microphoneToggle",
        vec![Step::new(
            "microphoneToggle",
            Target::new(r#"[data-test="muteMicButton"]"#, Placement::Top),
            loc.message(msg::TOGGLE_MIC),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let audio_join = Feature::new(
        "audio",
        vec![Step::new(
            "audio",
            Target::new(r#"[data-test="joinAudio"]"#, Placement::Top),
            loc.message(msg::AUDIO),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let leave_audio = Feature::new(
        "leaveAudio",
        vec![Step::new(
            "leaveAudio",
            Target::new(r#"[data-key="joinAudio"]"#, Placement::Top),
            loc.message(msg::LEAVE_AUDIO),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let audio_selector = Feature::new(
        "audioSelector",
        vec![Step::new(
            "audioSelector",
            Target::new(r#"[data-test="audioDropdownMenu"]"#, Placement::Top),
            loc.message(msg::SELECTOR_AUDIO),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let video = Feature::new(
        "video",
        vec![Step::new(
            "video",
            Target::new(r#"[data-test="joinVideo"]"#, Placement::Top),
            loc.message(msg::VIDEO),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let screenshare = Feature::new(
        "screenshare",
        vec![Step::new(
            "screenshare",
            Target::new(r#"[data-test="startScreenShare"]"#, Placement::Top),
            loc.message(msg::SCREENSHARE),
        )
        .with_buttons(
            know_more_button(loc, urls.screenshare.as_ref())
                .into_iter()
                .chain(nav_buttons(loc))
                .collect(),
        )
        .with_before_show(actions.close_panel())],
    );

    let interactions = Feature::new(
        "interactions",
        vec![Step::new(
            "interactions",
            Target::new(r#"[id="interactionsButton"]"#, Placement::Top),
            loc.message(msg::INTERACTIONS),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let raise_hand = Feature::new(
        "raiseHand",
        vec![Step::new(
            "raiseHand",
            Target::new(r#"[data-test="raiseHandBtn"]"#, Placement::Top),
            loc.message(msg::RAISE_HAND),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let whiteboard_title = loc.message(msg::WHITEBOARD_TITLE);
    let whiteboard = Feature::new(
        "whiteboard",
        vec![
            Step::new(
                "whiteboard.intro",
                Target::new(r#"[id="whiteboard-element"]"#, Placement::Top),
                loc.message(msg::WHITEBOARD_INTRO),
            )
            .with_title(whiteboard_title.clone())
            .with_buttons(nav_buttons(loc))
            .with_before_show(actions.open_presentation()),
            Step::new(
                "whiteboard.upload",
                Target::new(r#"[id="whiteboard-element"]"#, Placement::Top),
                loc.message(msg::WHITEBOARD_UPLOAD),
            )
            .with_title(whiteboard_title.clone())
            .with_buttons(nav_buttons(loc))
            .with_before_show(actions.open_presentation()),
            Step::new(
                "whiteboard.toolbar",
                Target::new(r#"[class="tlui-toolbar__inner"]"#, Placement::TopStart),
                loc.message(msg::WHITEBOARD_TOOLBAR),
            )
            .with_title(whiteboard_title.clone())
            .with_buttons(
                know_more_button(loc, urls.whiteboard.as_ref())
                    .into_iter()
                    .chain(nav_buttons(loc))
                    .collect(),
            )
            .with_before_show(actions.open_presentation()),
            Step::new(
                "whiteboard.multiuser",
                Target::new(
                    r#"[data-test="turnMultiUsersWhiteboardOn"]"#,
                    Placement::Bottom,
                ),
                loc.message(msg::WHITEBOARD_MULTIUSER),
            )
            .with_title(whiteboard_title)
            .with_buttons(nav_buttons(loc))
            .with_before_show(actions.open_presentation()),
        ],
    );

    let close_presentation = Feature::new(
        "closePresentation",
        vec![Step::new(
            "closePresentation",
            Target::new(r#"[data-test="minimizePresentation"]"#, Placement::Top),
            loc.message(msg::CLOSE_PRESENTATION),
        )
        .with_buttons(nav_buttons(loc))
        .with_before_show(actions.close_panel())],
    );

    let user_list_toggle = Feature::new(
        "userListToggle",
        vec![Step::new(
            "userListToggle",
            Target::new(r#"[data-test="toggleUserList"]"#, Placement::Bottom),
            loc.message(msg::USER_LIST_TOGGLE),
        )
        .with_buttons(nav_buttons(loc))],
    );

    let recording = Feature::new(
        "recording",
        vec![Step::new(
            "recording",
            Target::new(r#"[data-test="recordingIndicator"]"#, Placement::Bottom),
            loc.message(msg::RECORDING),
        )
        .with_buttons(nav_buttons(loc))],
    );

    let connection_status = Feature::new(
        "connectionStatus",
        vec![Step::new(
            "connectionStatus",
            Target::new(r#"[data-test="connectionStatusButton"]"#, Placement::Bottom),
            loc.message(msg::CONNECTION_STATUS),
        )
        .with_buttons(nav_buttons(loc))],
    );

    let leave_session = Feature::new(
        "leaveSession",
        vec![Step::new(
            "leaveSession",
            Target::new(r#"[data-test="leaveMeetingDropdown"]"#, Placement::Bottom),
            loc.message(msg::LEAVE_SESSION),
        )
        .with_buttons(nav_buttons(loc))],
    );

    let more_options = Feature::new(
        "moreOptions",
        vec![Step::new(
            "moreOptions",
            Target::new(r#"[data-test="optionsButton"]"#, Placement::Bottom),
            loc.message(msg::MORE_OPTIONS),
        )
        .with_buttons(nav_buttons(loc))],
    );

    let end_tour = Feature::new(
        "endTour",
        vec![Step::new(
            "endTour",
            Target::new(r#"[data-test="optionsButton"]"#, Placement::Bottom),
            loc.message(msg::END_TOUR),
        )
        .with_buttons(
            know_more_button(loc, urls.general.as_ref())
                .into_iter()
                .chain([back_button(loc), close_button(loc)])
                .collect(),
        )],
    );

    let mut features = vec![
        panel,
        plus_actions,
        microphone_toggle,
        audio_join,
        leave_audio,
        audio_selector,
        video,
        screenshare,
        interactions,
        raise_hand,
        whiteboard,
        close_presentation,
        user_list_toggle,
        recording,
        connection_status,
        leave_session,
        more_options,
        end_tour,
    ];

    strip_first_back_button(&mut features);
    features
}

/// Remove Back from the first feature's first buttoned step: in catalog
/// order there is nothing before it. The controller additionally suppresses
/// Back on whichever step actually renders first, covering the case where
/// gating skips this one.
fn strip_first_back_button(features: &mut [Feature]) {
    let Some(first) = features.first_mut() else {
        return;
    };
    if let Some(step) = first.steps.iter_mut().find(|s| !s.buttons.is_empty()) {
        step.buttons.retain(|b| b.action != ButtonAction::Back);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::host::MenuEntry;
    use crate::i18n::LocaleSelection;

    #[derive(Default)]
    struct RecordingUi {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingUi {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl HostUi for RecordingUi {
        fn open_side_panel(&self) {
            self.calls.lock().unwrap().push("open_side_panel");
        }
        fn close_side_panel(&self) {
            self.calls.lock().unwrap().push("close_side_panel");
        }
        fn open_presentation_area(&self) {
            self.calls.lock().unwrap().push("open_presentation_area");
        }
        fn close_presentation_area(&self) {
            self.calls.lock().unwrap().push("close_presentation_area");
        }
        fn side_panel_open(&self) -> bool {
            false
        }
        fn presentation_open(&self) -> bool {
            false
        }
        fn open_link(&self, _url: &str) {}
        fn current_locale(&self) -> LocaleSelection {
            LocaleSelection::default()
        }
        fn register_menu_entry(&self, _entry: MenuEntry) {}
    }

    fn localizer() -> Localizer {
        let messages: HashMap<String, String> = [
            (msg::BUTTON_NEXT, "Next"),
            (msg::BUTTON_BACK, "Back"),
            (msg::BUTTON_KNOW_MORE, "Know more"),
            (msg::BUTTON_CLOSE, "Close"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Localizer::from_messages("en", messages)
    }

    fn build(urls: &TopicUrls, panel_open: bool, presentation_open: bool) -> Vec<Feature> {
        tour_features(
            &localizer(),
            urls,
            Arc::new(RecordingUi::default()),
            panel_open,
            presentation_open,
        )
    }

    #[test]
    fn catalog_order_and_step_count() {
        let features = build(&TopicUrls::default(), false, false);
        let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "panel",
                "plusActions",
                "microphoneToggle",
                "audio",
                "leaveAudio",
                "audioSelector",
                "video",
                "screenshare",
                "interactions",
                "raiseHand",
                "whiteboard",
                "closePresentation",
                "userListToggle",
                "recording",
                "connectionStatus",
                "leaveSession",
                "moreOptions",
                "endTour",
            ]
        );
        let total: usize = features.iter().map(|f| f.steps.len()).sum();
        assert_eq!(total, 23);
        assert!(features.iter().all(|f| !f.steps.is_empty()));
    }

    #[test]
    fn step_ids_are_unique() {
        let features = build(&TopicUrls::default(), false, false);
        let mut ids: Vec<&str> = features
            .iter()
            .flat_map(|f| f.steps.iter())
            .map(|s| s.id.as_str())
            .collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn first_buttoned_step_has_no_back() {
        let features = build(&TopicUrls::default(), false, false);
        let first = &features[0].steps[0];
        assert_eq!(first.id, "panel.sharedNotes");
        assert!(first.buttons.iter().all(|b| b.action != ButtonAction::Back));
        // The very next step still has one.
        assert!(features[0].steps[1]
            .buttons
            .iter()
            .any(|b| b.action == ButtonAction::Back));
    }

    #[test]
    fn know_more_present_only_when_url_configured() {
        let urls = TopicUrls {
            general: Some("https://docs.example.com/general".into()),
            screenshare: None,
            whiteboard: Some("https://docs.example.com/wb".into()),
        };
        let features = build(&urls, false, false);

        let step = |id: &str| {
            features
                .iter()
                .flat_map(|f| f.steps.iter())
                .find(|s| s.id == id)
                .unwrap()
                .clone()
        };
        let has_link = |s: &Step| {
            s.buttons
                .iter()
                .any(|b| matches!(b.action, ButtonAction::OpenLink(_)))
        };

        assert!(!has_link(&step("screenshare")), "screenshare url unset");
        assert!(has_link(&step("whiteboard.toolbar")));
        let end = step("endTour");
        assert!(has_link(&end));
        assert_eq!(
            end.buttons[0].action,
            ButtonAction::OpenLink("https://docs.example.com/general".into())
        );
    }

    #[test]
    fn end_tour_closes_instead_of_advancing() {
        let features = build(&TopicUrls::default(), false, false);
        let end = features.last().unwrap().steps.last().unwrap();
        assert!(end.buttons.iter().any(|b| b.action == ButtonAction::Close));
        assert!(end.buttons.iter().all(|b| b.action != ButtonAction::Next));
    }

    #[test]
    fn toolbar_steps_close_the_panel_before_showing() {
        let ui = Arc::new(RecordingUi::default());
        let features = tour_features(&localizer(), &TopicUrls::default(), Arc::clone(&ui) as Arc<dyn HostUi>, false, false);
        let mic = features
            .iter()
            .flat_map(|f| f.steps.iter())
            .find(|s| s.id == "microphoneToggle")
            .unwrap();
        (mic.before_show.as_ref().unwrap())();
        assert_eq!(ui.calls(), ["close_side_panel"]);
    }

    #[test]
    fn open_hooks_respect_initially_open_flags() {
        // Panels already open: hooks leave them alone.
        let ui = Arc::new(RecordingUi::default());
        let features = tour_features(&localizer(), &TopicUrls::default(), Arc::clone(&ui) as Arc<dyn HostUi>, true, true);
        let steps: Vec<&Step> = features.iter().flat_map(|f| f.steps.iter()).collect();
        let shared_notes = steps.iter().find(|s| s.id == "panel.sharedNotes").unwrap();
        let intro = steps.iter().find(|s| s.id == "whiteboard.intro").unwrap();
        (shared_notes.before_show.as_ref().unwrap())();
        (intro.before_show.as_ref().unwrap())();
        assert!(ui.calls().is_empty());

        // Panels initially closed: hooks open them.
        let ui = Arc::new(RecordingUi::default());
        let features = tour_features(&localizer(), &TopicUrls::default(), Arc::clone(&ui) as Arc<dyn HostUi>, false, false);
        let steps: Vec<&Step> = features.iter().flat_map(|f| f.steps.iter()).collect();
        let shared_notes = steps.iter().find(|s| s.id == "panel.sharedNotes").unwrap();
        let intro = steps.iter().find(|s| s.id == "whiteboard.intro").unwrap();
        (shared_notes.before_show.as_ref().unwrap())();
        (intro.before_show.as_ref().unwrap())();
        assert_eq!(ui.calls(), ["open_side_panel", "open_presentation_area"]);
    }

    #[test]
    fn whiteboard_steps_share_a_title() {
        let features = build(&TopicUrls::default(), false, false);
        let whiteboard = features.iter().find(|f| f.name == "whiteboard").unwrap();
        assert_eq!(whiteboard.steps.len(), 4);
        for step in &whiteboard.steps {
            assert_eq!(step.title.as_deref(), Some(msg::WHITEBOARD_TITLE));
        }
    }

    #[test]
    fn missing_messages_degrade_to_ids() {
        // An empty localizer still yields a usable catalog.
        let loc = Localizer::from_messages("en", HashMap::new());
        let features = tour_features(
            &loc,
            &TopicUrls::default(),
            Arc::new(RecordingUi::default()),
            false,
            false,
        );
        let audio = features
            .iter()
            .flat_map(|f| f.steps.iter())
            .find(|s| s.id == "audio")
            .unwrap();
        assert_eq!(audio.text, msg::AUDIO);
    }
}
