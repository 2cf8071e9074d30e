use std::sync::Arc;

use meet_tour::catalog::ButtonAction;
use meet_tour::config::TourConfig;
use meet_tour::host::settings::ClientSettingsResult;
use meet_tour::host::{
    settings_channel, DomQuery, HostUi, MenuAction, PresentedStep, SimulatedHost, StepPresenter,
    TourPlugin,
};
use meet_tour::i18n::LocaleSelection;
use meet_tour::tour::TourState;
use tokio_stream::StreamExt;

/// Client settings a meeting would deliver over the settings subscription.
const DEMO_CLIENT_SETTINGS: &str = r#"{
    "meeting_clientSettings": [{
        "clientSettingsJson": {
            "public": {
                "plugins": [{
                    "name": "TourPlugin",
                    "settings": {"url": {
                        "general": "https://docs.example.com/tour",
                        "screenshare": "https://docs.example.com/screenshare",
                        "whiteboard": "https://docs.example.com/whiteboard"
                    }}
                }]
            }
        }
    }]
}"#;

/// Elements present in the simulated meeting. The connection status and
/// recording indicators are left out so the demo shows gated steps being
/// skipped.
const PRESENT_ELEMENTS: &[&str] = &[
    r#"[data-test="sharedNotesButton"]"#,
    r#"[data-test="chatButton"]"#,
    r#"[data-test="questionsButton"]"#,
    r#"[data-test="actionsButton"]"#,
    r#"[data-test="muteMicButton"]"#,
    r#"[data-test="joinAudio"]"#,
    r#"[data-key="joinAudio"]"#,
    r#"[data-test="audioDropdownMenu"]"#,
    r#"[data-test="joinVideo"]"#,
    r#"[data-test="startScreenShare"]"#,
    r#"[id="interactionsButton"]"#,
    r#"[data-test="raiseHandBtn"]"#,
    r#"[id="whiteboard-element"]"#,
    r#"[class="tlui-toolbar__inner"]"#,
    r#"[data-test="turnMultiUsersWhiteboardOn"]"#,
    r#"[data-test="minimizePresentation"]"#,
    r#"[data-test="toggleUserList"]"#,
    r#"[data-test="leaveMeetingDropdown"]"#,
    r#"[data-test="optionsButton"]"#,
];

/// Prints each tooltip to the terminal.
struct ConsolePresenter;

impl StepPresenter for ConsolePresenter {
    fn present(&self, step: &PresentedStep) {
        println!();
        if let Some(title) = &step.title {
            println!("┌─ {} — {}", title, step.id);
        } else {
            println!("┌─ {}", step.id);
        }
        println!("│  {}", step.text);
        println!("│  attached to {} ({:?})", step.target.selector, step.target.placement);
        let labels: Vec<&str> = step.buttons.iter().map(|b| b.label.as_str()).collect();
        println!("└─ buttons: [{}]", labels.join("] ["));
    }

    fn dismiss(&self) {
        println!("\n(tour overlay dismissed)");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let locale = std::env::var("MEET_TOUR_LOCALE").unwrap_or_else(|_| "en".to_string());

    eprintln!("🧭 Meet Tour v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Locale: {locale} (fallback: en)");
    eprintln!("   Simulated meeting, auto-advancing through the tour.\n");

    let host = Arc::new(SimulatedHost::with_locale(LocaleSelection {
        locale,
        fallback: "en".to_string(),
    }));
    for selector in PRESENT_ELEMENTS {
        host.add_element(selector);
    }
    // The user starts with the presentation minimized; the tour must hand
    // the layout back that way.
    host.set_presentation_open(false);

    let (publisher, subscription) = settings_channel("TourPlugin");

    // Log link settings as the meeting delivers them, the way the real
    // subscription would over the session's lifetime.
    let mut updates = subscription.clone().into_stream();
    tokio::spawn(async move {
        while let Some(settings) = updates.next().await {
            let urls = settings.map(|s| s.urls()).unwrap_or_default();
            tracing::info!(?urls, "Tour link settings updated");
        }
    });

    publisher.publish(&ClientSettingsResult::parse(DEMO_CLIENT_SETTINGS)?);

    let plugin = TourPlugin::new(
        TourConfig::default(),
        Arc::clone(&host) as Arc<dyn HostUi>,
        Arc::clone(&host) as Arc<dyn DomQuery>,
        Arc::new(ConsolePresenter),
        subscription,
    )?;
    plugin.register_menu();

    // "Click" the registered menu entry.
    let entries = host.menu_entries();
    let entry = entries.first().expect("menu entry registered");
    eprintln!("   Menu: [{}] ({})\n", entry.label, entry.icon);
    entry.action.on_click().await;

    // Walk forward until the tour completes.
    while matches!(plugin.tour_state(), Some(TourState::Showing(_))) {
        plugin.handle_button(&ButtonAction::Next);
    }

    eprintln!(
        "\n   Done. Presentation open: {} — side panel open: {}",
        host.presentation_open(),
        host.side_panel_open()
    );
    Ok(())
}
