//! Host binding layer — everything the engine needs from the hosting
//! client, plus the plugin glue that registers the tour trigger.

pub mod binding;
pub mod selector;
pub mod settings;
pub mod sim;
pub mod traits;

pub use binding::{start_tour, TourPlugin};
pub use selector::Selector;
pub use settings::{settings_channel, SettingsPublisher, SettingsSubscription, TopicUrls};
pub use sim::SimulatedHost;
pub use traits::{DomQuery, HostUi, MenuAction, MenuEntry, PresentedStep, StepPresenter};
