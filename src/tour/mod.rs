//! Tour engine — session flattening, event registry, and the controller
//! state machine.

pub mod controller;
pub mod events;
pub mod session;

pub use controller::{TourController, TourState};
pub use events::{EventListener, EventRegistry, EventsListenerGuard, ListenerId, TourEvent};
pub use session::{CapturedUiState, TourSession};
