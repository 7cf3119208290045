pub mod actor;
pub mod cancel;
pub mod event_bus;

pub use actor::ActorState;
pub use cancel::CancelSignal;
pub use event_bus::{EventEmitter, EventReceiver, RunEvent};
