//! WebSocket layer: console session, frames, events, and filtering.
//!
//! The panel streams console output and stat updates over a WebSocket
//! whose endpoint and one-time token come from the REST API. The session
//! here owns exactly one live connection, keeps its token fresh, and
//! translates frames to and from typed events.

pub mod event;
pub mod filter;
pub mod frame;
pub mod session;

pub use event::{EventBus, SocketEvent};
pub use filter::EventFilter;
pub use frame::Frame;
pub use session::SocketSession;
