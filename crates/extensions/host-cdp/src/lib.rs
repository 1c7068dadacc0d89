//! # Chatsweep CDP Host
//!
//! Drives a live chat tab through the Chrome DevTools Protocol.
//!
//! - [`CdpClient`] - browser-level connection and target discovery
//! - [`PageSession`] - flattened session attached to one tab
//! - [`CdpHost`] - `HostDom`, `Overlay` and `Prompter` on top of a page session
//!
//! The page side is a small script installed on every document. It marks
//! sidebar rows with stable handles, draws the toggle, toolbar and drag box,
//! and reports gestures back through a runtime binding.

mod bridge_script;
pub mod cdp;
pub mod events;
mod host;

pub use bridge_script::BINDING_NAME;
pub use cdp::{CdpClient, CdpError, PageInfo, PageSession};
pub use events::{spawn_event_pump, translate};
pub use host::CdpHost;
