//! Error types for the chatsweep protocol layer.

mod batch;
mod categorize;
mod host;
mod sweep;

pub use batch::*;
pub use categorize::*;
pub use host::*;
pub use sweep::*;
