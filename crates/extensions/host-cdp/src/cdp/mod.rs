//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to a Chrome/Chromium started with remote debugging and talks the
//! CDP JSON-RPC protocol over one browser-level WebSocket, with flattened
//! per-page sessions.
//!
//! ## Usage
//!
//! 1. Start Chrome with remote debugging:
//!    ```bash
//!    chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Attach to the chat tab:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//!    let page = client.list_pages().await?.into_iter().next().unwrap();
//!    let session = client.attach_page(&page.id).await?;
//!    ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
