//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
pub(crate) type PendingMap = Arc<Mutex<HashMap<u64, PendingRequest>>>;
type EventHandlers = Arc<RwLock<HashMap<String, mpsc::UnboundedSender<CdpResponse>>>>;

/// Pending request waiting for response.
pub(crate) struct PendingRequest {
    pub tx: oneshot::Sender<Result<Value, CdpError>>,
}

/// Everything needed to issue a request on the shared socket.
#[derive(Clone)]
pub(crate) struct Transport {
    pub ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    pub pending: PendingMap,
    pub request_id: Arc<AtomicU64>,
    pub timeout: Duration,
}

impl Transport {
    /// Send one command and wait for its response. `None` waits forever.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, PendingRequest { tx });

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        let Some(timeout) = timeout else {
            return rx.await.unwrap_or_else(|_| Err(CdpError::SessionClosed));
        };
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// CDP client for one browser.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    browser: String,
    transport: Transport,
    event_handlers: EventHandlers,
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint (e.g. `http://localhost:9222`).
    ///
    /// `timeout` bounds every request; prompts shown in the page are exempt.
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        url::Url::parse(&http_endpoint)?;

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        debug!("Connected to browser: {}", version.browser);

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let event_handlers: EventHandlers = Arc::new(RwLock::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            let event_handlers = event_handlers.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending, event_handlers).await;
            })
        };

        debug!("CDP client connected to {}", version.web_socket_debugger_url);

        Ok(Self {
            http_endpoint,
            browser: version.browser,
            transport: Transport {
                ws_tx: Arc::new(tokio::sync::Mutex::new(ws_sink)),
                pending,
                request_id: Arc::new(AtomicU64::new(1)),
                timeout,
            },
            event_handlers,
            _recv_task: recv_task,
        })
    }

    /// WebSocket receive loop. Ends when the socket closes or fails.
    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap, event_handlers: EventHandlers) {
        while let Some(msg) = ws_source.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Ok(_) => continue,
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
            };
            trace!("CDP recv: {}", text);
            match serde_json::from_str::<CdpResponse>(&text) {
                Ok(resp) => Self::dispatch(resp, &pending, &event_handlers).await,
                Err(e) => warn!("Failed to parse CDP message: {}", e),
            }
        }

        // Dropping the senders fails waiting requests and ends event streams.
        pending.lock().clear();
        event_handlers.write().await.clear();
    }

    /// Responses resolve their pending request; events go to the channel
    /// registered for their session. Anything else is dropped.
    async fn dispatch(resp: CdpResponse, pending: &PendingMap, event_handlers: &EventHandlers) {
        if let Some(id) = resp.id {
            let Some(waiter) = pending.lock().remove(&id) else {
                trace!("Response {} has no waiter", id);
                return;
            };
            let result = match resp.error {
                Some(error) => Err(CdpError::Protocol {
                    code: error.code,
                    message: error.message,
                }),
                None => Ok(resp.result.unwrap_or(Value::Null)),
            };
            let _ = waiter.tx.send(result);
            return;
        }

        if resp.method.is_none() {
            return;
        }
        let session_id = resp.session_id.clone().unwrap_or_default();
        if let Some(tx) = event_handlers.read().await.get(&session_id) {
            let _ = tx.send(resp);
        }
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, None, Some(self.transport.timeout))
            .await
    }

    /// Browser product string, e.g. `Chrome/126.0.6478.126`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// List debuggable pages (tabs), skipping workers and extensions.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        let pages: Vec<PageInfo> = reqwest::get(&url).await?.json().await?;
        Ok(pages.into_iter().filter(PageInfo::is_page).collect())
    }

    /// Attach to an existing page.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.event_handlers
            .write()
            .await
            .insert(session_id.clone(), event_tx);

        let session = PageSession::new(
            target_id.to_string(),
            session_id,
            self.transport.clone(),
            event_rx,
        );

        session.enable_domains().await?;

        Ok(session)
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
