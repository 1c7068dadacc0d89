//! Connecting to the browser and choosing the chat tab.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use chatsweep_config::{Config, PlatformDescriptor};
use chatsweep_core::PlatformRegistry;
use chatsweep_host_cdp::{CdpClient, CdpHost, PageInfo};
use chatsweep_protocols::{HostDom, SweepError};
use tracing::info;

/// A tab with the bridge installed and its platform resolved.
pub(crate) struct AttachedPage {
    // Owns the receive task; dropping it closes the session.
    _client: CdpClient,
    pub page: PageInfo,
    pub platform: PlatformDescriptor,
    pub host: Arc<CdpHost>,
}

pub(crate) async fn connect(config: &Config) -> anyhow::Result<CdpClient> {
    let timeout = Duration::from_secs(config.browser.request_timeout_secs);
    CdpClient::connect(&config.browser.endpoint, timeout)
        .await
        .with_context(|| format!("Failed to connect to {}", config.browser.endpoint))
}

/// The tab to drive: the first whose URL contains `page_match`, or without a
/// filter the first whose host a platform serves.
pub(crate) fn choose_page<'a>(
    pages: &'a [PageInfo],
    page_match: Option<&str>,
    registry: &PlatformRegistry,
) -> Option<&'a PageInfo> {
    match page_match {
        Some(needle) => pages.iter().find(|p| p.url.contains(needle)),
        None => pages.iter().find(|p| {
            p.host()
                .is_some_and(|host| registry.detect(&host).is_some())
        }),
    }
}

pub(crate) async fn attach(
    config: &Config,
    registry: &PlatformRegistry,
) -> anyhow::Result<AttachedPage> {
    let client = connect(config).await?;
    let pages = client.list_pages().await.context("Failed to list tabs")?;
    let Some(page) = choose_page(&pages, config.browser.page_match.as_deref(), registry).cloned()
    else {
        match &config.browser.page_match {
            Some(needle) => bail!("No tab URL contains {:?}", needle),
            None => bail!("No open tab belongs to a supported chat platform"),
        }
    };

    let session = client
        .attach_page(&page.id)
        .await
        .with_context(|| format!("Failed to attach to tab {}", page.id))?;
    let host = CdpHost::attach(session)
        .await
        .context("Failed to install the page bridge")?;

    let host_name = host.host_name().await.context("Failed to read tab host")?;
    let platform = registry
        .detect(&host_name)
        .cloned()
        .ok_or(SweepError::NoPlatform(host_name))?;
    info!("Attached to {} ({}) as {}", page.title, page.url, platform.name);

    Ok(AttachedPage {
        _client: client,
        page,
        platform,
        host: Arc::new(host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, url: &str) -> PageInfo {
        PageInfo {
            id: id.to_string(),
            page_type: "page".to_string(),
            title: id.to_string(),
            url: url.to_string(),
            web_socket_debugger_url: None,
        }
    }

    #[test]
    fn test_choose_first_supported_page() {
        let registry = PlatformRegistry::from_config(&Config::default());
        let pages = vec![
            page("news", "https://example.com/"),
            page("chat", "https://chatgpt.com/c/123"),
            page("claude", "https://claude.ai/new"),
        ];
        assert_eq!(choose_page(&pages, None, &registry).unwrap().id, "chat");
    }

    #[test]
    fn test_choose_by_url_substring() {
        let registry = PlatformRegistry::from_config(&Config::default());
        let pages = vec![
            page("chat", "https://chatgpt.com/c/123"),
            page("claude", "https://claude.ai/new"),
        ];
        assert_eq!(
            choose_page(&pages, Some("claude.ai"), &registry).unwrap().id,
            "claude"
        );
        assert!(choose_page(&pages, Some("gemini"), &registry).is_none());
    }

    #[test]
    fn test_choose_none_supported() {
        let registry = PlatformRegistry::from_config(&Config::default());
        let pages = vec![page("news", "https://example.com/"), page("blank", "about:blank")];
        assert!(choose_page(&pages, None, &registry).is_none());
    }
}
