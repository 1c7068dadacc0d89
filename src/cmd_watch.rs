//! Interactive mode: the in-page toggle, toolbar and drag overlay.

use std::sync::Arc;

use anyhow::Context;
use chatsweep_config::Config;
use chatsweep_core::{Messages, ModeController, PlatformRegistry, SessionContext};
use chatsweep_protocols::{Categorizer, UiEvent};
use tracing::{debug, info, warn};

use crate::attach::attach;
use crate::categorizer::HttpCategorizer;

/// Pump page events into the mode controller until Ctrl-C or the tab closes.
pub(crate) async fn watch(config: &Config, registry: &PlatformRegistry) -> anyhow::Result<()> {
    let attached = attach(config, registry).await?;
    let mut events = attached
        .host
        .ui_events()
        .context("Page events already taken")?;

    let mut ctx = SessionContext::new(
        attached.platform.clone(),
        attached.host.clone(),
        attached.host.clone(),
        attached.host.clone(),
    )
    .with_timings(config.timings.clone())
    .with_messages(Messages::new(config.ui.language));
    if let Some(categorizer) = HttpCategorizer::from_config(&config.categorizer)? {
        let categorizer: Arc<dyn Categorizer> = Arc::new(categorizer);
        ctx = ctx.with_categorizer(categorizer);
    }

    let controller = ModeController::new(Arc::new(ctx), config.selection.click_threshold_px);
    controller.ensure_entry_point().await?;
    info!(
        "Watching {} on {}; press Ctrl-C to stop",
        attached.page.url, attached.platform.name
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    warn!("Page session closed");
                    break;
                };
                debug!(?event, "UI event");
                if matches!(event, UiEvent::Navigated) {
                    if let Err(e) = attached.host.install().await {
                        warn!("Failed to reinstall bridge after navigation: {}", e);
                    }
                }
                if let Err(e) = controller.handle(event).await {
                    warn!("Event handling failed: {}", e);
                }
            }
        }
    }

    controller.exit().await?;
    if let Some(Err(e)) = controller.wait_for_batch().await {
        warn!("Batch ended with error: {}", e);
    }
    Ok(())
}
