//! Tab listing and headless batch subcommands.

use std::sync::Arc;

use anyhow::{Context, bail};
use chatsweep_config::Config;
use chatsweep_core::{
    BatchAction, BatchReport, BatchRunner, Messages, PlatformRegistry, SelectableItem,
    SessionContext,
};
use chatsweep_protocols::{HostDom, Prompter};
use regex::Regex;
use tracing::info;

use crate::adapters::TerminalPrompter;
use crate::attach::{AttachedPage, attach, connect};
use crate::cli::TargetArgs;

/// List debuggable tabs.
pub(crate) async fn pages(config: &Config, registry: &PlatformRegistry) -> anyhow::Result<()> {
    let client = connect(config).await?;
    info!("Connected to {}", client.browser());
    for page in client.list_pages().await.context("Failed to list tabs")? {
        let platform = page
            .host()
            .and_then(|host| registry.detect(&host).map(|p| p.name.clone()))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<34} {:<10} {}  {}", page.id, platform, page.title, page.url);
    }
    Ok(())
}

async fn visible_items(attached: &AttachedPage) -> anyhow::Result<Vec<SelectableItem>> {
    let query = chatsweep_core::platform::item_query(&attached.platform);
    let snapshots = attached
        .host
        .list_items(&query)
        .await
        .context("Failed to enumerate sidebar items")?;
    Ok(snapshots.iter().map(SelectableItem::from_snapshot).collect())
}

/// List selectable items of the chosen tab.
pub(crate) async fn items(config: &Config, registry: &PlatformRegistry) -> anyhow::Result<()> {
    let attached = attach(config, registry).await?;
    let items = visible_items(&attached).await?;
    for item in &items {
        println!("{:<40} {}", item.id.as_str(), item.title);
    }
    println!("{} item(s) on {}", items.len(), attached.platform.name);
    Ok(())
}

/// Items a headless batch acts on, in sidebar order.
pub(crate) fn select_targets(
    items: Vec<SelectableItem>,
    target: &TargetArgs,
) -> anyhow::Result<Vec<SelectableItem>> {
    match (&target.pattern, target.all) {
        (Some(pattern), _) => {
            let re = Regex::new(pattern).with_context(|| format!("Invalid pattern {:?}", pattern))?;
            Ok(items.into_iter().filter(|i| re.is_match(&i.title)).collect())
        }
        (None, true) => Ok(items),
        (None, false) => bail!("Pass --match REGEX or --all to choose items"),
    }
}

/// Run `action` over the items chosen by `target`.
pub(crate) async fn batch(
    config: &Config,
    registry: &PlatformRegistry,
    action: BatchAction,
    target: &TargetArgs,
    dry_run: bool,
) -> anyhow::Result<()> {
    let attached = attach(config, registry).await?;
    let targets = select_targets(visible_items(&attached).await?, target)?;

    if targets.is_empty() {
        println!("No items matched.");
        return Ok(());
    }
    if dry_run {
        for item in &targets {
            println!("would {}: {}", action.name(), item.title);
        }
        println!("{} item(s)", targets.len());
        return Ok(());
    }

    let prompter: Arc<dyn Prompter> = Arc::new(TerminalPrompter::new(target.yes));
    let ctx = SessionContext::new(
        attached.platform.clone(),
        attached.host.clone(),
        attached.host.clone(),
        prompter,
    )
    .with_timings(config.timings.clone())
    .with_messages(Messages::new(config.ui.language));

    let runner = BatchRunner::new(Arc::new(ctx));
    let report = runner.run_items(action, targets).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &BatchReport) {
    for failure in &report.failures {
        println!("failed at {}: {} ({})", failure.step, failure.title, failure.error);
    }
    if report.skipped() > 0 {
        println!("{} item(s) not attempted", report.skipped());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsweep_protocols::{ElementSnapshot, NodeRef, Rect};

    fn items(titles: &[&str]) -> Vec<SelectableItem> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                SelectableItem::from_snapshot(&ElementSnapshot {
                    node: NodeRef::new(format!("cs-{}", i)),
                    title: title.to_string(),
                    id_attribute: None,
                    rect: Rect::default(),
                })
            })
            .collect()
    }

    fn target(pattern: Option<&str>, all: bool) -> TargetArgs {
        TargetArgs {
            pattern: pattern.map(str::to_string),
            all,
            yes: false,
        }
    }

    #[test]
    fn test_select_by_pattern_keeps_order() {
        let chosen = select_targets(
            items(&["Draft one", "Trip planning", "draft two", "Draft three"]),
            &target(Some("(?i)^draft"), false),
        )
        .unwrap();
        let titles: Vec<_> = chosen.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Draft one", "draft two", "Draft three"]);
    }

    #[test]
    fn test_select_all() {
        let chosen = select_targets(items(&["a", "b"]), &target(None, true)).unwrap();
        assert_eq!(chosen.len(), 2);
    }

    #[test]
    fn test_select_requires_a_filter() {
        assert!(select_targets(items(&["a"]), &target(None, false)).is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(select_targets(items(&["a"]), &target(Some("("), false)).is_err());
    }
}
