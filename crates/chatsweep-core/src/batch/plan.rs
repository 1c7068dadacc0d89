//! Step sequences for each batch action.

use std::time::Duration;

use chatsweep_config::{PlatformDescriptor, TimingsConfig};
use chatsweep_protocols::{BatchError, ControlSnapshot};
use serde::Serialize;

/// What to do with every selected row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BatchAction {
    Delete,
    Move { destination: String },
}

impl BatchAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Move { .. } => "move",
        }
    }
}

/// Named stage of the per-item interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    OpenMenu,
    ChooseAction,
    ChooseDestination,
    Confirm,
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OpenMenu => "open-menu",
            Self::ChooseAction => "choose-action",
            Self::ChooseDestination => "choose-destination",
            Self::Confirm => "confirm",
        };
        f.write_str(name)
    }
}

/// How a step finds the control it activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Inside the row's own subtree.
    WithinItem { selector: String, hover_first: bool },
    /// Anywhere in the document, among visible controls matching
    /// `selector`, by case-insensitive visible text.
    VisibleText { selector: String, labels: Vec<String> },
}

impl Locator {
    pub fn describe(&self) -> String {
        match self {
            Self::WithinItem { selector, .. } => selector.clone(),
            Self::VisibleText { selector, labels } => format!("{} ~ {:?}", selector, labels),
        }
    }
}

/// One click in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: StepName,
    pub locator: Locator,
    /// Wait after activating, before the next step looks for its control.
    pub settle: Duration,
    /// A missing optional control is skipped instead of failing the item.
    pub required: bool,
}

/// The complete per-item sequence for one action on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    pub action: BatchAction,
    pub steps: Vec<Step>,
    /// Wait after each item so the host finishes re-rendering its list.
    pub item_settle: Duration,
}

impl ActionPlan {
    pub fn for_action(
        action: BatchAction,
        platform: &PlatformDescriptor,
        timings: &TimingsConfig,
    ) -> Result<Self, BatchError> {
        let open_menu = Step {
            name: StepName::OpenMenu,
            locator: Locator::WithinItem {
                selector: platform.menu_button_selector.clone(),
                hover_first: platform.hover_before_menu,
            },
            settle: timings.menu_settle(),
            required: true,
        };

        let steps = match &action {
            BatchAction::Delete => vec![
                open_menu,
                Step {
                    name: StepName::ChooseAction,
                    locator: Locator::VisibleText {
                        selector: platform.delete_action_selector.clone(),
                        labels: platform.delete_labels.clone(),
                    },
                    settle: timings.action_settle(),
                    required: true,
                },
                Step {
                    name: StepName::Confirm,
                    locator: Locator::VisibleText {
                        selector: platform.confirm_selector.clone(),
                        labels: platform.confirm_labels.clone(),
                    },
                    settle: Duration::ZERO,
                    required: false,
                },
            ],
            BatchAction::Move { destination } => {
                if platform.move_labels.is_empty() {
                    return Err(BatchError::Unsupported(format!(
                        "move on {}",
                        platform.name
                    )));
                }
                if destination.trim().is_empty() {
                    return Err(BatchError::Unsupported("move without destination".to_string()));
                }
                vec![
                    open_menu,
                    Step {
                        name: StepName::ChooseAction,
                        locator: Locator::VisibleText {
                            selector: platform.delete_action_selector.clone(),
                            labels: platform.move_labels.clone(),
                        },
                        settle: timings.action_settle(),
                        required: true,
                    },
                    Step {
                        name: StepName::ChooseDestination,
                        locator: Locator::VisibleText {
                            selector: platform.delete_action_selector.clone(),
                            labels: vec![destination.trim().to_string()],
                        },
                        settle: Duration::ZERO,
                        required: true,
                    },
                ]
            }
        };

        Ok(Self {
            action,
            steps,
            item_settle: timings.item_settle(),
        })
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pick the control whose visible text matches one of `labels`,
/// case-insensitively. Exact matches win over substring matches; ties go
/// to document order.
pub fn best_label_match<'a>(
    controls: &'a [ControlSnapshot],
    labels: &[String],
) -> Option<&'a ControlSnapshot> {
    let labels: Vec<String> = labels
        .iter()
        .map(|l| normalize(l))
        .filter(|l| !l.is_empty())
        .collect();
    if labels.is_empty() {
        return None;
    }

    let texts: Vec<String> = controls.iter().map(|c| normalize(&c.text)).collect();

    texts
        .iter()
        .position(|t| labels.iter().any(|l| t == l))
        .or_else(|| {
            texts
                .iter()
                .position(|t| labels.iter().any(|l| t.contains(l.as_str())))
        })
        .map(|i| &controls[i])
}
