//! Built-in platform descriptor tables.
//!
//! Third-party markup changes without notice; every selector here is a
//! best-effort default meant to be overridden from `[[platforms]]`.

use crate::schema::{
    PlatformDescriptor, default_confirm_labels, default_delete_labels, default_move_labels,
};

/// The platforms known out of the box.
pub fn builtin_platforms() -> Vec<PlatformDescriptor> {
    vec![
        PlatformDescriptor {
            name: "chatgpt".to_string(),
            hosts: vec!["chatgpt.com".to_string(), "chat.openai.com".to_string()],
            container_selector: "nav".to_string(),
            item_selector: "nav a[href^=\"/c/\"]".to_string(),
            title_selector: ".truncate, span".to_string(),
            menu_button_selector: "button[data-testid$=\"-options\"], button[aria-haspopup=\"menu\"]"
                .to_string(),
            delete_action_selector: "[role=\"menuitem\"]".to_string(),
            confirm_selector: "[data-testid=\"delete-conversation-confirm-button\"], [role=\"dialog\"] button"
                .to_string(),
            id_attribute: Some("href".to_string()),
            delete_labels: default_delete_labels(),
            confirm_labels: default_confirm_labels(),
            move_labels: default_move_labels(),
            hover_before_menu: true,
        },
        PlatformDescriptor {
            name: "claude".to_string(),
            hosts: vec!["claude.ai".to_string()],
            container_selector: "nav".to_string(),
            item_selector: "a[href^=\"/chat/\"]".to_string(),
            title_selector: "span".to_string(),
            menu_button_selector: "button[aria-haspopup=\"menu\"]".to_string(),
            delete_action_selector: "[role=\"menuitem\"]".to_string(),
            confirm_selector: "[role=\"dialog\"] button".to_string(),
            id_attribute: Some("href".to_string()),
            delete_labels: default_delete_labels(),
            confirm_labels: default_confirm_labels(),
            move_labels: default_move_labels(),
            hover_before_menu: true,
        },
        PlatformDescriptor {
            name: "gemini".to_string(),
            hosts: vec!["gemini.google.com".to_string()],
            container_selector: "conversations-list".to_string(),
            item_selector: "div[data-test-id=\"conversation\"]".to_string(),
            title_selector: ".conversation-title".to_string(),
            menu_button_selector: "button[data-test-id=\"actions-menu-button\"]".to_string(),
            delete_action_selector: "[role=\"menuitem\"], button.mat-mdc-menu-item".to_string(),
            confirm_selector: "button[data-test-id=\"confirm-button\"], mat-dialog-actions button"
                .to_string(),
            id_attribute: None,
            delete_labels: default_delete_labels(),
            confirm_labels: default_confirm_labels(),
            move_labels: default_move_labels(),
            hover_before_menu: true,
        },
        PlatformDescriptor {
            name: "deepseek".to_string(),
            hosts: vec!["chat.deepseek.com".to_string()],
            container_selector: "nav, aside".to_string(),
            item_selector: "a[href^=\"/a/chat/s/\"]".to_string(),
            title_selector: "div".to_string(),
            menu_button_selector: "div[tabindex=\"0\"], button".to_string(),
            delete_action_selector: "[role=\"menuitem\"], .ds-dropdown-menu-option".to_string(),
            confirm_selector: "[role=\"dialog\"] button, .ds-modal button".to_string(),
            id_attribute: Some("href".to_string()),
            delete_labels: default_delete_labels(),
            confirm_labels: default_confirm_labels(),
            move_labels: default_move_labels(),
            hover_before_menu: true,
        },
    ]
}

/// Apply overrides: an override with an existing name replaces that entry
/// in place, any other override is appended.
pub fn merge_platforms(
    mut base: Vec<PlatformDescriptor>,
    overrides: &[PlatformDescriptor],
) -> Vec<PlatformDescriptor> {
    for platform in overrides {
        match base.iter_mut().find(|p| p.name == platform.name) {
            Some(existing) => *existing = platform.clone(),
            None => base.push(platform.clone()),
        }
    }
    base
}
