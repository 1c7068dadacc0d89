//! User-facing strings for the toolbar and prompts.

use chatsweep_config::Language;
use chatsweep_protocols::{CategoryGroup, ToolbarAction};

use crate::batch::{BatchAction, BatchReport};

/// Localized strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Messages {
    language: Language,
}

impl Messages {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.language {
            Language::En => "Select",
            Language::Zh => "多选",
        }
    }

    pub fn action_label(&self, action: ToolbarAction) -> &'static str {
        match (self.language, action) {
            (Language::En, ToolbarAction::Delete) => "Delete",
            (Language::En, ToolbarAction::Move) => "Move",
            (Language::En, ToolbarAction::Categorize) => "Categorize",
            (Language::En, ToolbarAction::SelectAll) => "Select all",
            (Language::En, ToolbarAction::SelectNone) => "Clear",
            (Language::En, ToolbarAction::Cancel) => "Cancel",
            (Language::En, ToolbarAction::Exit) => "Exit",
            (Language::Zh, ToolbarAction::Delete) => "删除",
            (Language::Zh, ToolbarAction::Move) => "移动",
            (Language::Zh, ToolbarAction::Categorize) => "智能分类",
            (Language::Zh, ToolbarAction::SelectAll) => "全选",
            (Language::Zh, ToolbarAction::SelectNone) => "清空",
            (Language::Zh, ToolbarAction::Cancel) => "取消",
            (Language::Zh, ToolbarAction::Exit) => "退出",
        }
    }

    pub fn selected_summary(&self, count: usize) -> String {
        match self.language {
            Language::En => format!("{} selected", count),
            Language::Zh => format!("已选择 {} 项", count),
        }
    }

    pub fn running_summary(&self, remaining: usize) -> String {
        match self.language {
            Language::En => format!("Working... {} left", remaining),
            Language::Zh => format!("处理中... 剩余 {} 项", remaining),
        }
    }

    pub fn confirm_batch(&self, action: &BatchAction, count: usize) -> String {
        match (self.language, action) {
            (Language::En, BatchAction::Delete) => {
                format!("Delete {} conversation(s)? This cannot be undone.", count)
            }
            (Language::En, BatchAction::Move { destination }) => {
                format!("Move {} conversation(s) to \"{}\"?", count, destination)
            }
            (Language::Zh, BatchAction::Delete) => {
                format!("确定删除 {} 个对话吗？此操作无法撤销。", count)
            }
            (Language::Zh, BatchAction::Move { destination }) => {
                format!("确定将 {} 个对话移动到「{}」吗？", count, destination)
            }
        }
    }

    pub fn ask_destination(&self) -> &'static str {
        match self.language {
            Language::En => "Move the selected conversations to which project?",
            Language::Zh => "将所选对话移动到哪个项目？",
        }
    }

    pub fn batch_finished(&self, report: &BatchReport) -> String {
        let failed = report.failures.len();
        match (self.language, report.cancelled) {
            (Language::En, false) => format!(
                "Done: {} of {} succeeded, {} failed.",
                report.succeeded, report.attempted, failed
            ),
            (Language::En, true) => format!(
                "Cancelled: {} of {} succeeded, {} failed.",
                report.succeeded, report.attempted, failed
            ),
            (Language::Zh, false) => format!(
                "完成：{} / {} 成功，{} 失败。",
                report.succeeded, report.attempted, failed
            ),
            (Language::Zh, true) => format!(
                "已取消：{} / {} 成功，{} 失败。",
                report.succeeded, report.attempted, failed
            ),
        }
    }

    pub fn no_suggestion(&self) -> &'static str {
        match self.language {
            Language::En => "No category suggestion available.",
            Language::Zh => "暂无分类建议。",
        }
    }

    pub fn suggestions(&self, groups: &[CategoryGroup]) -> String {
        let header = match self.language {
            Language::En => "Suggested categories:",
            Language::Zh => "分类建议：",
        };
        let mut out = header.to_string();
        for group in groups {
            out.push_str(&format!("\n- {} ({})", group.category, group.titles.len()));
            for title in &group.titles {
                out.push_str(&format!("\n    {}", title));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_includes_count() {
        let en = Messages::new(Language::En);
        assert!(en.confirm_batch(&BatchAction::Delete, 7).contains('7'));
        let zh = Messages::new(Language::Zh);
        let text = zh.confirm_batch(
            &BatchAction::Move {
                destination: "Work".to_string(),
            },
            3,
        );
        assert!(text.contains('3'));
        assert!(text.contains("Work"));
    }

    #[test]
    fn test_labels_differ_by_language() {
        let en = Messages::new(Language::En);
        let zh = Messages::new(Language::Zh);
        assert_ne!(
            en.action_label(ToolbarAction::Delete),
            zh.action_label(ToolbarAction::Delete)
        );
        assert_eq!(en.toggle_label(), "Select");
    }

    #[test]
    fn test_suggestions_listing() {
        let text = Messages::default().suggestions(&[CategoryGroup {
            category: "Travel".to_string(),
            titles: vec!["Trip planning".to_string()],
        }]);
        assert!(text.contains("Travel (1)"));
        assert!(text.contains("Trip planning"));
    }
}
