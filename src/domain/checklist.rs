use crate::error::{BookingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single task on the moving checklist.
///
/// Items are created unchecked and are immutable afterwards except for the
/// `checked` flag, which toggles as the user works through the list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ChecklistItem {
    pub id: u32,
    pub name: String,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
}

impl ChecklistItem {
    /// Creates an unchecked item. The name must be non-empty after trimming.
    pub fn new(id: u32, name: &str, priority: Priority) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookingError::ValidationError(
                "Checklist item name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            checked: false,
            created_at: Utc::now(),
            priority,
        })
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

/// Read-only projection of one checklist item for display and persistence.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ChecklistEntry {
    pub name: String,
    pub checked: bool,
    pub priority: Priority,
}

/// Read-only summary of the checklist attached to an outgoing booking.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ChecklistSummary {
    pub items: Vec<ChecklistEntry>,
    pub completion_ratio: f64,
}

/// Projects the checklist into a summary without touching its state.
///
/// An empty list counts as fully complete.
pub fn summarize(items: &[ChecklistItem]) -> ChecklistSummary {
    let entries: Vec<ChecklistEntry> = items
        .iter()
        .map(|item| ChecklistEntry {
            name: item.name.clone(),
            checked: item.checked,
            priority: item.priority,
        })
        .collect();

    let completion_ratio = if entries.is_empty() {
        1.0
    } else {
        let checked = entries.iter().filter(|e| e.checked).count();
        checked as f64 / entries.len() as f64
    };

    ChecklistSummary {
        items: entries,
        completion_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_unchecked() {
        let item = ChecklistItem::new(1, "Pack kitchen", Priority::High).unwrap();
        assert!(!item.checked);
        assert_eq!(item.name, "Pack kitchen");
    }

    #[test]
    fn test_new_item_trims_name() {
        let item = ChecklistItem::new(1, "  Label boxes  ", Priority::Low).unwrap();
        assert_eq!(item.name, "Label boxes");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(ChecklistItem::new(1, "   ", Priority::Medium).is_err());
    }

    #[test]
    fn test_toggle() {
        let mut item = ChecklistItem::new(1, "Defrost fridge", Priority::Medium).unwrap();
        item.toggle();
        assert!(item.checked);
        item.toggle();
        assert!(!item.checked);
    }

    #[test]
    fn test_completion_ratio_half() {
        let mut items = vec![
            ChecklistItem::new(1, "Pack kitchen", Priority::High).unwrap(),
            ChecklistItem::new(2, "Label boxes", Priority::Low).unwrap(),
        ];
        items[0].toggle();

        let summary = summarize(&items);
        assert_eq!(summary.completion_ratio, 0.5);
        assert_eq!(summary.items.len(), 2);
        assert!(summary.items[0].checked);
        assert!(!summary.items[1].checked);
    }

    #[test]
    fn test_empty_list_is_complete() {
        let summary = summarize(&[]);
        assert_eq!(summary.completion_ratio, 1.0);
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_summarize_does_not_mutate() {
        let items = vec![ChecklistItem::new(1, "Pack kitchen", Priority::High).unwrap()];
        let before = items.clone();
        let _ = summarize(&items);
        assert_eq!(items, before);
    }
}
