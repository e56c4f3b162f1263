//! Category accordion state: assigned-amount edits and open panels.

use std::collections::HashMap;

use crate::{ApiError, AssignedUpdateResponse, Category};

/// Turn the raw text of an assigned input into the amount to send.
///
/// Negative amounts become zero. Anything that is not a number is rejected
/// before a request is made.
pub fn clamp_assigned(raw: &str) -> Result<f64, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("assigned amount is required".to_string()));
    }
    let value = trimmed
        .replacen(',', ".", 1)
        .parse::<f64>()
        .map_err(|_| ApiError::Validation(format!("'{}' is not a number", trimmed)))?;
    if !value.is_finite() {
        return Err(ApiError::Validation(format!("'{}' is not a number", trimmed)));
    }
    Ok(if value <= 0.0 { 0.0 } else { value })
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

const UNGROUPED: &str = "Other";

/// One collapsible panel of the accordion
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub panel_id: String,
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    pub fn total_assigned(&self) -> f64 {
        self.categories.iter().map(|c| c.assigned).sum()
    }

    pub fn total_available(&self) -> f64 {
        self.categories.iter().map(|c| c.available).sum()
    }
}

fn panel_id(index: usize, name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("collapse-{}-{}", index, slug.trim_matches('-'))
}

/// Group categories by group name in first-seen order
pub fn group_categories(categories: &[Category]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for category in categories {
        let name = category
            .group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(UNGROUPED);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.categories.push(category.clone()),
            None => {
                let index = groups.len();
                groups.push(CategoryGroup {
                    name: name.to_string(),
                    panel_id: panel_id(index, name),
                    categories: vec![category.clone()],
                });
            }
        }
    }
    groups
}

/// Which accordion panel is expanded; at most one at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccordionState {
    open: Option<String>,
}

impl AccordionState {
    pub fn toggle(&mut self, panel_id: &str) {
        if self.is_open(panel_id) {
            self.open = None;
        } else {
            self.open = Some(panel_id.to_string());
        }
    }

    pub fn is_open(&self, panel_id: &str) -> bool {
        self.open.as_deref() == Some(panel_id)
    }
}

/// Categories plus the values typed into their inputs.
///
/// A draft holds what the input shows between a change and the server's
/// answer. Success replaces it with the server's value; failure leaves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBoard {
    pub categories: Vec<Category>,
    drafts: HashMap<String, String>,
}

impl CategoryBoard {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories, drafts: HashMap::new() }
    }

    pub fn find(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Text the assigned input of `id` should display
    pub fn displayed_assigned(&self, id: &str) -> String {
        if let Some(draft) = self.drafts.get(id) {
            return draft.clone();
        }
        self.find(id).map(|c| format_amount(c.assigned)).unwrap_or_default()
    }

    pub fn set_draft(&mut self, id: &str, value: f64) {
        self.drafts.insert(id.to_string(), format_amount(value));
    }

    pub fn apply_update(&mut self, id: &str, sent: f64, response: &AssignedUpdateResponse) {
        if let Some(category) = self.categories.iter_mut().find(|c| c.id == id) {
            category.apply_update(sent, response);
        }
        self.drafts.remove(id);
    }

    pub fn has_draft(&self, id: &str) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn groups(&self) -> Vec<CategoryGroup> {
        group_categories(&self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str, group: Option<&str>, assigned: f64) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            group: group.map(str::to_string),
            assigned,
            activity: 0.0,
            available: assigned,
        }
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        assert_eq!(clamp_assigned("-15").unwrap(), 0.0);
        assert_eq!(clamp_assigned("-0.01").unwrap(), 0.0);
        assert_eq!(clamp_assigned("-0").unwrap(), 0.0);
        assert!(clamp_assigned("-0").unwrap().is_sign_positive());
    }

    #[test]
    fn test_non_negative_values_pass_through() {
        assert_eq!(clamp_assigned("0").unwrap(), 0.0);
        assert_eq!(clamp_assigned(" 125.5 ").unwrap(), 125.5);
        assert_eq!(clamp_assigned("7,25").unwrap(), 7.25);
    }

    #[test]
    fn test_non_numeric_input_is_a_validation_error() {
        assert!(matches!(clamp_assigned(""), Err(ApiError::Validation(_))));
        assert!(matches!(clamp_assigned("abc"), Err(ApiError::Validation(_))));
        assert!(matches!(clamp_assigned("inf"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let categories = vec![
            category("1", "Rent", Some("Bills"), 900.0),
            category("2", "Groceries", Some("Everyday"), 300.0),
            category("3", "Power", Some("Bills"), 80.0),
            category("4", "Misc", None, 10.0),
        ];
        let groups = group_categories(&categories);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Bills", "Everyday", "Other"]);
        assert_eq!(groups[0].categories.len(), 2);
        assert_eq!(groups[0].total_assigned(), 980.0);
        assert_eq!(groups[1].panel_id, "collapse-1-everyday");
    }

    #[test]
    fn test_accordion_keeps_one_panel_open() {
        let mut state = AccordionState::default();
        state.toggle("collapse-0-bills");
        assert!(state.is_open("collapse-0-bills"));

        state.toggle("collapse-1-everyday");
        assert!(!state.is_open("collapse-0-bills"));
        assert!(state.is_open("collapse-1-everyday"));

        state.toggle("collapse-1-everyday");
        assert_eq!(state, AccordionState::default());
    }

    #[test]
    fn test_failed_update_keeps_clamped_draft() {
        let mut board = CategoryBoard::new(vec![category("1", "Rent", None, 900.0)]);
        let sent = clamp_assigned("-20").unwrap();
        board.set_draft("1", sent);

        // No response arrives: the input keeps showing the clamped value,
        // not the value from before the edit.
        assert_eq!(board.displayed_assigned("1"), "0.00");
        assert_eq!(board.find("1").unwrap().assigned, 900.0);
    }

    #[test]
    fn test_successful_update_replaces_draft_with_server_value() {
        let mut board = CategoryBoard::new(vec![category("1", "Rent", None, 900.0)]);
        board.set_draft("1", 950.0);
        board.apply_update(
            "1",
            950.0,
            &AssignedUpdateResponse { assigned: Some(950.0), activity: None, available: None },
        );
        assert!(!board.has_draft("1"));
        assert_eq!(board.displayed_assigned("1"), "950.00");
    }
}
