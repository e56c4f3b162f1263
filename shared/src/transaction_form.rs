//! Add/edit transaction modal: session context, lifecycle and form draft.

use std::collections::BTreeMap;

use crate::{ApiError, Endpoints, NamedRef, TransactionFormData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit { id: String },
}

impl ModalMode {
    pub fn title(&self) -> &'static str {
        match self {
            ModalMode::Add => "Add transaction",
            ModalMode::Edit { .. } => "Edit transaction",
        }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            ModalMode::Add => None,
            ModalMode::Edit { id } => Some(id.as_str()),
        }
    }

    pub fn form_data_path(&self, endpoints: &Endpoints) -> String {
        endpoints.transaction_form_data(self.transaction_id())
    }

    pub fn save_target(&self, endpoints: &Endpoints) -> SaveTarget {
        match self {
            ModalMode::Add => SaveTarget { method: SaveMethod::Post, path: endpoints.transactions() },
            ModalMode::Edit { id } => SaveTarget { method: SaveMethod::Put, path: endpoints.transaction(id) },
        }
    }
}

/// Everything one opening of the modal needs to know.
///
/// `generation` grows with every opening so a late response for an earlier
/// session can be told apart from the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSession {
    pub mode: ModalMode,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMethod {
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub method: SaveMethod,
    pub path: String,
}

/// Editable values of the transaction form, one string per named field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub date: String,
    pub account_id: String,
    pub payee_name: String,
    pub category_id: String,
    pub memo: String,
    pub amount: String,
}

/// Named form fields, in the order they appear
pub const FIELD_NAMES: [&str; 6] = ["date", "account_id", "payee_name", "category_id", "memo", "amount"];

impl TransactionDraft {
    pub fn from_form_data(data: &TransactionFormData) -> Self {
        Self {
            date: data.date.clone().unwrap_or_default(),
            account_id: data.account_id.clone().unwrap_or_default(),
            payee_name: data.payee_name.clone().unwrap_or_default(),
            category_id: data.category_id.clone().unwrap_or_default(),
            memo: data.memo.clone().unwrap_or_default(),
            amount: data.amount.map(|a| a.to_string()).unwrap_or_default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "date" => Some(&self.date),
            "account_id" => Some(&self.account_id),
            "payee_name" => Some(&self.payee_name),
            "category_id" => Some(&self.category_id),
            "memo" => Some(&self.memo),
            "amount" => Some(&self.amount),
            _ => None,
        }
    }

    /// Update a named field; unknown names are ignored
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "date" => self.date = value,
            "account_id" => self.account_id = value,
            "payee_name" => self.payee_name = value,
            "category_id" => self.category_id = value,
            "memo" => self.memo = value,
            "amount" => self.amount = value,
            _ => {}
        }
    }

    /// Same constraints the form's inputs declare
    pub fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [("date", &self.date), ("account", &self.account_id), ("payee", &self.payee_name)] {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!("{} is required", field)));
            }
        }
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(ApiError::Validation("amount is required".to_string()));
        }
        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(()),
            Ok(_) => Err(ApiError::Validation("amount must be zero or more".to_string())),
            Err(_) => Err(ApiError::Validation(format!("'{}' is not a number", amount))),
        }
    }

    /// Flat field-name to value mapping sent as the JSON body
    pub fn to_payload(&self) -> BTreeMap<String, String> {
        FIELD_NAMES
            .iter()
            .map(|name| (name.to_string(), self.get(name).unwrap_or_default().to_string()))
            .collect()
    }
}

/// The loaded form: reference lists plus the values being edited
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedForm {
    pub accounts: Vec<NamedRef>,
    pub payees: Vec<NamedRef>,
    pub categories: Vec<NamedRef>,
    pub draft: TransactionDraft,
}

impl From<TransactionFormData> for LoadedForm {
    fn from(data: TransactionFormData) -> Self {
        let draft = TransactionDraft::from_form_data(&data);
        Self {
            accounts: data.accounts,
            payees: data.payees,
            categories: data.categories,
            draft,
        }
    }
}

/// Modal lifecycle:
/// `Closed -> Loading -> Loaded | Failed`, `Loaded -> Submitting`,
/// `Submitting -> Closed` on success or back to `Loaded` on failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Loading,
    Loaded(LoadedForm),
    Failed(String),
    Submitting(LoadedForm),
}

impl ModalPhase {
    /// Opening from any phase starts a fresh load
    pub fn open(&mut self) {
        *self = ModalPhase::Loading;
    }

    pub fn loaded(&mut self, form: LoadedForm) {
        if matches!(self, ModalPhase::Loading) {
            *self = ModalPhase::Loaded(form);
        }
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        if matches!(self, ModalPhase::Loading) {
            *self = ModalPhase::Failed(message.into());
        }
    }

    /// Returns the form to submit, or `None` when no submission may start
    pub fn submit(&mut self) -> Option<LoadedForm> {
        match std::mem::take(self) {
            ModalPhase::Loaded(form) => {
                *self = ModalPhase::Submitting(form.clone());
                Some(form)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn submit_failed(&mut self) {
        *self = match std::mem::take(self) {
            ModalPhase::Submitting(form) => ModalPhase::Loaded(form),
            other => other,
        };
    }

    pub fn close(&mut self) {
        *self = ModalPhase::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalPhase::Closed)
    }

    pub fn form(&self) -> Option<&LoadedForm> {
        match self {
            ModalPhase::Loaded(form) | ModalPhase::Submitting(form) => Some(form),
            _ => None,
        }
    }

    pub fn edit_field(&mut self, field: &str, value: String) {
        if let ModalPhase::Loaded(form) = self {
            form.draft.set(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;

    fn endpoints() -> Endpoints {
        Endpoints::new(&AppConfig::from_values(None, Some("b"), None, None))
    }

    fn edit_data() -> TransactionFormData {
        serde_json::from_str(
            r#"{
                "date": "2024-02-10",
                "account_id": "acc-2",
                "payee_name": "Bakery",
                "category_id": "cat-3",
                "memo": "bread",
                "amount": 4.2,
                "accounts": [{"id": "acc-2", "name": "Cash"}],
                "payees": [{"id": "p", "name": "Bakery"}],
                "categories": [{"id": "cat-3", "name": "Food"}]
            }"#,
        )
        .unwrap()
    }

    fn valid_draft() -> TransactionDraft {
        TransactionDraft {
            date: "2024-02-10".to_string(),
            account_id: "acc-2".to_string(),
            payee_name: "Bakery".to_string(),
            category_id: String::new(),
            memo: String::new(),
            amount: "4.20".to_string(),
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(ModalMode::Add.title(), "Add transaction");
        assert_eq!(ModalMode::Edit { id: "1".to_string() }.title(), "Edit transaction");
    }

    #[test]
    fn test_edit_mode_populates_every_field() {
        let draft = TransactionDraft::from_form_data(&edit_data());
        assert_eq!(draft.date, "2024-02-10");
        assert_eq!(draft.account_id, "acc-2");
        assert_eq!(draft.payee_name, "Bakery");
        assert_eq!(draft.category_id, "cat-3");
        assert_eq!(draft.memo, "bread");
        assert_eq!(draft.amount, "4.2");
    }

    #[test]
    fn test_add_mode_keeps_only_server_defaults() {
        let data: TransactionFormData =
            serde_json::from_str(r#"{"accounts": [], "payees": [], "categories": [], "date": "2024-06-01"}"#).unwrap();
        let draft = TransactionDraft::from_form_data(&data);
        assert_eq!(draft, TransactionDraft { date: "2024-06-01".to_string(), ..Default::default() });
    }

    #[test]
    fn test_payload_contains_every_field_name() {
        let payload = valid_draft().to_payload();
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        let mut expected = FIELD_NAMES.to_vec();
        expected.sort();
        assert_eq!(keys, expected);
        assert_eq!(payload["category_id"], "");
        assert_eq!(payload["amount"], "4.20");
    }

    #[test]
    fn test_save_targets() {
        let endpoints = endpoints();
        assert_eq!(
            ModalMode::Add.save_target(&endpoints),
            SaveTarget { method: SaveMethod::Post, path: "/api/v1/budgets/b/transactions".to_string() }
        );
        assert_eq!(
            ModalMode::Edit { id: "t9".to_string() }.save_target(&endpoints),
            SaveTarget { method: SaveMethod::Put, path: "/api/v1/budgets/b/transactions/t9".to_string() }
        );
        assert_eq!(
            ModalMode::Edit { id: "t9".to_string() }.form_data_path(&endpoints),
            "/api/v1/budgets/b/transactions/t9/form-data"
        );
    }

    #[test]
    fn test_validation() {
        assert!(valid_draft().validate().is_ok());

        let mut draft = valid_draft();
        draft.payee_name = "  ".to_string();
        assert!(matches!(draft.validate(), Err(ApiError::Validation(_))));

        let mut draft = valid_draft();
        draft.amount = "-1".to_string();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.amount = "ten".to_string();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.amount = "0".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_phase_lifecycle() {
        let mut phase = ModalPhase::default();
        assert!(!phase.is_open());

        phase.open();
        assert_eq!(phase, ModalPhase::Loading);

        phase.loaded(LoadedForm::from(edit_data()));
        assert!(phase.form().is_some());

        let submitted = phase.submit().expect("loaded form can be submitted");
        assert_eq!(submitted.draft.memo, "bread");
        assert!(matches!(phase, ModalPhase::Submitting(_)));

        // A second save click while submitting sends nothing
        assert!(phase.submit().is_none());

        phase.submit_failed();
        assert!(matches!(phase, ModalPhase::Loaded(_)));

        phase.close();
        assert_eq!(phase, ModalPhase::Closed);
    }

    #[test]
    fn test_load_failure_and_stale_transitions() {
        let mut phase = ModalPhase::default();
        phase.loaded(LoadedForm::from(edit_data()));
        assert_eq!(phase, ModalPhase::Closed);

        phase.open();
        phase.failed("Failed to load data.");
        assert_eq!(phase, ModalPhase::Failed("Failed to load data.".to_string()));
        assert!(phase.submit().is_none());
        assert!(phase.is_open());
    }

    #[test]
    fn test_edits_only_apply_to_loaded_form() {
        let mut phase = ModalPhase::Loading;
        phase.edit_field("memo", "ignored".to_string());
        phase.loaded(LoadedForm::from(edit_data()));
        phase.edit_field("memo", "rye bread".to_string());
        phase.edit_field("unknown", "x".to_string());
        assert_eq!(phase.form().unwrap().draft.memo, "rye bread");
    }
}
