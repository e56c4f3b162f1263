use crate::{ApiError, AppConfig, AssignedTarget, ResourceRef};

/// Paths of every backend resource the pages talk to
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    api_base: String,
    root: String,
}

fn query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

impl Endpoints {
    pub fn new(config: &AppConfig) -> Self {
        let api_base = config.api_base.trim_end_matches('/').to_string();
        let root = if config.budget_id.is_empty() {
            api_base.clone()
        } else {
            format!("{}/budgets/{}", api_base, config.budget_id)
        };
        Self { api_base, root }
    }

    /// Status probe served next to the budget routes: `{"status":"OK","database":...}`
    pub fn status(&self) -> String {
        format!("{}/status", self.api_base)
    }

    pub fn categories(&self) -> String {
        format!("{}/categories", self.root)
    }

    pub fn categories_by_name(&self, category_name: &str) -> String {
        format!("{}?{}", self.categories(), query(&[("category_name", category_name)]))
    }

    pub fn category(&self, id: &str) -> String {
        format!("{}/categories/{}", self.root, urlencoding::encode(id))
    }

    pub fn budgets_for_month(&self, category_name: &str, year: i32, month: u32) -> String {
        format!(
            "{}/budgets?{}",
            self.root,
            query(&[
                ("category_name", category_name),
                ("year", &year.to_string()),
                ("month", &month.to_string()),
            ])
        )
    }

    pub fn budget(&self, id: &str) -> String {
        format!("{}/budgets/{}", self.root, urlencoding::encode(id))
    }

    /// Lookup to run before an assigned amount can be sent, if the strategy needs one
    pub fn assigned_lookup(
        &self,
        target: AssignedTarget,
        category_name: &str,
        year: i32,
        month: u32,
    ) -> Option<AssignedLookup> {
        match target {
            AssignedTarget::Direct => None,
            AssignedTarget::ByCategoryName => Some(AssignedLookup {
                url: self.categories_by_name(category_name),
                label: format!("Category \"{}\"", category_name),
            }),
            AssignedTarget::MonthlyBudget => Some(AssignedLookup {
                url: self.budgets_for_month(category_name, year, month),
                label: format!("Budget for \"{}\" in {}-{:02}", category_name, year, month),
            }),
        }
    }

    /// Where the PATCH goes once the resource id is known
    pub fn assigned_update(&self, target: AssignedTarget, id: &str) -> String {
        match target {
            AssignedTarget::Direct | AssignedTarget::ByCategoryName => self.category(id),
            AssignedTarget::MonthlyBudget => self.budget(id),
        }
    }

    /// Transaction list with related names expanded for the table
    pub fn transactions_expanded(&self) -> String {
        format!("{}?{}", self.transactions(), query(&[("expand", "account,payee,category")]))
    }

    pub fn transactions(&self) -> String {
        format!("{}/transactions", self.root)
    }

    pub fn transaction(&self, id: &str) -> String {
        format!("{}/transactions/{}", self.root, urlencoding::encode(id))
    }

    /// `None` asks for add-mode defaults, `Some(id)` for an existing transaction
    pub fn transaction_form_data(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/form-data", self.transaction(id)),
            None => format!("{}/transactions/form-data", self.root),
        }
    }
}

/// A `GET` whose first match names the resource to update
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedLookup {
    pub url: String,
    /// What was looked up, for the not-found message
    pub label: String,
}

impl AssignedLookup {
    /// Pick the id out of the lookup response; no match is `NotFound`
    pub fn resolve(&self, matches: Vec<ResourceRef>) -> Result<String, ApiError> {
        matches
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| ApiError::NotFound(self.label.clone()))
    }
}
