use serde::{Deserialize, Serialize};

pub mod budget;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod inflight;
pub mod table;
pub mod transaction_form;

pub use config::{AppConfig, AssignedTarget, LogLevel};
pub use endpoints::{AssignedLookup, Endpoints};
pub use error::ApiError;

/// Lenient decoders for backend payloads.
///
/// The budget service serializes ids as either UUID strings or integers and
/// amounts as either JSON numbers or decimal strings, depending on the model.
pub mod wire {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    impl RawAmount {
        fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
            match self {
                RawAmount::Number(n) => Ok(n),
                RawAmount::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("invalid amount: {}", s))),
            }
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        })
    }

    pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<RawId>::deserialize(deserializer)? {
            Some(RawId::Text(s)) if s.is_empty() => None,
            Some(RawId::Text(s)) => Some(s),
            Some(RawId::Int(n)) => Some(n.to_string()),
            None => None,
        })
    }

    pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<RawAmount>::deserialize(deserializer)? {
            Some(raw) => raw.into_f64(),
            None => Ok(0.0),
        }
    }

    pub fn opt_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<RawAmount>::deserialize(deserializer)? {
            Some(raw) => raw.into_f64().map(Some),
            None => Ok(None),
        }
    }
}

/// A budget category as listed in the accordion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Display name of the category group the accordion is built from
    #[serde(default, alias = "category_group_name")]
    pub group: Option<String>,
    /// Amount allocated to the category (the backend calls it `budgeted`)
    #[serde(default, alias = "budgeted", deserialize_with = "wire::amount")]
    pub assigned: f64,
    #[serde(default, deserialize_with = "wire::amount")]
    pub activity: f64,
    #[serde(default, alias = "balance", deserialize_with = "wire::amount")]
    pub available: f64,
}

/// Response body of `PATCH /categories/{id}` and `PATCH /budgets/{id}`.
///
/// Every field is optional so a sparse response still decodes; missing values
/// are taken from the request that was sent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssignedUpdateResponse {
    #[serde(default, alias = "budgeted", deserialize_with = "wire::opt_amount")]
    pub assigned: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_amount")]
    pub activity: Option<f64>,
    #[serde(default, alias = "balance", deserialize_with = "wire::opt_amount")]
    pub available: Option<f64>,
}

impl Category {
    /// Fold a successful assigned-amount update into this category
    pub fn apply_update(&mut self, sent: f64, response: &AssignedUpdateResponse) {
        self.assigned = response.assigned.unwrap_or(sent);
        if let Some(activity) = response.activity {
            self.activity = activity;
        }
        match response.available {
            Some(available) => self.available = available,
            None => {
                // available = assigned + activity on the backend
                self.available = self.assigned + self.activity;
            }
        }
    }
}

/// Request body for assigned-amount updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedUpdateRequest {
    pub assigned: f64,
}

/// Minimal view of a lookup result: only the id is needed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
}

/// Reference list entry used to populate selects and datalists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Body of `GET /transactions/form-data` and `GET /transactions/{id}/form-data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionFormData {
    #[serde(default)]
    pub accounts: Vec<NamedRef>,
    #[serde(default)]
    pub payees: Vec<NamedRef>,
    #[serde(default)]
    pub categories: Vec<NamedRef>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub account_id: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_amount")]
    pub amount: Option<f64>,
}

/// Related entity embedded when the list is requested with `expand=`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpandedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// One transaction as returned by `GET /transactions`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRecord {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "wire::amount")]
    pub amount: f64,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub account: Option<ExpandedRef>,
    #[serde(default)]
    pub payee: Option<ExpandedRef>,
    #[serde(default)]
    pub category: Option<ExpandedRef>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

fn label(flat: &Option<String>, expanded: &Option<ExpandedRef>) -> String {
    flat.clone()
        .or_else(|| expanded.as_ref().and_then(|e| e.name.clone()))
        .unwrap_or_default()
}

impl TransactionRecord {
    pub const HEADINGS: [&'static str; 6] = ["Date", "Account", "Payee", "Category", "Note", "Amount"];

    pub fn account_label(&self) -> String {
        label(&self.account_name, &self.account)
    }

    pub fn payee_label(&self) -> String {
        label(&self.payee_name, &self.payee)
    }

    pub fn category_label(&self) -> String {
        label(&self.category_name, &self.category)
    }

    /// Cell texts in heading order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.account_label(),
            self.payee_label(),
            self.category_label(),
            self.memo.clone().unwrap_or_default(),
            format!("{:.2}", self.amount),
        ]
    }
}

/// Error envelope used by the backend: `{"status": "error", "message": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET {api_base}/status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    /// `"OK"` or `"ERROR: <reason>"`; older servers leave it out
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn database_ok(&self) -> bool {
        self.database
            .as_deref()
            .map_or(true, |db| db.trim().eq_ignore_ascii_case("ok"))
    }

    /// Footer text for a server that answered the status probe
    pub fn summary(&self, api_base: &str) -> String {
        match self.database.as_deref() {
            Some(db) if !self.database_ok() => format!("Connected to {} (database: {})", api_base, db.trim()),
            _ => format!("Connected to {}", api_base),
        }
    }
}
