use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::transaction_form::{ModalMode, SaveMethod, TransactionDraft};
use shared::{
    ApiError, AppConfig, AssignedLookup, AssignedTarget, AssignedUpdateRequest, AssignedUpdateResponse,
    Category, Endpoints, HealthStatus, ResourceRef, TransactionFormData, TransactionRecord,
};

use crate::services::date_utils::current_year_month;

/// API client for communicating with the budget backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    endpoints: Endpoints,
    assigned_target: AssignedTarget,
}

fn network_error(e: gloo::net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Turn a non-2xx response into an error carrying the backend's message
async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_ok(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoints: Endpoints::new(config),
            assigned_target: config.assigned_target,
        }
    }

    /// Test connection to the backend and read its database status
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = Request::get(&self.endpoints.status())
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = Request::get(&self.endpoints.categories())
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    /// Run a strategy's lookup; an empty result is `NotFound`
    async fn resolve_lookup(&self, lookup: &AssignedLookup) -> Result<String, ApiError> {
        let response = Request::get(&lookup.url).send().await.map_err(network_error)?;
        let matches: Vec<ResourceRef> = read_json(response).await?;
        lookup.resolve(matches)
    }

    async fn patch_assigned(&self, url: &str, assigned: f64) -> Result<AssignedUpdateResponse, ApiError> {
        let response = Request::patch(url)
            .json(&AssignedUpdateRequest { assigned })
            .map_err(|e| ApiError::Validation(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        let response = ensure_ok(response).await?;
        let body = response.text().await.unwrap_or_default();
        // A body that is not a category still means the update went through
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// Update a category's assigned amount using the configured lookup strategy
    pub async fn update_assigned(
        &self,
        category_id: &str,
        category_name: &str,
        assigned: f64,
    ) -> Result<AssignedUpdateResponse, ApiError> {
        let (year, month) = current_year_month();
        let id = match self
            .endpoints
            .assigned_lookup(self.assigned_target, category_name, year, month)
        {
            Some(lookup) => self.resolve_lookup(&lookup).await?,
            None => category_id.to_string(),
        };
        let url = self.endpoints.assigned_update(self.assigned_target, &id);
        self.patch_assigned(&url, assigned).await
    }

    /// Transactions for the table, newest first
    pub async fn get_transactions(&self) -> Result<Vec<TransactionRecord>, ApiError> {
        let response = Request::get(&self.endpoints.transactions_expanded())
            .send()
            .await
            .map_err(network_error)?;
        let mut records: Vec<TransactionRecord> = read_json(response).await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    pub async fn get_transaction_form_data(&self, mode: &ModalMode) -> Result<TransactionFormData, ApiError> {
        let response = Request::get(&mode.form_data_path(&self.endpoints))
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    /// POST a new transaction or PUT an edited one, depending on `mode`
    pub async fn save_transaction(&self, mode: &ModalMode, draft: &TransactionDraft) -> Result<(), ApiError> {
        let target = mode.save_target(&self.endpoints);
        let builder = match target.method {
            SaveMethod::Post => Request::post(&target.path),
            SaveMethod::Put => Request::put(&target.path),
        };
        let response = builder
            .json(&draft.to_payload())
            .map_err(|e| ApiError::Validation(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        ensure_ok(response).await.map(|_| ())
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        let response = Request::delete(&self.endpoints.transaction(id))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(network_error)?;
        ensure_ok(response).await.map(|_| ())
    }
}
