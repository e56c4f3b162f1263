use shared::inflight::PendingDelete;
use shared::TransactionRecord;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_notifications::use_notifications;
use crate::services::api::ApiClient;
use crate::services::Logger;

const COMPONENT: &str = "TransactionTable";

#[derive(Clone)]
pub struct TransactionState {
    pub records: Vec<TransactionRecord>,
    pub loading: bool,
    pub load_error: Option<String>,

    // Delete confirmation state
    pub confirm_delete_open: bool,
    pub deleting: bool,
}

pub struct UseTransactionsResult {
    pub state: TransactionState,
    pub actions: UseTransactionsActions,
}

#[derive(Clone)]
pub struct UseTransactionsActions {
    pub refresh_transactions: Callback<()>,
    pub request_delete: Callback<String>,
    pub confirm_delete: Callback<()>,
    pub cancel_delete: Callback<()>,
}

#[hook]
pub fn use_transactions(api_client: &ApiClient) -> UseTransactionsResult {
    let records = use_state(Vec::<TransactionRecord>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);

    // Taken synchronously on confirm so one click sends at most one DELETE
    let pending_delete = use_mut_ref(PendingDelete::default);
    let confirm_delete_open = use_state(|| false);
    let deleting = use_state(|| false);
    let notifier = use_notifications();

    let refresh_transactions = {
        let api_client = api_client.clone();
        let records = records.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let records = records.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.get_transactions().await {
                    Ok(data) => {
                        Logger::debug_with_component(COMPONENT, &format!("Loaded {} transactions", data.len()));
                        load_error.set(None);
                        records.set(data);
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to fetch transactions: {}", e));
                        load_error.set(Some(format!("Failed to load transactions: {}", e)));
                    }
                }

                loading.set(false);
            });
        })
    };

    let request_delete = {
        let pending_delete = pending_delete.clone();
        let confirm_delete_open = confirm_delete_open.clone();
        use_callback((), move |id: String, _| {
            pending_delete.borrow_mut().request(id);
            confirm_delete_open.set(true);
        })
    };

    let cancel_delete = {
        let pending_delete = pending_delete.clone();
        let confirm_delete_open = confirm_delete_open.clone();
        use_callback((), move |_, _| {
            pending_delete.borrow_mut().cancel();
            confirm_delete_open.set(false);
        })
    };

    let confirm_delete = {
        let api_client = api_client.clone();
        let pending_delete = pending_delete.clone();
        let confirm_delete_open = confirm_delete_open.clone();
        let deleting = deleting.clone();
        let refresh_transactions = refresh_transactions.clone();
        let notifier = notifier.clone();

        use_callback((), move |_, _| {
            let Some(id) = pending_delete.borrow_mut().confirm() else {
                return;
            };

            let api_client = api_client.clone();
            let confirm_delete_open = confirm_delete_open.clone();
            let deleting = deleting.clone();
            let refresh_transactions = refresh_transactions.clone();
            let notifier = notifier.clone();

            spawn_local(async move {
                deleting.set(true);

                match api_client.delete_transaction(&id).await {
                    Ok(()) => {
                        Logger::info_with_component(COMPONENT, &format!("Deleted transaction {}", id));
                        notifier.success("Transaction deleted.");
                        refresh_transactions.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Error deleting transaction {}: {}", id, e));
                        notifier.error(format!("Failed to delete transaction: {}", e));
                    }
                }

                deleting.set(false);
                confirm_delete_open.set(false);
            });
        })
    };

    // Load initial transactions
    use_effect_with((), {
        let refresh_transactions = refresh_transactions.clone();
        move |_| {
            refresh_transactions.emit(());
            || ()
        }
    });

    let state = TransactionState {
        records: (*records).clone(),
        loading: *loading,
        load_error: (*load_error).clone(),
        confirm_delete_open: *confirm_delete_open,
        deleting: *deleting,
    };

    let actions = UseTransactionsActions {
        refresh_transactions,
        request_delete,
        confirm_delete,
        cancel_delete,
    };

    UseTransactionsResult { state, actions }
}
