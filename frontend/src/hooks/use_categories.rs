use std::rc::Rc;

use shared::budget::{clamp_assigned, CategoryBoard};
use shared::inflight::InFlightTracker;
use shared::{AssignedUpdateResponse, Category};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_notifications::use_notifications;
use crate::services::api::ApiClient;
use crate::services::Logger;

const COMPONENT: &str = "CategoryEditor";

pub enum CategoryAction {
    Loaded(Vec<Category>),
    Draft { id: String, value: f64 },
    Updated { id: String, sent: f64, response: AssignedUpdateResponse },
}

/// Reducer wrapper so concurrent responses always apply to the latest board
#[derive(Default, PartialEq)]
pub struct CategoryStore {
    pub board: CategoryBoard,
}

impl Reducible for CategoryStore {
    type Action = CategoryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut board = self.board.clone();
        match action {
            CategoryAction::Loaded(categories) => board = CategoryBoard::new(categories),
            CategoryAction::Draft { id, value } => board.set_draft(&id, value),
            CategoryAction::Updated { id, sent, response } => board.apply_update(&id, sent, &response),
        }
        Rc::new(CategoryStore { board })
    }
}

/// A change event on one category's assigned input
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedEdit {
    pub id: String,
    pub name: String,
    pub raw: String,
}

#[derive(Clone)]
pub struct CategoriesState {
    pub board: CategoryBoard,
    pub loading: bool,
    pub load_error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseCategoriesActions {
    pub refresh_categories: Callback<()>,
    pub update_assigned: Callback<AssignedEdit>,
}

pub struct UseCategoriesResult {
    pub state: CategoriesState,
    pub actions: UseCategoriesActions,
}

pub fn failure_message(category_name: &str, error: &impl std::fmt::Display) -> String {
    format!("Error processing category \"{}\": {}", category_name, error)
}

#[hook]
pub fn use_categories(api_client: &ApiClient) -> UseCategoriesResult {
    let store = use_reducer(CategoryStore::default);
    let loading = use_state(|| true);
    let load_error = use_state(|| Option::<String>::None);
    let tracker = use_mut_ref(InFlightTracker::default);
    let notifier = use_notifications();

    let refresh_categories = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let loading = loading.clone();
        let load_error = load_error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.get_categories().await {
                    Ok(categories) => {
                        Logger::debug_with_component(COMPONENT, &format!("Loaded {} categories", categories.len()));
                        load_error.set(None);
                        dispatcher.dispatch(CategoryAction::Loaded(categories));
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to fetch categories: {}", e));
                        load_error.set(Some(format!("Failed to load categories: {}", e)));
                    }
                }

                loading.set(false);
            });
        })
    };

    let update_assigned = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let tracker = tracker.clone();
        let notifier = notifier.clone();

        use_callback((), move |edit: AssignedEdit, _| {
            let value = match clamp_assigned(&edit.raw) {
                Ok(value) => value,
                Err(e) => {
                    notifier.error(failure_message(&edit.name, &e));
                    return;
                }
            };

            dispatcher.dispatch(CategoryAction::Draft { id: edit.id.clone(), value });
            let ticket = tracker.borrow_mut().begin(&format!("category:{}", edit.id));

            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let tracker = tracker.clone();
            let notifier = notifier.clone();

            spawn_local(async move {
                let result = api_client.update_assigned(&edit.id, &edit.name, value).await;

                if !tracker.borrow_mut().finish(&ticket) {
                    Logger::debug_with_component(
                        COMPONENT,
                        &format!("Ignoring superseded update for \"{}\"", edit.name),
                    );
                    return;
                }

                match result {
                    Ok(response) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("Assigned {:.2} to \"{}\"", value, edit.name),
                        );
                        dispatcher.dispatch(CategoryAction::Updated { id: edit.id, sent: value, response });
                    }
                    Err(e) => {
                        let line = format!("Update of \"{}\" failed: {}", edit.name, e);
                        if e.is_not_found() {
                            Logger::warn_with_component(COMPONENT, &line);
                        } else {
                            Logger::error_with_component(COMPONENT, &line);
                        }
                        notifier.error(failure_message(&edit.name, &e));
                    }
                }
            });
        })
    };

    // Load initial categories
    use_effect_with((), {
        let refresh_categories = refresh_categories.clone();
        move |_| {
            refresh_categories.emit(());
            || ()
        }
    });

    let state = CategoriesState {
        board: store.board.clone(),
        loading: *loading,
        load_error: (*load_error).clone(),
    };

    let actions = UseCategoriesActions {
        refresh_categories,
        update_assigned,
    };

    UseCategoriesResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ApiError;

    fn rent(assigned: f64) -> Category {
        Category {
            id: "c1".to_string(),
            name: "Rent".to_string(),
            group: Some("Bills".to_string()),
            assigned,
            activity: 0.0,
            available: assigned,
        }
    }

    #[test]
    fn test_failure_message_names_category() {
        let message = failure_message("Rent", &ApiError::Network("offline".to_string()));
        assert_eq!(message, "Error processing category \"Rent\": Network error: offline");
    }

    #[test]
    fn test_store_applies_draft_then_update() {
        let store = Rc::new(CategoryStore::default());
        let store = store.reduce(CategoryAction::Loaded(vec![rent(100.0)]));
        let store = store.reduce(CategoryAction::Draft { id: "c1".to_string(), value: 0.0 });
        assert_eq!(store.board.displayed_assigned("c1"), "0.00");

        let store = store.reduce(CategoryAction::Updated {
            id: "c1".to_string(),
            sent: 0.0,
            response: AssignedUpdateResponse::default(),
        });
        assert!(!store.board.has_draft("c1"));
        assert_eq!(store.board.find("c1").unwrap().assigned, 0.0);
    }
}
