use yew::prelude::*;

use super::category_accordion::CategoryAccordion;
use crate::hooks::use_categories::use_categories;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct BudgetPageProps {
    pub api_client: ApiClient,
}

#[function_component(BudgetPage)]
pub fn budget_page(props: &BudgetPageProps) -> Html {
    let categories = use_categories(&props.api_client);
    let state = &categories.state;

    let on_retry = categories.actions.refresh_categories.reform(|_: MouseEvent| ());

    html! {
        <section class="budget-section">
            <div class="section-header">
                <h2>{"Budget"}</h2>
                <div class="column-labels">
                    <span>{"Assigned"}</span>
                    <span>{"Activity"}</span>
                    <span>{"Available"}</span>
                </div>
            </div>

            {if state.loading && state.board.categories.is_empty() {
                html! { <div class="loading">{"Loading categories..."}</div> }
            } else if let Some(error) = state.load_error.as_ref() {
                html! {
                    <div class="form-message error">
                        {error}
                        <button type="button" class="btn btn-secondary" onclick={on_retry}>{"Retry"}</button>
                    </div>
                }
            } else {
                html! {
                    <CategoryAccordion
                        board={state.board.clone()}
                        on_assigned_change={categories.actions.update_assigned.clone()}
                    />
                }
            }}
        </section>
    }
}
