use shared::transaction_form::{ModalMode, ModalSession};
use yew::prelude::*;

use super::{DeleteConfirmModal, TransactionModal, TransactionTable};
use crate::hooks::use_transactions::use_transactions;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub api_client: ApiClient,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let transactions = use_transactions(&props.api_client);
    let state = &transactions.state;
    let actions = &transactions.actions;

    let session = use_state(|| None::<ModalSession>);
    let next_generation = use_mut_ref(|| 0_u64);

    let open_modal = {
        let session = session.clone();
        let next_generation = next_generation.clone();
        Callback::from(move |mode: ModalMode| {
            let generation = {
                let mut next = next_generation.borrow_mut();
                *next += 1;
                *next
            };
            session.set(Some(ModalSession { mode, generation }));
        })
    };

    let on_add = open_modal.reform(|_: MouseEvent| ModalMode::Add);
    let on_edit = open_modal.reform(|id: String| ModalMode::Edit { id });

    let on_close = {
        let session = session.clone();
        Callback::from(move |_| session.set(None))
    };

    let on_saved = {
        let session = session.clone();
        let refresh_transactions = actions.refresh_transactions.clone();
        Callback::from(move |_| {
            session.set(None);
            refresh_transactions.emit(());
        })
    };

    let on_retry = actions.refresh_transactions.reform(|_: MouseEvent| ());

    html! {
        <section class="transactions-section">
            <div class="section-header">
                <h2>{"Transactions"}</h2>
                <button type="button" class="btn btn-primary" id="addTransaction" onclick={on_add}>
                    {"Add transaction"}
                </button>
            </div>

            {if let Some(error) = state.load_error.as_ref() {
                html! {
                    <div class="form-message error">
                        {error}
                        <button type="button" class="btn btn-secondary" onclick={on_retry}>{"Retry"}</button>
                    </div>
                }
            } else {
                html! {}
            }}

            <TransactionTable
                transactions={state.records.clone()}
                loading={state.loading}
                on_edit={on_edit}
                on_delete={actions.request_delete.clone()}
            />

            <TransactionModal
                session={(*session).clone()}
                api_client={props.api_client.clone()}
                on_close={on_close}
                on_saved={on_saved}
            />

            <DeleteConfirmModal
                is_open={state.confirm_delete_open}
                deleting={state.deleting}
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
        </section>
    }
}
