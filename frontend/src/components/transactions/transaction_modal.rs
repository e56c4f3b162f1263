use shared::transaction_form::{LoadedForm, ModalPhase, ModalSession};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_notifications::use_notifications;
use crate::services::api::ApiClient;
use crate::services::Logger;

const COMPONENT: &str = "TransactionModal";

#[derive(Properties, PartialEq)]
pub struct TransactionModalProps {
    /// `None` keeps the modal closed
    pub session: Option<ModalSession>,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

#[function_component(TransactionModal)]
pub fn transaction_modal(props: &TransactionModalProps) -> Html {
    let phase = use_mut_ref(ModalPhase::default);
    let current_generation = use_mut_ref(|| None::<u64>);
    let form_ref = use_node_ref();
    let trigger = use_force_update();
    let notifier = use_notifications();

    // Every new session starts a fresh load; a late response for an older
    // session is dropped by the generation check
    use_effect_with(props.session.clone(), {
        let phase = phase.clone();
        let current_generation = current_generation.clone();
        let api_client = props.api_client.clone();
        let trigger = trigger.clone();
        move |session: &Option<ModalSession>| {
            match session.clone() {
                Some(session) => {
                    phase.borrow_mut().open();
                    *current_generation.borrow_mut() = Some(session.generation);
                    trigger.force_update();

                    spawn_local(async move {
                        let result = api_client.get_transaction_form_data(&session.mode).await;
                        if *current_generation.borrow() != Some(session.generation) {
                            Logger::debug_with_component(COMPONENT, "Dropping form data for a closed session");
                            return;
                        }
                        match result {
                            Ok(data) => phase.borrow_mut().loaded(LoadedForm::from(data)),
                            Err(e) => {
                                Logger::error_with_component(COMPONENT, &format!("Error loading form data: {}", e));
                                phase.borrow_mut().failed("Failed to load data.");
                            }
                        }
                        trigger.force_update();
                    });
                }
                None => {
                    phase.borrow_mut().close();
                    *current_generation.borrow_mut() = None;
                }
            }
            || ()
        }
    });

    let on_field = {
        let phase = phase.clone();
        let trigger = trigger.clone();
        Callback::from(move |(field, value): (&'static str, String)| {
            phase.borrow_mut().edit_field(field, value);
            trigger.force_update();
        })
    };

    let on_save = {
        let phase = phase.clone();
        let current_generation = current_generation.clone();
        let form_ref = form_ref.clone();
        let session = props.session.clone();
        let api_client = props.api_client.clone();
        let on_saved = props.on_saved.clone();
        let notifier = notifier.clone();
        let trigger = trigger.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(session) = session.clone() else {
                return;
            };
            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                if !form.check_validity() {
                    form.report_validity();
                    return;
                }
            }

            let validation = phase.borrow().form().map(|form| form.draft.validate());
            if let Some(Err(e)) = validation {
                notifier.error(e.to_string());
                return;
            }

            let Some(form) = phase.borrow_mut().submit() else {
                return;
            };
            trigger.force_update();

            let phase = phase.clone();
            let current_generation = current_generation.clone();
            let api_client = api_client.clone();
            let on_saved = on_saved.clone();
            let notifier = notifier.clone();
            let trigger = trigger.clone();

            spawn_local(async move {
                let result = api_client.save_transaction(&session.mode, &form.draft).await;
                if *current_generation.borrow() != Some(session.generation) {
                    return;
                }
                match result {
                    Ok(()) => {
                        Logger::info_with_component(COMPONENT, "Transaction saved");
                        phase.borrow_mut().close();
                        notifier.success("Transaction saved.");
                        on_saved.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Error saving transaction: {}", e));
                        phase.borrow_mut().submit_failed();
                        notifier.error(format!("Failed to save transaction: {}", e));
                    }
                }
                trigger.force_update();
            });
        })
    };

    let Some(session) = props.session.as_ref() else {
        return html! {};
    };

    let submitting = matches!(*phase.borrow(), ModalPhase::Submitting(_));

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !submitting {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    let body = match &*phase.borrow() {
        ModalPhase::Closed | ModalPhase::Loading => html! {
            <p class="modal-loading">{"Loading..."}</p>
        },
        ModalPhase::Failed(message) => html! {
            <p class="form-message error">{message}</p>
        },
        ModalPhase::Loaded(form) | ModalPhase::Submitting(form) => {
            render_form(form, &form_ref, &on_field, submitting)
        }
    };

    let can_save = matches!(*phase.borrow(), ModalPhase::Loaded(_));

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" id="transactionModal" role="dialog" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3 class="modal-title" id="transactionModalLabel">{session.mode.title()}</h3>
                </div>
                <div class="modal-body" id="transactionModalContent">
                    {body}
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={submitting}>
                        {"Cancel"}
                    </button>
                    <button type="button" class="btn btn-primary" id="saveTransaction" onclick={on_save} disabled={!can_save}>
                        {if submitting { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn render_form(
    form: &LoadedForm,
    form_ref: &NodeRef,
    on_field: &Callback<(&'static str, String)>,
    disabled: bool,
) -> Html {
    let draft = &form.draft;

    let input_change = |field: &'static str| {
        on_field.reform(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            (field, input.value())
        })
    };
    let select_change = |field: &'static str| {
        on_field.reform(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            (field, select.value())
        })
    };
    let on_memo = on_field.reform(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        ("memo", area.value())
    });

    html! {
        <form id="transactionForm" ref={form_ref.clone()}>
            <div class="form-group">
                <label for="date">{"Date"}</label>
                <input type="date" id="date" name="date" class="form-control" required=true
                    value={draft.date.clone()} oninput={input_change("date")} {disabled} />
            </div>

            <div class="form-group">
                <label for="account_id">{"Account"}</label>
                <select id="account_id" name="account_id" class="form-control" required=true
                    onchange={select_change("account_id")} {disabled}>
                    <option value="" selected={draft.account_id.is_empty()}>{"Select account"}</option>
                    {for form.accounts.iter().map(|account| html! {
                        <option value={account.id.clone()} selected={account.id == draft.account_id}>
                            {&account.name}
                        </option>
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for="payee_name">{"Payee"}</label>
                <input type="text" id="payee_name" name="payee_name" class="form-control" required=true
                    list="payeeList" value={draft.payee_name.clone()} oninput={input_change("payee_name")} {disabled} />
                <datalist id="payeeList">
                    {for form.payees.iter().map(|payee| html! {
                        <option value={payee.name.clone()} />
                    })}
                </datalist>
            </div>

            <div class="form-group">
                <label for="category_id">{"Category"}</label>
                <select id="category_id" name="category_id" class="form-control"
                    onchange={select_change("category_id")} {disabled}>
                    <option value="" selected={draft.category_id.is_empty()}>{"-- None --"}</option>
                    {for form.categories.iter().map(|category| html! {
                        <option value={category.id.clone()} selected={category.id == draft.category_id}>
                            {&category.name}
                        </option>
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for="memo">{"Memo"}</label>
                <textarea id="memo" name="memo" class="form-control" rows="2"
                    value={draft.memo.clone()} oninput={on_memo} {disabled} />
            </div>

            <div class="form-group">
                <label for="amount">{"Amount"}</label>
                <input type="number" id="amount" name="amount" class="form-control" required=true
                    step="0.01" min="0" value={draft.amount.clone()} oninput={input_change("amount")} {disabled} />
            </div>
        </form>
    }
}
