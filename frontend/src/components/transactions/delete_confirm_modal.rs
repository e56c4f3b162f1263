use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DeleteConfirmModalProps {
    pub is_open: bool,
    pub deleting: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(DeleteConfirmModal)]
pub fn delete_confirm_modal(props: &DeleteConfirmModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    let on_backdrop_click = {
        let on_cancel = props.on_cancel.clone();
        let deleting = props.deleting;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !deleting {
                on_cancel.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal modal-sm" id="deleteConfirmModal" role="dialog" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3 class="modal-title">{"Delete transaction"}</h3>
                </div>
                <div class="modal-body">
                    <p>{"Are you sure you want to delete this transaction? This cannot be undone."}</p>
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.deleting}>
                        {"Cancel"}
                    </button>
                    <button type="button" class="btn btn-danger" id="confirmDelete" onclick={on_confirm} disabled={props.deleting}>
                        {if props.deleting { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
