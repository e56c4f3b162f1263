use shared::budget::{clamp_assigned, format_amount, AccordionState, CategoryBoard};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_categories::AssignedEdit;

#[derive(Properties, PartialEq)]
pub struct CategoryAccordionProps {
    pub board: CategoryBoard,
    pub on_assigned_change: Callback<AssignedEdit>,
}

/// Category groups as collapsible panels, each listing its categories with
/// an editable assigned amount
#[function_component(CategoryAccordion)]
pub fn category_accordion(props: &CategoryAccordionProps) -> Html {
    let accordion = use_state(AccordionState::default);
    let groups = props.board.groups();

    if groups.is_empty() {
        return html! { <p class="empty-state">{"No categories yet."}</p> };
    }

    html! {
        <div class="accordion accordion-flush" id="accordionFlushMain">
            {for groups.into_iter().map(|group| {
                let is_open = accordion.is_open(&group.panel_id);
                let on_toggle = {
                    let accordion = accordion.clone();
                    let panel_id = group.panel_id.clone();
                    Callback::from(move |_: MouseEvent| {
                        let mut next = (*accordion).clone();
                        next.toggle(&panel_id);
                        accordion.set(next);
                    })
                };

                html! {
                    <div class="accordion-item" key={group.panel_id.clone()}>
                        <h2 class="accordion-header">
                            <button
                                type="button"
                                class={classes!("accordion-button", (!is_open).then_some("collapsed"))}
                                aria-expanded={is_open.to_string()}
                                aria-controls={group.panel_id.clone()}
                                onclick={on_toggle}
                            >
                                <span class="group-name">{&group.name}</span>
                                <span class="group-totals">
                                    {format!("Assigned {} · Available {}",
                                        format_amount(group.total_assigned()),
                                        format_amount(group.total_available()))}
                                </span>
                            </button>
                        </h2>
                        <div
                            id={group.panel_id.clone()}
                            class={classes!("accordion-collapse", "collapse", is_open.then_some("show"))}
                        >
                            <ul class="list-group list-group-flush">
                                {for group.categories.iter().map(|category| {
                                    let onchange = {
                                        let on_assigned_change = props.on_assigned_change.clone();
                                        let id = category.id.clone();
                                        let name = category.name.clone();
                                        Callback::from(move |e: Event| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            let raw = input.value();
                                            // Show the amount that will actually be sent
                                            if let Ok(value) = clamp_assigned(&raw) {
                                                input.set_value(&format_amount(value));
                                            }
                                            on_assigned_change.emit(AssignedEdit {
                                                id: id.clone(),
                                                name: name.clone(),
                                                raw,
                                            });
                                        })
                                    };

                                    html! {
                                        <li class="list-group-item category-row" key={category.id.clone()}>
                                            <span class="category-name">{&category.name}</span>
                                            <input
                                                type="number"
                                                class={classes!("form-control", "assigned-input",
                                                    props.board.has_draft(&category.id).then_some("unsaved"))}
                                                id={category.id.clone()}
                                                min="0"
                                                step="0.01"
                                                value={props.board.displayed_assigned(&category.id)}
                                                onchange={onchange}
                                            />
                                            <span class="category-activity">{format_amount(category.activity)}</span>
                                            <span class={classes!("category-available",
                                                (category.available < 0.0).then_some("negative"))}>
                                                {format_amount(category.available)}
                                            </span>
                                        </li>
                                    }
                                })}
                            </ul>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
