use std::cmp::Ordering;

use js_sys::{Array, JsString, Object};
use shared::table::{row_matches, sort_rows_by, SortState, TableRow};
use shared::TransactionRecord;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<TransactionRecord>,
    pub loading: bool,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<String>,
}

/// Text order of the user's locale, as `String.prototype.localeCompare` gives it
fn locale_compare(a: &str, b: &str) -> Ordering {
    JsString::from(a)
        .locale_compare(b, &Array::new(), &Object::new())
        .cmp(&0)
}

fn table_rows<F>(transactions: &[TransactionRecord], sort: &SortState, collate: F) -> Vec<TableRow>
where
    F: Fn(&str, &str) -> Ordering,
{
    let mut rows: Vec<TableRow> = transactions
        .iter()
        .map(|t| TableRow { id: t.id.clone(), cells: t.cells() })
        .collect();
    if let Some(column) = sort.column {
        sort_rows_by(&mut rows, column, sort.direction, collate);
    }
    rows
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    let sort = use_state(SortState::default);
    let search = use_state(String::new);

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let rows = table_rows(&props.transactions, &sort, locale_compare);
    let amount_column = TransactionRecord::HEADINGS.len() - 1;

    html! {
        <>
            <div class="table-toolbar">
                <input
                    type="search"
                    id="searchInput"
                    class="form-control search-input"
                    placeholder="Search transactions..."
                    value={(*search).clone()}
                    oninput={on_search}
                />
            </div>

            {if props.loading && props.transactions.is_empty() {
                html! { <div class="loading">{"Loading transactions..."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="transactions-table" id="transactions">
                            <thead>
                                <tr>
                                    {for TransactionRecord::HEADINGS.iter().enumerate().map(|(index, heading)| {
                                        let onclick = {
                                            let sort = sort.clone();
                                            Callback::from(move |_: MouseEvent| {
                                                let mut next = *sort;
                                                next.toggle(index);
                                                sort.set(next);
                                            })
                                        };
                                        html! {
                                            <th class="sortable" onclick={onclick}>
                                                {*heading}
                                                {if let Some(indicator) = sort.indicator_for(index) {
                                                    html! { <span class="sort-icon">{indicator}</span> }
                                                } else { html! {} }}
                                            </th>
                                        }
                                    })}
                                    <th class="actions"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for rows.iter().map(|row| {
                                    let hidden = !row_matches(&row.cells, &search);
                                    let on_edit = props.on_edit.reform({
                                        let id = row.id.clone();
                                        move |_: MouseEvent| id.clone()
                                    });
                                    let on_delete = props.on_delete.reform({
                                        let id = row.id.clone();
                                        move |_: MouseEvent| id.clone()
                                    });

                                    html! {
                                        <tr key={row.id.clone()} style={hidden.then_some("display: none")}>
                                            {for row.cells.iter().enumerate().map(|(index, cell)| html! {
                                                <td class={(index == amount_column).then_some("amount")}>{cell}</td>
                                            })}
                                            <td class="actions">
                                                <button type="button" class="btn btn-link editTransactionBtn" title="Edit" onclick={on_edit}>
                                                    {"✎"}
                                                </button>
                                                <button type="button" class="btn btn-link deleteTransactionBtn" title="Delete" onclick={on_delete}>
                                                    {"🗑"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::table::{collate_text, SortDirection};

    fn record(id: &str, date: &str, amount: f64) -> TransactionRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "date": date,
            "amount": amount,
            "account_name": "Checking",
            "payee_name": format!("Payee {}", id),
        }))
        .unwrap()
    }

    #[test]
    fn test_rows_keep_incoming_order_without_sort() {
        let transactions = vec![record("a", "2024-03-01", 5.0), record("b", "2024-01-01", 10.0)];
        let rows = table_rows(&transactions, &SortState::default(), collate_text);
        assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_rows_follow_sort_state() {
        let transactions = vec![
            record("a", "2024-03-01", 5.0),
            record("b", "2024-01-01", 10.0),
            record("c", "2024-02-01", 7.5),
        ];
        let sort = SortState { column: Some(5), direction: SortDirection::Descending };
        let rows = table_rows(&transactions, &sort, collate_text);
        assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["b", "c", "a"]);

        let sort = SortState { column: Some(0), direction: SortDirection::Ascending };
        let rows = table_rows(&transactions, &sort, collate_text);
        assert_eq!(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["b", "c", "a"]);
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_locale_compare_files_accents_with_base_letter() {
        assert_eq!(locale_compare("Ćma", "Dom"), Ordering::Less);
        assert_eq!(locale_compare("Ärzte", "Bar"), Ordering::Less);
        assert_eq!(locale_compare("Zoo", "Dom"), Ordering::Greater);
    }
}
