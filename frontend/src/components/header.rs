use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Budget,
    Transactions,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Budget => "Budget",
            Page::Transactions => "Transactions",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub active_page: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"My Budget"}</h1>
                <nav class="header-nav">
                    {for [Page::Budget, Page::Transactions].into_iter().map(|page| {
                        let onclick = props.on_navigate.reform(move |_: MouseEvent| page);
                        html! {
                            <button
                                type="button"
                                class={classes!("nav-link", (page == props.active_page).then_some("active"))}
                                onclick={onclick}
                            >
                                {page.label()}
                            </button>
                        }
                    })}
                </nav>
            </div>
        </header>
    }
}
