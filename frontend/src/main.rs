use shared::AppConfig;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{BudgetPage, Header, NotificationProvider, Page, TransactionsPage};
use services::{ApiClient, Logger};

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| {
        let config = AppConfig::from_build_env();
        Logger::init(config.log_level);
        if !config.is_budget_scoped() {
            Logger::warn_with_component(
                "App",
                "BUDGET_ID was not set at build time; requests go to unscoped routes",
            );
        }
        config
    });
    let api_client = use_memo((), {
        let config = config.clone();
        move |_| ApiClient::new(&config)
    });
    let active_page = use_state(|| Page::Budget);

    // Connection status for the footer
    let backend_connected = use_state(|| false);
    let backend_endpoint = use_state(|| String::from("Checking..."));

    use_effect_with((), {
        let api_client = (*api_client).clone();
        let api_base = config.api_base.clone();
        let backend_connected = backend_connected.clone();
        let backend_endpoint = backend_endpoint.clone();

        move |_| {
            spawn_local(async move {
                match api_client.health().await {
                    Ok(status) => {
                        let summary = status.summary(&api_base);
                        if status.database_ok() {
                            Logger::info_with_component("App", &summary);
                        } else {
                            Logger::warn_with_component("App", &summary);
                        }
                        backend_connected.set(true);
                        backend_endpoint.set(summary);
                    }
                    Err(e) => {
                        Logger::error_with_component("App", &format!("Failed to connect to backend: {}", e));
                        backend_connected.set(false);
                        backend_endpoint.set("Connection failed".to_string());
                    }
                }
            });

            || ()
        }
    });

    let on_navigate = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    html! {
        <NotificationProvider>
            <Header active_page={*active_page} on_navigate={on_navigate} />

            <main class="main">
                <div class="container">
                    {match *active_page {
                        Page::Budget => html! {
                            <BudgetPage api_client={(*api_client).clone()} />
                        },
                        Page::Transactions => html! {
                            <TransactionsPage api_client={(*api_client).clone()} />
                        },
                    }}
                </div>
            </main>

            <div class={classes!("connection-status", (!*backend_connected).then_some("disconnected"))}>
                {(*backend_endpoint).clone()}
            </div>
        </NotificationProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
