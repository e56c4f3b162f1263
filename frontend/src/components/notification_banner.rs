use yew::prelude::*;

use crate::hooks::use_notifications::{NotificationList, Notifier};

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Provides a `Notifier` to every descendant and renders the banner stack
#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let list = use_reducer(NotificationList::default);
    let notifier = Notifier::new(list.dispatcher());

    html! {
        <ContextProvider<Notifier> context={notifier.clone()}>
            {props.children.clone()}
            <div class="notification-stack" role="status" aria-live="polite">
                {for list.items.iter().map(|notification| {
                    let on_dismiss = {
                        let notifier = notifier.clone();
                        let id = notification.id;
                        Callback::from(move |_: MouseEvent| notifier.dismiss(id))
                    };
                    html! {
                        <div key={notification.id} class={notification.level.css_class()}>
                            <span class="notification-message">{&notification.message}</span>
                            <button type="button" class="notification-close" aria-label="Dismiss" onclick={on_dismiss}>
                                {"×"}
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<Notifier>>
    }
}
