use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

use crate::services::Logger;

/// How long a notification stays up before dismissing itself
const AUTO_DISMISS_MS: u32 = 6_000;

thread_local! {
    static NEXT_ID: Cell<u64> = Cell::new(1);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "notification success",
            NotificationLevel::Error => "notification error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

pub enum NotificationAction {
    Push(Notification),
    Dismiss(u64),
}

#[derive(Debug, Default, PartialEq)]
pub struct NotificationList {
    pub items: Vec<Notification>,
}

impl Reducible for NotificationList {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            NotificationAction::Push(notification) => items.push(notification),
            NotificationAction::Dismiss(id) => items.retain(|n| n.id != id),
        }
        Rc::new(NotificationList { items })
    }
}

/// Handle every page uses to report the outcome of a mutating action
#[derive(Clone, PartialEq)]
pub struct Notifier {
    dispatcher: UseReducerDispatcher<NotificationList>,
}

impl Notifier {
    pub fn new(dispatcher: UseReducerDispatcher<NotificationList>) -> Self {
        Self { dispatcher }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.dispatcher.dispatch(NotificationAction::Dismiss(id));
    }

    fn push(&self, level: NotificationLevel, message: String) {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        if level == NotificationLevel::Error {
            Logger::warn_with_component("Notifications", &message);
        }
        self.dispatcher.dispatch(NotificationAction::Push(Notification { id, level, message }));

        let dispatcher = self.dispatcher.clone();
        wasm_bindgen_futures::spawn_local(async move {
            gloo::timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
            dispatcher.dispatch(NotificationAction::Dismiss(id));
        });
    }
}

/// Access the notifier provided by `NotificationProvider`
#[hook]
pub fn use_notifications() -> Notifier {
    use_context::<Notifier>().expect("use_notifications called outside NotificationProvider")
}
