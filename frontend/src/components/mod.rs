pub mod budget_page;
pub mod category_accordion;
pub mod header;
pub mod notification_banner;
pub mod transactions;

pub use budget_page::BudgetPage;
pub use header::{Header, Page};
pub use notification_banner::NotificationProvider;
pub use transactions::TransactionsPage;
