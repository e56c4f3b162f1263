pub mod delete_confirm_modal;
pub mod transaction_modal;
pub mod transaction_table;
pub mod transactions_page;

pub use delete_confirm_modal::DeleteConfirmModal;
pub use transaction_modal::TransactionModal;
pub use transaction_table::TransactionTable;
pub use transactions_page::TransactionsPage;
