// Transaction service: records deposits, withdrawals, and transfers
// scoped to the authenticated identity. The referenced account_id is a
// free-form string; this service never calls the account service.

mod handlers;
mod transaction;

pub use handlers::{AppState, router};
pub use transaction::{Transaction, TransactionError, TransactionType};
