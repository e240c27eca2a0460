// Account service: creates and lists bank accounts scoped to the
// authenticated identity. Token verification is local - the auth
// service is never called at request time.

mod account;
mod handlers;

pub use account::{Account, AccountType};
pub use handlers::{AppState, router};
