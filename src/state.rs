//! Implements a struct that holds the state of the REST server.

use crate::stores::{TransactionStore, UserStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<U, T>
where
    U: UserStore,
    T: TransactionStore,
{
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: T,
}

impl<U, T> AppState<U, T>
where
    U: UserStore,
    T: TransactionStore,
{
    /// Create a new [AppState].
    pub fn new(user_store: U, transaction_store: T) -> Self {
        Self {
            user_store,
            transaction_store,
        }
    }
}
