//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    stores::{TransactionStore, UserStore},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint, monthly_balance_endpoint, update_transaction_endpoint,
    },
    user::{
        create_user_endpoint, delete_user_endpoint, get_user_endpoint, list_users_endpoint,
        update_user_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The balance route is registered before the parameterised transaction route
/// so that `/balance` is not captured as a transaction ID.
pub fn build_router<U, T>(state: AppState<U, T>) -> Router
where
    U: UserStore,
    T: TransactionStore,
{
    Router::new()
        .route(
            endpoints::USERS,
            get(list_users_endpoint::<U, T>).post(create_user_endpoint::<U, T>),
        )
        .route(
            endpoints::USER,
            get(get_user_endpoint::<U, T>)
                .put(update_user_endpoint::<U, T>)
                .delete(delete_user_endpoint::<U, T>),
        )
        .route(
            endpoints::TRANSACTIONS_BALANCE,
            get(monthly_balance_endpoint::<U, T>),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint::<U, T>).post(create_transaction_endpoint::<U, T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<U, T>)
                .put(update_transaction_endpoint::<U, T>)
                .delete(delete_transaction_endpoint::<U, T>),
        )
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
