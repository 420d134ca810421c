//! The API endpoint URIs.

/// The route to create or list users.
pub const USERS: &str = "/api/v1/users";
/// The route to access a single user.
pub const USER: &str = "/api/v1/users/{id}";
/// The route to create or list the calling user's transactions.
pub const TRANSACTIONS: &str = "/api/v1/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/v1/transactions/{id}";
/// The route to compute the calling user's monthly balance.
pub const TRANSACTIONS_BALANCE: &str = "/api/v1/transactions/balance";
