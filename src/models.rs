//! The core entity types: users and their income/expense transactions.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A newtype wrapper for integer transaction IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct TransactionID(i64);

impl TransactionID {
    /// Create a new transaction ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the transaction ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for TransactionID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The role assigned to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// An administrator of the application.
    Admin,
    /// A regular user of the application.
    User,
}

/// Whether a transaction records money earned or money spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money flowing in, e.g. a salary payment.
    Income,
    /// Money flowing out, e.g. a grocery purchase.
    Expense,
}

/// A user of the application.
///
/// The store assigns `id` on creation; IDs are unique and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The user's email address, unique across all users.
    pub email: String,
    /// The user's role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: OffsetDateTime,
    /// When the user was last updated.
    pub updated_at: OffsetDateTime,
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The owning user is set once at creation and never transferred. A `None`
/// owner can only arise from malformed data and is treated as an access
/// violation by the transaction manager.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionID,
    /// Whether this transaction is an income or an expense.
    pub transaction_type: TransactionType,
    /// A free-text category such as "Salary" or "Groceries".
    pub category: String,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: Decimal,
    /// The calendar date on which the transaction happened.
    pub date: Date,
    /// An optional text description of what the transaction was for.
    pub description: Option<String>,
    /// The ID of the user that owns this transaction.
    pub user_id: Option<UserID>,
    /// When the transaction was created.
    pub created_at: OffsetDateTime,
    /// When the transaction was last updated.
    pub updated_at: OffsetDateTime,
}
