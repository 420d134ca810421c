//! Defines the store contracts for user and transaction records, and the
//! in-memory implementations backing them.
//!
//! Stores only hold records and assign identifiers; business rules such as
//! ownership and email uniqueness live in the [user](crate::user) and
//! [transaction](crate::transaction) managers.

mod memory;

pub use memory::{InMemoryTransactionStore, InMemoryUserStore};

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{Transaction, TransactionID, TransactionType, User, UserID, UserRole},
};

/// A user that has not been persisted yet, i.e. has no ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: OffsetDateTime,
    /// When the user was last updated.
    pub updated_at: OffsetDateTime,
}

/// A transaction that has not been persisted yet, i.e. has no ID.
///
/// The owner is always known at creation time; ownerless transactions can
/// only be produced by overwriting a record with malformed data.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Whether this transaction is an income or an expense.
    pub transaction_type: TransactionType,
    /// A free-text category such as "Salary" or "Groceries".
    pub category: String,
    /// The amount of money spent or earned.
    pub amount: Decimal,
    /// The calendar date on which the transaction happened.
    pub date: Date,
    /// An optional text description of what the transaction was for.
    pub description: Option<String>,
    /// The ID of the user that owns this transaction.
    pub user_id: UserID,
    /// When the transaction was created.
    pub created_at: OffsetDateTime,
    /// When the transaction was last updated.
    pub updated_at: OffsetDateTime,
}

/// Handles the storage and retrieval of user records.
///
/// Identifier assignment must be atomic and monotonically increasing starting
/// at 1; IDs are never reused, even after deletion.
pub trait UserStore: Clone + Send + Sync + 'static {
    /// Insert a new user, assigning it a fresh ID.
    fn create(&self, user: NewUser) -> User;

    /// Overwrite the record stored at `user.id`.
    fn save(&self, user: User);

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::UserNotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get all users in the store's enumeration order.
    fn get_all(&self) -> Vec<User>;

    /// Remove the user with the given ID. Removing an absent ID is a no-op.
    fn delete(&self, id: UserID);

    /// Whether any user has the given email address.
    fn email_exists(&self, email: &str) -> bool;
}

/// Handles the storage and retrieval of transaction records.
///
/// The identifier assignment contract is the same as for [UserStore].
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Insert a new transaction, assigning it a fresh ID.
    fn create(&self, transaction: NewTransaction) -> Transaction;

    /// Overwrite the record stored at `transaction.id`.
    fn save(&self, transaction: Transaction);

    /// Get a transaction by its ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::TransactionNotFound] if no transaction with the given
    /// ID exists.
    fn get(&self, id: TransactionID) -> Result<Transaction, Error>;

    /// Get all transactions owned by the given user, in the store's
    /// enumeration order.
    fn get_by_user(&self, user_id: UserID) -> Vec<Transaction>;

    /// Whether the given user owns at least one transaction.
    fn exists_for_user(&self, user_id: UserID) -> bool;

    /// Remove the transaction with the given ID. Removing an absent ID is a
    /// no-op.
    fn delete(&self, id: TransactionID);
}
