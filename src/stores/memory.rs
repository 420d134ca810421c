//! In-memory store implementations backed by a mutex-guarded map and an
//! atomic ID counter.

use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicI64, Ordering},
    },
};

use crate::{
    Error,
    models::{Transaction, TransactionID, User, UserID},
};

use super::{NewTransaction, NewUser, TransactionStore, UserStore};

/// Holds user records in a shared in-memory map.
///
/// Cloning the store is cheap and clones share the same underlying records.
/// Keying the map by ID means enumeration follows insertion order, since IDs
/// only ever increase.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    records: Arc<Mutex<BTreeMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserStore {
    /// Create an empty user store. The first assigned ID is 1.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    /// Insert a new user, assigning it a fresh ID.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    fn create(&self, user: NewUser) -> User {
        let id = UserID::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = User {
            id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };

        self.records
            .lock()
            .unwrap()
            .insert(id.as_i64(), user.clone());

        user
    }

    fn save(&self, user: User) {
        self.records
            .lock()
            .unwrap()
            .insert(user.id.as_i64(), user);
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        self.records
            .lock()
            .unwrap()
            .get(&id.as_i64())
            .cloned()
            .ok_or(Error::UserNotFound(id))
    }

    fn get_all(&self) -> Vec<User> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    fn delete(&self, id: UserID) {
        self.records.lock().unwrap().remove(&id.as_i64());
    }

    fn email_exists(&self, email: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .values()
            .any(|user| user.email == email)
    }
}

/// Holds transaction records in a shared in-memory map.
///
/// Cloning the store is cheap and clones share the same underlying records.
#[derive(Debug, Clone)]
pub struct InMemoryTransactionStore {
    records: Arc<Mutex<BTreeMap<i64, Transaction>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTransactionStore {
    /// Create an empty transaction store. The first assigned ID is 1.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    /// Insert a new transaction, assigning it a fresh ID.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    fn create(&self, transaction: NewTransaction) -> Transaction {
        let id = TransactionID::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let transaction = Transaction {
            id,
            transaction_type: transaction.transaction_type,
            category: transaction.category,
            amount: transaction.amount,
            date: transaction.date,
            description: transaction.description,
            user_id: Some(transaction.user_id),
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        };

        self.records
            .lock()
            .unwrap()
            .insert(id.as_i64(), transaction.clone());

        transaction
    }

    fn save(&self, transaction: Transaction) {
        self.records
            .lock()
            .unwrap()
            .insert(transaction.id.as_i64(), transaction);
    }

    fn get(&self, id: TransactionID) -> Result<Transaction, Error> {
        self.records
            .lock()
            .unwrap()
            .get(&id.as_i64())
            .cloned()
            .ok_or(Error::TransactionNotFound(id))
    }

    fn get_by_user(&self, user_id: UserID) -> Vec<Transaction> {
        self.records
            .lock()
            .unwrap()
            .values()
            .filter(|transaction| transaction.user_id == Some(user_id))
            .cloned()
            .collect()
    }

    fn exists_for_user(&self, user_id: UserID) -> bool {
        self.records
            .lock()
            .unwrap()
            .values()
            .any(|transaction| transaction.user_id == Some(user_id))
    }

    fn delete(&self, id: TransactionID) {
        self.records.lock().unwrap().remove(&id.as_i64());
    }
}
