//! Seeding the stores from CSV files at startup.
//!
//! The seed directory holds two semicolon-delimited, headerless files:
//! - `users.csv` with the fields `name;email;role`
//! - `transactions.csv` with the fields
//!   `type;category;amount;date;description;userId`
//!
//! Records pass through the same validation and manager functions as API
//! requests, so a seed file cannot create records the API could not.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    models::{TransactionType, UserID, UserRole},
    stores::{TransactionStore, UserStore},
    transaction::{TransactionRequest, create_transaction},
    user::{UserRegisterRequest, create_user},
};

/// The errors that may occur while seeding the stores.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// A seed file could not be read or parsed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A record parsed but was rejected by validation or a manager function.
    #[error("a seed record was rejected: {0}")]
    Record(#[from] crate::Error),
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    name: String,
    email: String,
    role: UserRole,
}

#[derive(Debug, Deserialize)]
struct TransactionRecord {
    transaction_type: TransactionType,
    category: String,
    amount: Decimal,
    date: Date,
    description: String,
    user_id: i64,
}

/// Load `users.csv` and `transactions.csv` from `seed_dir` into the stores.
///
/// Users are loaded first so that transactions can reference them by ID;
/// record order in `users.csv` determines the assigned IDs, starting at 1.
///
/// # Errors
///
/// Returns a [SeedError] if either file cannot be read or any record is
/// rejected. Seeding is not atomic; records before the failing one remain.
pub fn seed_from_dir<U, T>(
    seed_dir: &Path,
    user_store: &U,
    transaction_store: &T,
) -> Result<(), SeedError>
where
    U: UserStore,
    T: TransactionStore,
{
    let user_count = load_users(&seed_dir.join("users.csv"), user_store)?;
    let transaction_count = load_transactions(
        &seed_dir.join("transactions.csv"),
        user_store,
        transaction_store,
    )?;

    tracing::info!("Seeded {user_count} users and {transaction_count} transactions.");

    Ok(())
}

fn load_users<U>(path: &Path, user_store: &U) -> Result<usize, SeedError>
where
    U: UserStore,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    let mut count = 0;

    for result in reader.deserialize() {
        let record: UserRecord = result?;
        let request = UserRegisterRequest {
            name: record.name,
            email: record.email,
            role: record.role,
        };

        request.validate()?;
        create_user(request, user_store)?;
        count += 1;
    }

    Ok(count)
}

fn load_transactions<U, T>(
    path: &Path,
    user_store: &U,
    transaction_store: &T,
) -> Result<usize, SeedError>
where
    U: UserStore,
    T: TransactionStore,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    let mut count = 0;

    for result in reader.deserialize() {
        let record: TransactionRecord = result?;
        let request = TransactionRequest {
            transaction_type: record.transaction_type,
            category: record.category,
            amount: record.amount,
            transaction_date: record.date,
            description: if record.description.is_empty() {
                None
            } else {
                Some(record.description)
            },
        };

        request.validate()?;
        create_transaction(
            request,
            UserID::new(record.user_id),
            user_store,
            transaction_store,
        )?;
        count += 1;
    }

    Ok(count)
}
