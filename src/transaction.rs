//! Transaction management for the bookkeeping API.
//!
//! This module contains everything related to transactions:
//! - The request/response types for the transaction endpoints
//! - The extractor that resolves the calling user from the `user-id` header
//! - Route handlers and the manager functions backing them

use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::{
    AppState, Error,
    models::{Transaction, TransactionID, TransactionType, UserID},
    stores::{NewTransaction, TransactionStore, UserStore},
};

// ============================================================================
// MODELS
// ============================================================================

/// The JSON payload for creating or fully overwriting a transaction.
///
/// Unlike user updates, transaction updates replace every payload field, so
/// the same type serves both the create and update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Whether this transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-text category such as "Salary" or "Groceries".
    pub category: String,
    /// The amount of money spent or earned, must be greater than zero.
    ///
    /// Accepted as either a JSON string (`"5000.00"`) or a JSON number;
    /// strings carry the value without any floating point rounding.
    pub amount: Decimal,
    /// The calendar date on which the transaction happened.
    pub transaction_date: Date,
    /// An optional text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionRequest {
    /// Check the payload fields before they reach the manager layer.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the category is blank or the amount is
    /// not greater than zero.
    pub fn validate(&self) -> Result<(), Error> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation(
                "the category must not be blank".to_owned(),
            ));
        }

        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(
                "the amount must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

/// The JSON projection of a transaction returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// The ID of the transaction.
    pub id: TransactionID,
    /// Whether this transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-text category such as "Salary" or "Groceries".
    pub category: String,
    /// The amount of money spent or earned.
    ///
    /// Serialized as a JSON string (`"5000.00"`) so the exact decimal value
    /// survives the trip through clients that parse numbers as floats.
    pub amount: Decimal,
    /// The calendar date on which the transaction happened.
    pub transaction_date: Date,
    /// An optional text description of what the transaction was for.
    pub description: Option<String>,
    /// The ID of the owning user rendered as text, or null for malformed
    /// records with no recorded owner.
    pub user_id: Option<String>,
    /// When the transaction was created.
    pub created_at: OffsetDateTime,
    /// When the transaction was last updated.
    pub updated_at: OffsetDateTime,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            transaction_type: transaction.transaction_type,
            category: transaction.category,
            amount: transaction.amount,
            transaction_date: transaction.date,
            description: transaction.description,
            user_id: transaction.user_id.map(|user_id| user_id.to_string()),
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

/// The monthly balance summary returned by the balance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalanceResponse {
    /// The year the summary covers.
    pub year: i32,
    /// The month the summary covers, 1 through 12.
    pub month: u8,
    /// The sum of all income amounts within the month.
    pub total_income: Decimal,
    /// The sum of all expense amounts within the month.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
}

/// The query parameters accepted by the balance endpoint.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// The year to summarize.
    pub year: i32,
    /// The month to summarize, 1 through 12.
    pub month: u8,
}

// ============================================================================
// EXTRACTORS
// ============================================================================

/// The request header that carries the calling user's ID.
pub const USER_ID_HEADER: &str = "user-id";

/// The ID of the calling user, taken from the [USER_ID_HEADER] request header.
///
/// The extractor only parses the header; whether the user actually exists is
/// checked by the manager functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerUserID(pub UserID);

impl<S> FromRequestParts<S> for CallerUserID
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
            Error::Validation(format!("the {USER_ID_HEADER} header is required"))
        })?;

        let user_id = header
            .to_str()
            .ok()
            .and_then(|text| text.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                Error::Validation(format!("the {USER_ID_HEADER} header must be an integer"))
            })?;

        Ok(Self(UserID::new(user_id)))
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// A route handler for recording a new transaction owned by the calling user.
pub async fn create_transaction_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    CallerUserID(user_id): CallerUserID,
    Json(request): Json<TransactionRequest>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    request.validate()?;

    let response =
        create_transaction(request, user_id, &state.user_store, &state.transaction_store)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// A route handler for getting one of the calling user's transactions by ID.
///
/// Returns the status code 404 if the transaction does not exist or is not
/// owned by the calling user.
pub async fn get_transaction_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    CallerUserID(user_id): CallerUserID,
    Path(transaction_id): Path<i64>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    let response = get_transaction(
        TransactionID::new(transaction_id),
        user_id,
        &state.user_store,
        &state.transaction_store,
    )?;

    Ok(Json(response))
}

/// A route handler for listing all of the calling user's transactions.
pub async fn list_transactions_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    CallerUserID(user_id): CallerUserID,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    let responses = list_transactions(user_id, &state.user_store, &state.transaction_store)?;

    Ok(Json(responses))
}

/// A route handler for overwriting one of the calling user's transactions.
pub async fn update_transaction_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    CallerUserID(user_id): CallerUserID,
    Path(transaction_id): Path<i64>,
    Json(request): Json<TransactionRequest>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    request.validate()?;

    let response = update_transaction(
        TransactionID::new(transaction_id),
        request,
        user_id,
        &state.user_store,
        &state.transaction_store,
    )?;

    Ok(Json(response))
}

/// A route handler for deleting one of the calling user's transactions.
pub async fn delete_transaction_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    CallerUserID(user_id): CallerUserID,
    Path(transaction_id): Path<i64>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    delete_transaction(
        TransactionID::new(transaction_id),
        user_id,
        &state.user_store,
        &state.transaction_store,
    )?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for summarizing the calling user's balance for one month.
pub async fn monthly_balance_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    CallerUserID(user_id): CallerUserID,
    Query(query): Query<BalanceQuery>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    let response = monthly_balance(
        query.year,
        query.month,
        user_id,
        &state.user_store,
        &state.transaction_store,
    )?;

    Ok(Json(response))
}

// ============================================================================
// MANAGER FUNCTIONS
// ============================================================================

/// Record a new transaction owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if `user_id` does not belong to a registered
/// user.
pub fn create_transaction<U, T>(
    request: TransactionRequest,
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<TransactionResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    let now = OffsetDateTime::now_utc();
    let transaction = transaction_store.create(NewTransaction {
        transaction_type: request.transaction_type,
        category: request.category,
        amount: request.amount,
        date: request.transaction_date,
        description: request.description,
        user_id,
        created_at: now,
        updated_at: now,
    });

    Ok(transaction.into())
}

/// Get one of `user_id`'s transactions by its ID.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user,
/// - `transaction_id` does not refer to a stored transaction,
/// - or the transaction is not owned by `user_id`.
pub fn get_transaction<U, T>(
    transaction_id: TransactionID,
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<TransactionResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    let transaction = transaction_store.get(transaction_id)?;
    verify_ownership(&transaction, user_id)?;

    Ok(transaction.into())
}

/// List all transactions owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if `user_id` does not belong to a registered
/// user.
pub fn list_transactions<U, T>(
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<Vec<TransactionResponse>, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    Ok(transaction_store
        .get_by_user(user_id)
        .into_iter()
        .map(TransactionResponse::from)
        .collect())
}

/// Overwrite the payload fields of one of `user_id`'s transactions.
///
/// The ID, owner, and creation timestamp are never changed.
///
/// # Errors
///
/// The error conditions are the same as for [get_transaction].
pub fn update_transaction<U, T>(
    transaction_id: TransactionID,
    request: TransactionRequest,
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<TransactionResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    let mut transaction = transaction_store.get(transaction_id)?;
    verify_ownership(&transaction, user_id)?;

    transaction.transaction_type = request.transaction_type;
    transaction.category = request.category;
    transaction.amount = request.amount;
    transaction.date = request.transaction_date;
    transaction.description = request.description;
    transaction.updated_at = OffsetDateTime::now_utc();

    transaction_store.save(transaction.clone());

    Ok(transaction.into())
}

/// Delete one of `user_id`'s transactions.
///
/// # Errors
///
/// The error conditions are the same as for [get_transaction].
pub fn delete_transaction<U, T>(
    transaction_id: TransactionID,
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<(), Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    let transaction = transaction_store.get(transaction_id)?;
    verify_ownership(&transaction, user_id)?;

    transaction_store.delete(transaction_id);

    Ok(())
}

/// Summarize `user_id`'s income, expenses, and balance for one calendar month.
///
/// The date range is inclusive of the first and last day of the month.
/// Amounts are summed exactly, with no floating point rounding.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user,
/// - or `month` is not between 1 and 12.
pub fn monthly_balance<U, T>(
    year: i32,
    month: u8,
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<MonthlyBalanceResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    let month_of_year = Month::try_from(month).map_err(|_| {
        Error::Validation(format!("the month must be between 1 and 12, got {month}"))
    })?;
    let (start, end) = month_date_range(year, month_of_year)?;

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for transaction in transaction_store.get_by_user(user_id) {
        if transaction.date < start || transaction.date > end {
            continue;
        }

        match transaction.transaction_type {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => total_expense += transaction.amount,
        }
    }

    Ok(MonthlyBalanceResponse {
        year,
        month,
        total_income,
        total_expense,
        balance: total_income - total_expense,
    })
}

fn verify_ownership(transaction: &Transaction, caller: UserID) -> Result<(), Error> {
    match transaction.user_id {
        Some(owner) if owner == caller => Ok(()),
        Some(owner) => {
            tracing::warn!(
                "user {caller} was denied access to transaction {} owned by user {owner}",
                transaction.id
            );
            Err(Error::TransactionAccessDenied(transaction.id))
        }
        None => {
            tracing::warn!("transaction {} has no recorded owner", transaction.id);
            Err(Error::TransactionAccessDenied(transaction.id))
        }
    }
}

fn month_date_range(year: i32, month: Month) -> Result<(Date, Date), Error> {
    let start = Date::from_calendar_date(year, month, 1)
        .map_err(|_| Error::Validation(format!("the year {year} is out of range")))?;
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .map_err(|_| Error::Validation(format!("the year {year} is out of range")))?;

    Ok((start, end))
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod caller_tests {
    use axum::{extract::FromRequestParts, http::Request};

    use crate::{Error, models::UserID};

    use super::{CallerUserID, USER_ID_HEADER};

    async fn extract_caller(request: Request<()>) -> Result<CallerUserID, Error> {
        let (mut parts, ()) = request.into_parts();

        CallerUserID::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_user_id_from_header() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "42")
            .body(())
            .unwrap();

        let caller = extract_caller(request).await.unwrap();

        assert_eq!(caller, CallerUserID(UserID::new(42)));
    }

    #[tokio::test]
    async fn fails_with_missing_header() {
        let request = Request::builder().body(()).unwrap();

        let result = extract_caller(request).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn fails_with_non_integer_header() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "forty-two")
            .body(())
            .unwrap();

        let result = extract_caller(request).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }
}

#[cfg(test)]
mod transaction_tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, macros::date};

    use crate::{
        Error,
        models::{TransactionID, TransactionType, UserID, UserRole},
        stores::{InMemoryTransactionStore, InMemoryUserStore, TransactionStore},
        user::{UserRegisterRequest, create_user},
    };

    use super::{
        TransactionRequest, TransactionResponse, create_transaction, delete_transaction,
        get_transaction, list_transactions, monthly_balance, update_transaction,
    };

    fn get_test_stores() -> (InMemoryUserStore, InMemoryTransactionStore) {
        (InMemoryUserStore::new(), InMemoryTransactionStore::new())
    }

    fn register_test_user(user_store: &InMemoryUserStore, email: &str) -> UserID {
        let response = create_user(
            UserRegisterRequest {
                name: "Test User".to_owned(),
                email: email.to_owned(),
                role: UserRole::User,
            },
            user_store,
        )
        .expect("Could not create test user");

        response.id
    }

    fn income(amount: Decimal, transaction_date: Date) -> TransactionRequest {
        TransactionRequest {
            transaction_type: TransactionType::Income,
            category: "Salary".to_owned(),
            amount,
            transaction_date,
            description: None,
        }
    }

    fn expense(amount: Decimal, transaction_date: Date) -> TransactionRequest {
        TransactionRequest {
            transaction_type: TransactionType::Expense,
            category: "Groceries".to_owned(),
            amount,
            transaction_date,
            description: None,
        }
    }

    #[test]
    fn validate_rejects_blank_category() {
        let mut request = income(dec!(10.00), date!(2025 - 10 - 10));
        request.category = "   ".to_owned();

        assert!(matches!(request.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        for amount in [dec!(0), dec!(-5.00)] {
            let request = income(amount, date!(2025 - 10 - 10));

            assert!(matches!(request.validate(), Err(Error::Validation(_))));
        }
    }

    #[test]
    fn create_transaction_fails_with_non_existent_user() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = UserID::new(42);

        let result = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            user_id,
            &user_store,
            &transaction_store,
        );

        assert_eq!(result, Err(Error::UserNotFound(user_id)));
    }

    #[test]
    fn create_transaction_assigns_owner_and_id() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        let response = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            user_id,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        assert_eq!(response.id, TransactionID::new(1));
        assert_eq!(response.user_id, Some(user_id.to_string()));
        assert_eq!(response.amount, dec!(100.00));
        assert_eq!(response.created_at, response.updated_at);
    }

    #[test]
    fn get_transaction_fails_with_non_existent_id() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        let transaction_id = TransactionID::new(99);
        let result = get_transaction(transaction_id, user_id, &user_store, &transaction_store);

        assert_eq!(result, Err(Error::TransactionNotFound(transaction_id)));
    }

    #[test]
    fn get_transaction_fails_for_non_owner() {
        let (user_store, transaction_store) = get_test_stores();
        let owner = register_test_user(&user_store, "alice@example.com");
        let other = register_test_user(&user_store, "bob@example.com");

        let created = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            owner,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let result = get_transaction(created.id, other, &user_store, &transaction_store);

        assert_eq!(result, Err(Error::TransactionAccessDenied(created.id)));
    }

    #[test]
    fn get_transaction_fails_for_ownerless_transaction() {
        let (user_store, transaction_store) = get_test_stores();
        let owner = register_test_user(&user_store, "alice@example.com");

        let created = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            owner,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let mut stored = transaction_store.get(created.id).unwrap();
        stored.user_id = None;
        transaction_store.save(stored);

        let result = get_transaction(created.id, owner, &user_store, &transaction_store);

        assert_eq!(result, Err(Error::TransactionAccessDenied(created.id)));
    }

    #[test]
    fn list_transactions_only_returns_callers_transactions() {
        let (user_store, transaction_store) = get_test_stores();
        let alice = register_test_user(&user_store, "alice@example.com");
        let bob = register_test_user(&user_store, "bob@example.com");

        let alices = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            alice,
            &user_store,
            &transaction_store,
        )
        .unwrap();
        create_transaction(
            expense(dec!(25.00), date!(2025 - 10 - 11)),
            bob,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let listed = list_transactions(alice, &user_store, &transaction_store).unwrap();

        assert_eq!(listed, vec![alices]);
    }

    #[test]
    fn update_transaction_overwrites_payload_fields_only() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        let created = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            user_id,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let replacement = TransactionRequest {
            transaction_type: TransactionType::Expense,
            category: "Rent".to_owned(),
            amount: dec!(1200.00),
            transaction_date: date!(2025 - 11 - 01),
            description: Some("November rent".to_owned()),
        };
        let updated = update_transaction(
            created.id,
            replacement.clone(),
            user_id,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.transaction_type, replacement.transaction_type);
        assert_eq!(updated.category, replacement.category);
        assert_eq!(updated.amount, replacement.amount);
        assert_eq!(updated.transaction_date, replacement.transaction_date);
        assert_eq!(updated.description, replacement.description);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_transaction_fails_for_non_owner() {
        let (user_store, transaction_store) = get_test_stores();
        let owner = register_test_user(&user_store, "alice@example.com");
        let other = register_test_user(&user_store, "bob@example.com");

        let created = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            owner,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let result = update_transaction(
            created.id,
            expense(dec!(50.00), date!(2025 - 10 - 11)),
            other,
            &user_store,
            &transaction_store,
        );

        assert_eq!(result, Err(Error::TransactionAccessDenied(created.id)));
        assert_eq!(
            get_transaction(created.id, owner, &user_store, &transaction_store),
            Ok(created),
            "the transaction should be unchanged after a denied update"
        );
    }

    #[test]
    fn delete_transaction_removes_record() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        let created = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            user_id,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        delete_transaction(created.id, user_id, &user_store, &transaction_store).unwrap();

        assert_eq!(
            get_transaction(created.id, user_id, &user_store, &transaction_store),
            Err(Error::TransactionNotFound(created.id))
        );
    }

    #[test]
    fn delete_transaction_fails_for_non_owner() {
        let (user_store, transaction_store) = get_test_stores();
        let owner = register_test_user(&user_store, "alice@example.com");
        let other = register_test_user(&user_store, "bob@example.com");

        let created = create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            owner,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let result = delete_transaction(created.id, other, &user_store, &transaction_store);

        assert_eq!(result, Err(Error::TransactionAccessDenied(created.id)));
        assert!(
            get_transaction(created.id, owner, &user_store, &transaction_store).is_ok(),
            "the transaction should still exist after a denied delete"
        );
    }

    fn create_all(
        requests: Vec<TransactionRequest>,
        user_id: UserID,
        user_store: &InMemoryUserStore,
        transaction_store: &InMemoryTransactionStore,
    ) -> Vec<TransactionResponse> {
        requests
            .into_iter()
            .map(|request| {
                create_transaction(request, user_id, user_store, transaction_store).unwrap()
            })
            .collect()
    }

    #[test]
    fn monthly_balance_is_zero_with_no_transactions() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        let balance = monthly_balance(2025, 10, user_id, &user_store, &transaction_store).unwrap();

        assert_eq!(balance.total_income, Decimal::ZERO);
        assert_eq!(balance.total_expense, Decimal::ZERO);
        assert_eq!(balance.balance, Decimal::ZERO);
    }

    #[test]
    fn monthly_balance_sums_only_the_requested_month() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        create_all(
            vec![
                income(dec!(5000.00), date!(2025 - 10 - 10)),
                expense(dec!(2000.00), date!(2025 - 10 - 20)),
                // Both month boundaries are inclusive.
                income(dec!(1.00), date!(2025 - 10 - 01)),
                income(dec!(2.00), date!(2025 - 10 - 31)),
                // Neighbouring months must be excluded.
                income(dec!(999.00), date!(2025 - 09 - 30)),
                expense(dec!(999.00), date!(2025 - 11 - 01)),
            ],
            user_id,
            &user_store,
            &transaction_store,
        );

        let balance = monthly_balance(2025, 10, user_id, &user_store, &transaction_store).unwrap();

        assert_eq!(balance.year, 2025);
        assert_eq!(balance.month, 10);
        assert_eq!(balance.total_income, dec!(5003.00));
        assert_eq!(balance.total_expense, dec!(2000.00));
        assert_eq!(balance.balance, dec!(3003.00));
    }

    #[test]
    fn monthly_balance_includes_leap_day() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        create_all(
            vec![
                expense(dec!(40.00), date!(2024 - 02 - 29)),
                expense(dec!(10.00), date!(2024 - 03 - 01)),
            ],
            user_id,
            &user_store,
            &transaction_store,
        );

        let balance = monthly_balance(2024, 2, user_id, &user_store, &transaction_store).unwrap();

        assert_eq!(balance.total_expense, dec!(40.00));
    }

    #[test]
    fn monthly_balance_sums_exactly() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        create_all(
            vec![
                income(dec!(6500.00), date!(2025 - 10 - 05)),
                expense(dec!(2800.00), date!(2025 - 10 - 15)),
            ],
            user_id,
            &user_store,
            &transaction_store,
        );

        let balance = monthly_balance(2025, 10, user_id, &user_store, &transaction_store).unwrap();

        assert_eq!(balance.balance, dec!(3700.00));
    }

    #[test]
    fn monthly_balance_ignores_other_users_transactions() {
        let (user_store, transaction_store) = get_test_stores();
        let alice = register_test_user(&user_store, "alice@example.com");
        let bob = register_test_user(&user_store, "bob@example.com");

        create_transaction(
            income(dec!(100.00), date!(2025 - 10 - 10)),
            bob,
            &user_store,
            &transaction_store,
        )
        .unwrap();

        let balance = monthly_balance(2025, 10, alice, &user_store, &transaction_store).unwrap();

        assert_eq!(balance.total_income, Decimal::ZERO);
    }

    #[test]
    fn monthly_balance_fails_with_invalid_month() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = register_test_user(&user_store, "alice@example.com");

        for month in [0, 13] {
            let result = monthly_balance(2025, month, user_id, &user_store, &transaction_store);

            assert!(matches!(result, Err(Error::Validation(_))));
        }
    }

    #[test]
    fn monthly_balance_fails_with_non_existent_user() {
        let (user_store, transaction_store) = get_test_stores();
        let user_id = UserID::new(7);

        let result = monthly_balance(2025, 10, user_id, &user_store, &transaction_store);

        assert_eq!(result, Err(Error::UserNotFound(user_id)));
    }

    #[test]
    fn amounts_serialize_as_json_strings() {
        let request = income(dec!(5000.00), date!(2025 - 10 - 10));

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["amount"], serde_json::json!("5000.00"));
    }

    #[test]
    fn amounts_deserialize_from_json_numbers() {
        let request: TransactionRequest = serde_json::from_str(
            r#"{
                "type": "INCOME",
                "category": "Salary",
                "amount": 5000.00,
                "transactionDate": "2025-10-10"
            }"#,
        )
        .unwrap();

        assert_eq!(request.amount, dec!(5000.00));
    }

    #[test]
    fn transaction_request_uses_wire_field_names() {
        let request: TransactionRequest = serde_json::from_str(
            r#"{
                "type": "INCOME",
                "category": "Salary",
                "amount": "5000.00",
                "transactionDate": "2025-10-10"
            }"#,
        )
        .unwrap();

        assert_eq!(request.transaction_type, TransactionType::Income);
        assert_eq!(request.amount, dec!(5000.00));
        assert_eq!(request.transaction_date, date!(2025 - 10 - 10));
        assert_eq!(request.description, None);
    }
}
