//! User management for the bookkeeping API.
//!
//! This module contains everything related to user accounts:
//! - The request/response types for the user endpoints
//! - Route handlers and the manager functions backing them

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    models::{User, UserID, UserRole},
    stores::{NewUser, TransactionStore, UserStore},
};

// ============================================================================
// MODELS
// ============================================================================

/// The JSON payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRegisterRequest {
    /// The user's display name.
    pub name: String,
    /// The user's email address, must be unique across all users.
    pub email: String,
    /// The user's role.
    pub role: UserRole,
}

impl UserRegisterRequest {
    /// Check the payload fields before they reach the manager layer.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the name is blank or the email is not a
    /// plausible address.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("the name must not be blank".to_owned()));
        }

        validate_email(&self.email)
    }
}

/// The JSON payload for updating a user.
///
/// Unlike transaction updates, user updates are a partial patch: an omitted
/// or null field leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    /// The new display name, or null to leave it unchanged.
    #[serde(default)]
    pub name: Option<String>,
    /// The new email address, or null to leave it unchanged.
    #[serde(default)]
    pub email: Option<String>,
    /// The new role, or null to leave it unchanged.
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl UserUpdateRequest {
    /// Check the provided payload fields before they reach the manager layer.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if a provided name is blank or a provided
    /// email is not a plausible address.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(Error::Validation("the name must not be blank".to_owned()));
        }

        if let Some(email) = &self.email {
            validate_email(email)?;
        }

        Ok(())
    }
}

/// The JSON projection of a user returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// The user's ID.
    pub id: UserID,
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

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn validate_email(email: &str) -> Result<(), Error> {
    let malformed = || Error::Validation(format!("\"{email}\" is not a valid email address"));

    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(malformed());
    }

    Ok(())
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// A route handler for registering a new user.
pub async fn create_user_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    Json(request): Json<UserRegisterRequest>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    request.validate()?;

    let response = create_user(request, &state.user_store)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// A route handler for listing all registered users.
pub async fn list_users_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    Ok(Json(list_users(&state.user_store)))
}

/// A route handler for getting a user by their ID.
///
/// Returns the status code 404 if no user with the given ID exists.
pub async fn get_user_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    let response = get_user(UserID::new(user_id), &state.user_store)?;

    Ok(Json(response))
}

/// A route handler for patching a user's details. Responds with no body.
pub async fn update_user_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    Path(user_id): Path<i64>,
    Json(request): Json<UserUpdateRequest>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    request.validate()?;

    update_user(UserID::new(user_id), request, &state.user_store)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for deleting a user that owns no transactions.
pub async fn delete_user_endpoint<U, T>(
    State(state): State<AppState<U, T>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, Error>
where
    U: UserStore,
    T: TransactionStore,
{
    delete_user(
        UserID::new(user_id),
        &state.user_store,
        &state.transaction_store,
    )?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// MANAGER FUNCTIONS
// ============================================================================

/// Register a new user with fresh timestamps.
///
/// # Errors
///
/// Returns [Error::UserAlreadyExists] if another user already has the
/// requested email address.
pub fn create_user<U>(request: UserRegisterRequest, user_store: &U) -> Result<UserResponse, Error>
where
    U: UserStore,
{
    if user_store.email_exists(&request.email) {
        return Err(Error::UserAlreadyExists(request.email));
    }

    let now = OffsetDateTime::now_utc();
    let user = user_store.create(NewUser {
        name: request.name,
        email: request.email,
        role: request.role,
        created_at: now,
        updated_at: now,
    });

    Ok(user.into())
}

/// List all registered users.
pub fn list_users<U>(user_store: &U) -> Vec<UserResponse>
where
    U: UserStore,
{
    user_store
        .get_all()
        .into_iter()
        .map(UserResponse::from)
        .collect()
}

/// Get a user by their ID.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if no user with the given ID exists.
pub fn get_user<U>(user_id: UserID, user_store: &U) -> Result<UserResponse, Error>
where
    U: UserStore,
{
    user_store.get(user_id).map(UserResponse::from)
}

/// Patch a user's details, leaving omitted fields unchanged.
///
/// Updating a user's email to their own current address is not a collision.
///
/// # Errors
///
/// This function will return an error if:
/// - no user with the given ID exists,
/// - or the new email address is already taken by another user.
pub fn update_user<U>(
    user_id: UserID,
    request: UserUpdateRequest,
    user_store: &U,
) -> Result<(), Error>
where
    U: UserStore,
{
    let mut user = user_store.get(user_id)?;

    if let Some(email) = request.email {
        if email != user.email && user_store.email_exists(&email) {
            return Err(Error::UserAlreadyExists(email));
        }

        user.email = email;
    }

    if let Some(name) = request.name {
        user.name = name;
    }

    if let Some(role) = request.role {
        user.role = role;
    }

    user.updated_at = OffsetDateTime::now_utc();
    user_store.save(user);

    Ok(())
}

/// Delete a user, provided they own no transactions.
///
/// # Errors
///
/// This function will return an error if:
/// - no user with the given ID exists,
/// - or the user still owns at least one transaction.
pub fn delete_user<U, T>(
    user_id: UserID,
    user_store: &U,
    transaction_store: &T,
) -> Result<(), Error>
where
    U: UserStore,
    T: TransactionStore,
{
    user_store.get(user_id)?;

    if transaction_store.exists_for_user(user_id) {
        return Err(Error::UserHasTransactions(user_id));
    }

    user_store.delete(user_id);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
