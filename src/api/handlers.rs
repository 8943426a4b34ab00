use crate::{
    api::models::*,
    core::{
        balance::GroupBalances,
        models::{balance::Balance, group::Group, transaction::Transaction, user::User},
        services::LedgerService,
    },
    infrastructure::storage::in_memory::InMemoryStorage,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedService = Arc<LedgerService<InMemoryStorage>>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/", get(home_stats))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/{id}", get(get_group).put(update_group).delete(delete_group))
        .route("/groups/{id}/users", get(get_group_users))
        .route(
            "/groups/{id}/transactions",
            get(get_group_transactions).post(create_group_transaction),
        )
        .route("/groups/{id}/balances", get(get_group_balances))
        .route(
            "/transactions/{id}",
            axum::routing::put(update_transaction).delete(delete_transaction),
        )
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service greeting and hit counter", body = HomeStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn home_stats(State(service): State<SharedService>) -> Result<Json<HomeStats>, ApiError> {
    let calls = service.record_call("/").await?;
    Ok(Json(HomeStats {
        message: "Splitbook is up".to_string(),
        calls,
    }))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    )
)]
pub async fn list_users(State(service): State<SharedService>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(service.list_users().await?))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(service): State<SharedService>,
    Json(req): Json<UserRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(service.create_user(req.into()).await?))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(State(service): State<SharedService>, Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    let user_id = parse_id(&id)?;
    Ok(Json(service.get_user(user_id).await?))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Json(req): Json<UserRequest>,
) -> Result<Json<User>, ApiError> {
    let user_id = parse_id(&id)?;
    Ok(Json(service.update_user(user_id, req.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    )
)]
pub async fn delete_user(State(service): State<SharedService>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let user_id = parse_id(&id)?;
    service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/groups",
    params(GroupFilter),
    responses(
        (status = 200, description = "Groups, optionally filtered by member", body = Vec<Group>),
        (status = 400, description = "Malformed user id", body = ErrorResponse)
    )
)]
pub async fn list_groups(
    State(service): State<SharedService>,
    Query(filter): Query<GroupFilter>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let member = match filter.user.as_deref() {
        Some(raw) if !raw.is_empty() => Some(parse_id(raw)?),
        _ => None,
    };
    Ok(Json(service.list_groups(member).await?))
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = GroupRequest,
    responses(
        (status = 200, description = "Group created", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<SharedService>,
    Json(req): Json<GroupRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.create_group(req.into()).await?))
}

#[utoipa::path(
    get,
    path = "/groups/{id}",
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(State(service): State<SharedService>, Path(id): Path<String>) -> Result<Json<Group>, ApiError> {
    let group_id = parse_id(&id)?;
    Ok(Json(service.get_group(group_id).await?))
}

#[utoipa::path(
    get,
    path = "/groups/{id}/users",
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Users of the group", body = Vec<User>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_users(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Vec<User>>, ApiError> {
    let group_id = parse_id(&id)?;
    Ok(Json(service.group_users(group_id).await?))
}

#[utoipa::path(
    put,
    path = "/groups/{id}",
    params(("id" = String, Path, description = "Group ID")),
    request_body = GroupRequest,
    responses(
        (status = 200, description = "Group updated", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn update_group(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Json(req): Json<GroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group_id = parse_id(&id)?;
    Ok(Json(service.update_group(group_id, req.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/groups/{id}",
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group and its transactions deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    )
)]
pub async fn delete_group(State(service): State<SharedService>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let group_id = parse_id(&id)?;
    service.delete_group(group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/groups/{id}/transactions",
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Transactions of the group, newest first", body = Vec<Transaction>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_transactions(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let group_id = parse_id(&id)?;
    Ok(Json(service.group_transactions(group_id).await?))
}

#[utoipa::path(
    post,
    path = "/groups/{id}/transactions",
    params(("id" = String, Path, description = "Group ID")),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transaction split and stored", body = Transaction),
        (status = 400, description = "Invalid transaction or split", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn create_group_transaction(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let group_id = parse_id(&id)?;
    Ok(Json(service.create_transaction(group_id, req.into()).await?))
}

#[utoipa::path(
    get,
    path = "/groups/{id}/balances",
    params(("id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Balance of every member, keyed by user id", body = HashMap<String, Balance>),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Stored transactions are inconsistent with the group", body = ErrorResponse)
    )
)]
pub async fn get_group_balances(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<GroupBalances>, ApiError> {
    let group_id = parse_id(&id)?;
    Ok(Json(service.group_balances(group_id).await?))
}

#[utoipa::path(
    put,
    path = "/transactions/{id}",
    params(("id" = String, Path, description = "Transaction ID")),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transaction re-split and replaced", body = Transaction),
        (status = 400, description = "Invalid transaction or split", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn update_transaction(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction_id = parse_id(&id)?;
    Ok(Json(service.update_transaction(transaction_id, req.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    )
)]
pub async fn delete_transaction(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let transaction_id = parse_id(&id)?;
    service.delete_transaction(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
