use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::models::{Amount, Group, Share, Transaction, User, Weight};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct UserRequest {
    #[serde(default)]
    pub name: String,
}

impl From<UserRequest> for User {
    fn from(req: UserRequest) -> Self {
        User {
            id: Uuid::nil(),
            name: req.name,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct GroupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub users: Vec<Uuid>,
}

impl From<GroupRequest> for Group {
    fn from(req: GroupRequest) -> Self {
        Group {
            id: Uuid::nil(),
            name: req.name,
            description: req.description,
            users: req.users,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub user: Uuid,
    #[serde(default)]
    pub force_price: Amount,
    #[serde(default)]
    pub weight: Weight,
}

/// Body of transaction writes. The group comes from the path or from the stored transaction.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default)]
    pub paid_by: Uuid,
    #[serde(default)]
    pub paid_for: Vec<ShareRequest>,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl From<TransactionRequest> for Transaction {
    fn from(req: TransactionRequest) -> Self {
        Transaction {
            id: Uuid::nil(),
            group: Uuid::nil(),
            paid_by: req.paid_by,
            paid_for: req
                .paid_for
                .into_iter()
                .map(|share| Share {
                    user: share.user,
                    forced_amount: share.force_price,
                    weight: share.weight,
                    computed_amount: 0,
                })
                .collect(),
            amount: req.amount,
            date: req.date,
            category: req.category,
            title: req.title,
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct GroupFilter {
    /// Only return groups this user belongs to
    pub user: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct HomeStats {
    pub message: String,
    pub calls: u64,
}

pub fn parse_id(raw: &str) -> Result<Uuid, LedgerError> {
    Uuid::parse_str(raw).map_err(|_| LedgerError::InvalidId(raw.to_string()))
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LedgerError::InvalidInput(..)
            | LedgerError::InvalidId(_)
            | LedgerError::UnknownUsers { .. }
            | LedgerError::InvalidMembers { .. }
            | LedgerError::AmountsExceedTotal { .. }
            | LedgerError::UnsplittableRemainder(_)
            | LedgerError::AmountOverflow(_) => StatusCode::BAD_REQUEST,
            LedgerError::UserNotFound(_) | LedgerError::GroupNotFound(_) | LedgerError::TransactionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LedgerError::UnknownMember(_) | LedgerError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match &self.0 {
            LedgerError::InvalidId(_) => "id must be a valid id".to_string(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}
