use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Expenses, Member, SettlementPlan};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordRoundRequest {
    #[schema(value_type = Object)]
    pub expenses: Expenses,
    pub payer: Member,
}

#[derive(Deserialize, ToSchema)]
pub struct SplitExpenseRequest {
    pub members: Vec<Member>,
    pub payer: Member,
    pub amount: f64,
}

// Response structs
#[derive(Serialize, Deserialize, ToSchema)]
pub struct BalancesResponse {
    #[schema(value_type = Object)]
    pub balances: BalanceMap,
    pub lines: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SettlementResponse {
    pub plan: SettlementPlan,
    pub lines: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RoundResponse {
    #[schema(value_type = Object)]
    pub balances: BalanceMap,
    pub plan: SettlementPlan,
    pub lines: Vec<String>,
    /// Per-member share summary, present for even splits.
    pub summary: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct ApiError(pub DangError);

impl From<DangError> for ApiError {
    fn from(err: DangError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            DangError::EmptyExpenses
            | DangError::UnknownPayer(_)
            | DangError::NegativeAmount { .. }
            | DangError::InvalidInput(..) => StatusCode::BAD_REQUEST,
            DangError::MemberNotFound(_) => StatusCode::NOT_FOUND,
            DangError::MemberAlreadyExists(_) | DangError::UnsettledBalance { .. } => StatusCode::CONFLICT,
            DangError::Consistency { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DangError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error_message = match &self.0 {
            DangError::InvalidInput(_, detail) => detail.description.clone(),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
