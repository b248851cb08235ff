use crate::{
    api::models::*,
    core::{
        models::{MemberRecord, SettlementPlan},
        presenter::{render_balances, render_plan, render_split},
        services::DangService,
    },
    infrastructure::storage::Storage,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;

pub type SharedService = Arc<DangService<Box<dyn Storage>>>;

pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/members", get(list_members).post(add_member))
        .route("/members/{name}", delete(remove_member))
        .route("/balances", get(get_balances))
        .route("/rounds", post(record_round))
        .route("/rounds/split", post(split_expense))
        .route("/settlements", get(get_settlement_plan).post(record_settlement))
        .with_state(service)
}

fn settlement_response(plan: SettlementPlan) -> SettlementResponse {
    let lines = render_plan(&plan);
    SettlementResponse { plan, lines }
}

#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "Registered members", body = Vec<MemberRecord>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn list_members(State(service): State<SharedService>) -> Result<Json<Vec<MemberRecord>>, ApiError> {
    Ok(Json(service.list_members().await?))
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = MemberRecord),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 409, description = "Member already exists", body = ErrorResponse)
    )
)]
pub(crate) async fn add_member(
    State(service): State<SharedService>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberRecord>), ApiError> {
    let record = service.add_member(&req.name).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/api/members/{name}",
    params(
        ("name" = String, Path, description = "Name of the member to remove")
    ),
    responses(
        (status = 200, description = "Member removed"),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 409, description = "Member has an unsettled balance", body = ErrorResponse)
    )
)]
pub(crate) async fn remove_member(
    State(service): State<SharedService>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.remove_member(&name).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/balances",
    responses(
        (status = 200, description = "Cumulative balances", body = BalancesResponse)
    )
)]
pub(crate) async fn get_balances(State(service): State<SharedService>) -> Result<Json<BalancesResponse>, ApiError> {
    let balances = service.balances().await?;
    let lines = render_balances(&balances);
    Ok(Json(BalancesResponse { balances, lines }))
}

#[utoipa::path(
    post,
    path = "/api/rounds",
    request_body = RecordRoundRequest,
    responses(
        (status = 200, description = "Round recorded", body = RoundResponse),
        (status = 400, description = "Invalid expenses or payer", body = ErrorResponse),
        (status = 404, description = "Member not registered", body = ErrorResponse),
        (status = 422, description = "Balances do not net to zero", body = ErrorResponse)
    )
)]
pub(crate) async fn record_round(
    State(service): State<SharedService>,
    Json(req): Json<RecordRoundRequest>,
) -> Result<Json<RoundResponse>, ApiError> {
    let outcome = service.record_round(&req.expenses, &req.payer).await?;
    let lines = render_plan(&outcome.plan);
    Ok(Json(RoundResponse {
        balances: outcome.balances,
        plan: outcome.plan,
        lines,
        summary: None,
    }))
}

#[utoipa::path(
    post,
    path = "/api/rounds/split",
    request_body = SplitExpenseRequest,
    responses(
        (status = 200, description = "Expense split and recorded", body = RoundResponse),
        (status = 400, description = "Invalid members or amount", body = ErrorResponse),
        (status = 404, description = "Member not registered", body = ErrorResponse)
    )
)]
pub(crate) async fn split_expense(
    State(service): State<SharedService>,
    Json(req): Json<SplitExpenseRequest>,
) -> Result<Json<RoundResponse>, ApiError> {
    let outcome = service.split_expense(&req.members, &req.payer, req.amount).await?;
    let lines = render_plan(&outcome.plan);
    Ok(Json(RoundResponse {
        balances: outcome.balances,
        plan: outcome.plan,
        lines,
        summary: Some(render_split(&req.members, &req.payer, req.amount)),
    }))
}

#[utoipa::path(
    get,
    path = "/api/settlements",
    responses(
        (status = 200, description = "Plan settling the stored balances", body = SettlementResponse),
        (status = 422, description = "Stored balances do not net to zero", body = ErrorResponse)
    )
)]
pub(crate) async fn get_settlement_plan(
    State(service): State<SharedService>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let plan = service.settlement_plan().await?;
    Ok(Json(settlement_response(plan)))
}

#[utoipa::path(
    post,
    path = "/api/settlements",
    responses(
        (status = 200, description = "Stored balances settled", body = SettlementResponse),
        (status = 422, description = "Stored balances do not net to zero", body = ErrorResponse)
    )
)]
pub(crate) async fn record_settlement(
    State(service): State<SharedService>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let plan = service.record_settlement().await?;
    Ok(Json(settlement_response(plan)))
}
