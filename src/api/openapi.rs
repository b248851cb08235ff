use utoipa::OpenApi;

use crate::{
    api::models::{
        AddMemberRequest, BalancesResponse, ErrorResponse, RecordRoundRequest, RoundResponse, SettlementResponse,
        SplitExpenseRequest,
    },
    core::models::{Member, MemberRecord, SettlementPlan, Transaction},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_members,
        super::handlers::add_member,
        super::handlers::remove_member,
        super::handlers::get_balances,
        super::handlers::record_round,
        super::handlers::split_expense,
        super::handlers::get_settlement_plan,
        super::handlers::record_settlement
    ),
    components(schemas(
        AddMemberRequest,
        RecordRoundRequest,
        SplitExpenseRequest,
        BalancesResponse,
        SettlementResponse,
        RoundResponse,
        ErrorResponse,
        Member,
        MemberRecord,
        Transaction,
        SettlementPlan
    )),
    info(
        title = "DangHub API",
        description = "API for splitting shared expenses and settling member balances",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
