use axum::{body::Bytes, extract::State};

use super::decode_json;
use crate::domain::aeps::{TransactionKind, TransactionRequest};
use crate::server::{AppState, errors::AppError, responses::ApiResponse};

pub async fn outlet_login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse, AppError> {
    transact(&state, TransactionKind::OutletLogin, &body).await
}

pub async fn balance_enquiry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse, AppError> {
    transact(&state, TransactionKind::BalanceEnquiry, &body).await
}

pub async fn mini_statement(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse, AppError> {
    transact(&state, TransactionKind::MiniStatement, &body).await
}

pub async fn cash_withdrawal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse, AppError> {
    transact(&state, TransactionKind::CashWithdrawal, &body).await
}

async fn transact(
    state: &AppState,
    kind: TransactionKind,
    body: &Bytes,
) -> Result<ApiResponse, AppError> {
    let request: TransactionRequest = decode_json(body)?;
    let reply = state.aeps.execute(kind, request).await?;
    Ok(ApiResponse::from_reply(reply))
}
