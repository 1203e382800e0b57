use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lingua_order::{Order, OrderDraft, OrderUpdate};

use crate::account::StudentAccount;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", get(list_orders).post(create_order))
        .route(
            "/v1/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

async fn list_orders(
    State(state): State<AppState>,
    StudentAccount(student_id): StudentAccount,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.orders.list_orders(&student_id).await?;
    Ok(Json(orders))
}

async fn create_order(
    State(state): State<AppState>,
    StudentAccount(student_id): StudentAccount,
    AppJson(draft): AppJson<OrderDraft>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state
        .orders
        .create_order(&student_id, &draft, state.clock.today())
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_order(
    State(state): State<AppState>,
    StudentAccount(student_id): StudentAccount,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Order>, AppError> {
    let order = state.orders.get_order(&student_id, id).await?;
    Ok(Json(order))
}

async fn update_order(
    State(state): State<AppState>,
    StudentAccount(student_id): StudentAccount,
    AppPath(id): AppPath<u64>,
    AppJson(update): AppJson<OrderUpdate>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .orders
        .update_order(&student_id, id, &update, state.clock.today())
        .await?;
    Ok(Json(order))
}

async fn delete_order(
    State(state): State<AppState>,
    StudentAccount(student_id): StudentAccount,
    AppPath(id): AppPath<u64>,
) -> Result<StatusCode, AppError> {
    state.orders.delete_order(&student_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
