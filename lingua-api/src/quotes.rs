use axum::{extract::State, routing::post, Json, Router};
use lingua_order::{OrderDraft, OrderQuote};

use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/quotes", post(create_quote))
}

/// Price a draft order without booking it
async fn create_quote(
    State(state): State<AppState>,
    AppJson(draft): AppJson<OrderDraft>,
) -> Result<Json<OrderQuote>, AppError> {
    let quote = state.orders.quote(&draft, state.clock.today()).await?;
    Ok(Json(quote))
}
