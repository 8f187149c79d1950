//! Order route handlers.
//!
//! The current order is kept per visitor in the app's order book. HTMX adds swap the
//! order count badge and fire `order-updated` so an open orders page can
//! refresh its list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use codebrew_core::{OrderItem, OrderList};

use super::header::{HeaderView, local_path};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{HxRequest, load_auth_state};
use crate::services::OrderStore;
use crate::state::AppState;

/// Add to order form data.
#[derive(Debug, Deserialize)]
pub struct AddToOrderForm {
    pub item: String,
    pub return_to: Option<String>,
}

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub header: HeaderView,
    pub orders: OrderList,
}

/// Order count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_count.html")]
pub struct OrderCountTemplate {
    pub count: usize,
}

/// Display the current order.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let auth = load_auth_state(&session).await?;
    let header = HeaderView::load(&state, &session, &auth, "/orders").await;
    let orders = OrderStore::new(&session, state.orders())
        .current_orders()
        .await;

    Ok(OrdersTemplate { header, orders })
}

/// Add an item to the order from a form post.
#[instrument(skip(state, session, hx))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<AddToOrderForm>,
) -> Result<Response> {
    let name = form.item.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("item must not be empty".to_string()));
    }
    let orders = OrderStore::new(&session, state.orders())
        .append(OrderItem::named(name))
        .await?;

    if hx.0 {
        Ok((
            AppendHeaders([("HX-Trigger", "order-updated")]),
            OrderCountTemplate {
                count: orders.len(),
            },
        )
            .into_response())
    } else {
        Ok(Redirect::to(&local_path(form.return_to.as_deref())).into_response())
    }
}

/// The current order, as JSON.
pub async fn list(State(state): State<AppState>, session: Session) -> Json<OrderList> {
    Json(
        OrderStore::new(&session, state.orders())
            .current_orders()
            .await,
    )
}

/// Append a JSON item and return the updated order.
///
/// Items are taken as sent, whatever their shape.
#[instrument(skip_all)]
pub async fn append(
    State(state): State<AppState>,
    session: Session,
    Json(item): Json<OrderItem>,
) -> Result<(StatusCode, Json<OrderList>)> {
    let orders = OrderStore::new(&session, state.orders())
        .append(item)
        .await?;
    Ok((StatusCode::CREATED, Json(orders)))
}
