use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use tradelane_core::{OrderId, ProductId, UserId};
use tradelane_lifecycle::{CreateOrder, TransitionRequest};
use tradelane_orders::{OrderFilter, OrderStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", patch(transition_status))
        .route("/orders/:id/approve", post(approve_order))
        .route("/orders/:id/reject", post(reject_order))
        .route("/orders/:id/confirm", post(confirm_order))
        .route("/orders/:id/cancel", patch(cancel_order))
}

fn parse_order_id(id: &str) -> Result<OrderId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
    })
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    let request = CreateOrder {
        product_id,
        quantity: body.quantity,
        shipping_address: body.shipping_address,
    };

    match services.lifecycle.create_order(actor.actor_id(), request).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Query(params): Query<dto::ListOrdersParams>,
) -> axum::response::Response {
    let status: Option<OrderStatus> = match params.status.as_deref().map(str::parse).transpose() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_status",
                "unknown order status",
            )
        }
    };
    let seller_id: Option<UserId> = match params.seller_id.as_deref().map(str::parse).transpose() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid seller id")
        }
    };
    let buyer_id: Option<UserId> = match params.buyer_id.as_deref().map(str::parse).transpose() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid buyer id")
        }
    };

    let filter = OrderFilter {
        status,
        seller_id,
        buyer_id,
    };

    match services.lifecycle.find_all(actor.actor_id(), filter).await {
        Ok(orders) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": orders }))).into_response()
        }
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.find_by_id(actor.actor_id(), order_id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn transition_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::TransitionStatusRequest>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let target: OrderStatus = match body.status.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_status",
                "unknown order status",
            )
        }
    };

    let request = TransitionRequest {
        target,
        fulfillment_details: body.fulfillment_details,
        reason: body.reason,
    };

    match services
        .lifecycle
        .transition_status(actor.actor_id(), order_id, request)
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn approve_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    body: Option<Json<dto::DecisionRequest>>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let reason = body.and_then(|Json(b)| b.reason);

    match services
        .lifecycle
        .approve_order(actor.actor_id(), order_id, reason)
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn reject_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    body: Option<Json<dto::DecisionRequest>>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let reason = body.and_then(|Json(b)| b.reason);

    match services
        .lifecycle
        .reject_order(actor.actor_id(), order_id, reason)
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn confirm_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ConfirmOrderRequest>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services
        .lifecycle
        .confirm_order(actor.actor_id(), order_id, body.fulfillment_details)
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
    body: Option<Json<dto::DecisionRequest>>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let reason = body.and_then(|Json(b)| b.reason);

    match services
        .lifecycle
        .cancel_order(actor.actor_id(), order_id, reason)
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
