//! Request DTOs.
//!
//! Identifiers and statuses arrive as strings and are parsed in the
//! handlers; responses serialize the domain `Order` directly (its serde
//! shape is the wire format).

use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub quantity: i64,
    pub shipping_address: String,
}

#[derive(Debug, Deserialize)]
pub struct TransitionStatusRequest {
    pub status: String,
    #[serde(default)]
    pub fulfillment_details: Option<JsonValue>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmOrderRequest {
    pub fulfillment_details: JsonValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersParams {
    pub status: Option<String>,
    pub seller_id: Option<String>,
    pub buyer_id: Option<String>,
}
