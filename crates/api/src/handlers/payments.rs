//! Handlers for the Razorpay checkout flow: order creation and payment
//! signature verification.

use axum::extract::State;
use axum::Json;
use fundify_core::payments::{receipt_id, to_minor_units, verify_payment_signature};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::payments::{OrderRequest, RazorpayClient};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// `POST /orders` body. `amount` is already in minor units.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MinorOrderRequest {
    pub amount: Option<i64>,
}

/// `POST /create-order` body. `amount` is in whole currency units.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub notes: Option<serde_json::Value>,
}

/// Callback fields posted by the checkout widget.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub order_id: String,
    pub payment_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/payments/orders
pub async fn create_minor_order(
    State(state): State<AppState>,
    Json(input): Json<MinorOrderRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let amount = positive_amount(input.amount)?;
    let order = OrderRequest {
        amount,
        currency: state.config.payments.currency.clone(),
        receipt: receipt_id("receipt_order"),
        payment_capture: 1,
        notes: None,
    };
    submit(&state, &order).await
}

/// POST /api/payments/create-order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let amount = positive_amount(input.amount)?;
    let amount = to_minor_units(amount).ok_or_else(|| AppError::validation("Amount is too large"))?;

    let order = OrderRequest {
        amount,
        currency: input
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| state.config.payments.currency.clone()),
        receipt: receipt_id("order_rcptid"),
        payment_capture: 1,
        notes: Some(input.notes.unwrap_or_else(|| serde_json::json!({}))),
    };
    submit(&state, &order).await
}

/// POST /api/payments/verify
///
/// 400 when the signature does not match the order and payment ids.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    let (Some(order_id), Some(payment_id), Some(signature)) = (
        input.razorpay_order_id,
        input.razorpay_payment_id,
        input.razorpay_signature,
    ) else {
        return Err(AppError::validation(
            "razorpay_order_id, razorpay_payment_id and razorpay_signature are required",
        ));
    };

    let secret = state
        .config
        .payments
        .key_secret
        .as_deref()
        .ok_or_else(|| AppError::InternalError("Payment gateway is not configured".into()))?;

    if !verify_payment_signature(&order_id, &payment_id, &signature, secret) {
        tracing::warn!(
            order_id = %order_id,
            payment_id = %payment_id,
            "Payment signature mismatch"
        );
        return Err(AppError::validation("Payment verification failed"));
    }

    tracing::info!(order_id = %order_id, payment_id = %payment_id, "Payment verified");
    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified successfully".into(),
        order_id,
        payment_id,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn positive_amount(amount: Option<i64>) -> AppResult<i64> {
    amount
        .filter(|a| *a > 0)
        .ok_or_else(|| AppError::validation("Valid amount is required"))
}

async fn submit(state: &AppState, order: &OrderRequest) -> AppResult<Json<serde_json::Value>> {
    let client = RazorpayClient::with_client(state.http.clone(), &state.config.payments);
    let created = client.create_order(order).await?;
    tracing::info!(
        receipt = %order.receipt,
        amount = order.amount,
        currency = %order.currency,
        "Payment order created"
    );
    Ok(Json(created))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_positive() {
        assert_eq!(positive_amount(Some(500)).unwrap(), 500);
        assert!(positive_amount(Some(0)).is_err());
        assert!(positive_amount(Some(-3)).is_err());
        assert!(positive_amount(None).is_err());
    }
}
