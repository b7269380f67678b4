//! REST client for the Razorpay orders API.
//!
//! Wraps `POST /orders` using [`reqwest`] with HTTP basic auth
//! (`key_id:key_secret`).

use serde::Serialize;

use crate::config::PaymentConfig;
use crate::error::AppError;

/// Errors from the payment gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentGatewayError {
    /// Keys are missing from the environment.
    #[error("Payment gateway is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Razorpay returned a non-2xx status code.
    #[error("Razorpay API error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<PaymentGatewayError> for AppError {
    fn from(err: PaymentGatewayError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Body of an order creation request.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    /// Amount in minor units (paise).
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    /// 1 = capture automatically on successful authorization.
    pub payment_capture: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<serde_json::Value>,
}

/// HTTP client for the Razorpay API.
pub struct RazorpayClient<'a> {
    client: reqwest::Client,
    config: &'a PaymentConfig,
}

impl<'a> RazorpayClient<'a> {
    /// Reuse the shared [`reqwest::Client`] from application state.
    pub fn with_client(client: reqwest::Client, config: &'a PaymentConfig) -> Self {
        Self { client, config }
    }

    /// Create an order. The gateway's JSON reply is passed through as-is so
    /// the checkout widget receives every field it expects.
    pub async fn create_order(
        &self,
        order: &OrderRequest,
    ) -> Result<serde_json::Value, PaymentGatewayError> {
        let (key_id, key_secret) = self
            .config
            .credentials()
            .ok_or(PaymentGatewayError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}/orders", self.config.api_base))
            .basic_auth(key_id, Some(key_secret))
            .json(order)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentGatewayError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_request_omits_missing_notes() {
        let order = OrderRequest {
            amount: 50_000,
            currency: "INR".into(),
            receipt: "receipt_order_1".into(),
            payment_capture: 1,
            notes: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["amount"], 50_000);
        assert!(json.get("notes").is_none());
    }

    #[tokio::test]
    async fn unconfigured_gateway_fails_before_any_request() {
        let config = PaymentConfig {
            key_id: None,
            key_secret: None,
            api_base: "http://127.0.0.1:9".into(),
            currency: "INR".into(),
        };
        let client = RazorpayClient::with_client(reqwest::Client::new(), &config);
        let order = OrderRequest {
            amount: 100,
            currency: "INR".into(),
            receipt: "r".into(),
            payment_capture: 1,
            notes: None,
        };
        let err = client.create_order(&order).await.unwrap_err();
        assert!(matches!(err, PaymentGatewayError::NotConfigured));
    }
}
