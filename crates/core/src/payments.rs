//! Payment gateway helpers (Razorpay order amounts and signature checks).

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Minor units per whole currency unit (paise per rupee).
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

/// Convert a whole-unit amount to the gateway's minor units.
///
/// Returns `None` on overflow.
pub fn to_minor_units(amount: i64) -> Option<i64> {
    amount.checked_mul(MINOR_UNITS_PER_UNIT)
}

/// Build a receipt identifier such as `order_rcptid_3f9a0c1b2d4e5f60`.
pub fn receipt_id(prefix: &str) -> String {
    let random: [u8; 8] = rand::random();
    format!("{prefix}_{}", hex::encode(random))
}

/// Verify a payment signature returned by the checkout widget.
///
/// The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 using the
/// account secret and sends the lowercase hex digest. The comparison is
/// constant-time; malformed hex simply fails verification.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Compute the hex signature for an order/payment pair. Used by tests and
/// by tooling that simulates the checkout callback.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
