//! HTTP-level integration tests for subscriptions, tier-gated exclusive
//! content and payment signature verification.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, multipart_auth, post_json, post_json_auth, put_json_auth,
    FilePart, TEST_PAYMENT_SECRET,
};
use fundify_core::payments::sign_payment;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn subscribe(pool: &PgPool, token: &str, page_name: &str, tier: &str) -> StatusCode {
    let body = serde_json::json!({
        "creatorPageName": page_name,
        "durationMonths": 1,
        "tier": tier,
    });
    post_json_auth(common::build_test_app(pool.clone()), "/api/subscriptions", body, token)
        .await
        .status()
}

/// Upload a small PDF at `tier` and return the content id.
async fn upload_content(pool: &PgPool, token: &str, title: &str, tier: &str) -> i64 {
    let response = multipart_auth(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/creator/content",
        token,
        &[
            ("title", title),
            ("description", "Subscriber extra"),
            ("accessTier", tier),
            ("tags", "bonus"),
        ],
        &[FilePart {
            field: "contentFile",
            file_name: "extra.pdf",
            content_type: "application/pdf",
            data: b"%PDF-1.4 test",
        }],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["content"]["contentType"], "pdf");
    json["content"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_conflict_cancel_and_renew(pool: PgPool) {
    common::register_creator(&pool, "sol").await;
    let (_, fan) = common::register_audience(&pool, "ida").await;

    assert_eq!(subscribe(&pool, &fan, "sol", "premium").await, StatusCode::CREATED);
    assert_eq!(subscribe(&pool, &fan, "sol", "premium").await, StatusCode::CONFLICT);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/subscriptions/sol",
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["isSubscribed"], true);
    assert_eq!(json["isExpired"], false);
    assert_eq!(json["subscription"]["tier"], "premium");
    assert_eq!(json["history"][0]["action"], "created");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/subscriptions/sol/cancel",
        serde_json::json!({}),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["subscription"]["status"], "cancelled");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/subscriptions/sol/cancel",
        serde_json::json!({}),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Subscribing again renews the cancelled row.
    assert_eq!(subscribe(&pool, &fan, "sol", "basic").await, StatusCode::OK);

    let response = get_auth(common::build_test_app(pool), "/api/subscriptions", &fan).await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["subscriptions"][0]["status"], "active");
    assert_eq!(json["subscriptions"][0]["tier"], "basic");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_validation(pool: PgPool) {
    common::register_creator(&pool, "val").await;
    let (_, fan) = common::register_audience(&pool, "uli").await;

    assert_eq!(subscribe(&pool, &fan, "val", "platinum").await, StatusCode::BAD_REQUEST);
    assert_eq!(subscribe(&pool, &fan, "missing", "basic").await, StatusCode::NOT_FOUND);

    let body = serde_json::json!({ "creatorPageName": "val", "durationMonths": 0 });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/subscriptions", body, &fan)
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/subscriptions/val",
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_creator_sees_subscriber_counts(pool: PgPool) {
    let (_, creator) = common::register_creator(&pool, "cy").await;
    let (_, a) = common::register_audience(&pool, "ann").await;
    let (_, b) = common::register_audience(&pool, "bea").await;
    subscribe(&pool, &a, "cy", "basic").await;
    subscribe(&pool, &b, "cy", "elite").await;

    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/subscriptions/cy/cancel",
        serde_json::json!({}),
        &b,
    )
    .await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/creator/subscriptions",
        &creator,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["totalCount"], 2);
    assert_eq!(json["activeCount"], 1);
}

// ---------------------------------------------------------------------------
// Exclusive content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_content_is_tier_gated(pool: PgPool) {
    let (_, creator) = common::register_creator(&pool, "tia").await;
    let (_, fan) = common::register_audience(&pool, "gus").await;
    let basic = upload_content(&pool, &creator, "Basic extra", "basic").await;
    let elite = upload_content(&pool, &creator, "Elite extra", "elite").await;

    // Without a subscription.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/audience/content",
        &fan,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["subscribed"], false);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/audience/content/{basic}"),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "SUBSCRIPTION_REQUIRED");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/audience/creator/tia/content",
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Basic subscription unlocks basic content only.
    subscribe(&pool, &fan, "tia", "basic").await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/audience/content",
        &fan,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["subscribed"], true);
    let items = json["content"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], basic);
    assert!(items[0].get("fileUrl").is_none());

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/audience/content/{basic}"),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["views"], 1);
    assert!(json["fileUrl"].as_str().unwrap().contains("/uploads/creators/tia/content/"));

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/audience/content/{elite}"),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/audience/creator/tia/content",
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["creatorPageName"], "tia");
    assert_eq!(json["content"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_likes_and_comments(pool: PgPool) {
    let (_, creator) = common::register_creator(&pool, "lou").await;
    let (_, fan) = common::register_audience(&pool, "kim").await;
    let id = upload_content(&pool, &creator, "Free extra", "free").await;

    // Free content needs no subscription.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/audience/content/{id}/like"),
        serde_json::json!({}),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["likes"], 1);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/audience/content/{id}/comments"),
        serde_json::json!({ "text": "  " }),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/audience/content/{id}/comments"),
        serde_json::json!({ "text": "Lovely work" }),
        &fan,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["comment"]["audienceName"], "kim Backer");

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/audience/content/{id}/comments"),
        &fan,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["text"], "Lovely work");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_creator_manages_own_content(pool: PgPool) {
    let (_, owner) = common::register_creator(&pool, "mo").await;
    let (_, other) = common::register_creator(&pool, "ned").await;
    let id = upload_content(&pool, &owner, "Draft extra", "premium").await;

    let response = multipart_auth(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/creator/content",
        &owner,
        &[("title", "No file"), ("description", "Missing upload")],
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let patch = serde_json::json!({ "accessTier": "elite", "published": false });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/creator/content/{id}"),
        patch.clone(),
        &other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/creator/content/{id}"),
        patch,
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["content"]["accessTier"], "elite");
    assert_eq!(json["content"]["published"], false);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/creator/content",
        &owner,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/creator/content/{id}"),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/creator/content/{id}"),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_payment_signature_verification(pool: PgPool) {
    let signature = sign_payment("order_123", "pay_456", TEST_PAYMENT_SECRET);

    let body = serde_json::json!({
        "razorpay_order_id": "order_123",
        "razorpay_payment_id": "pay_456",
        "razorpay_signature": signature,
    });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/payments/verify", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["payment_id"], "pay_456");

    let body = serde_json::json!({
        "razorpay_order_id": "order_123",
        "razorpay_payment_id": "pay_999",
        "razorpay_signature": signature,
    });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/payments/verify", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool),
        "/api/payments/orders",
        serde_json::json!({ "amount": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
