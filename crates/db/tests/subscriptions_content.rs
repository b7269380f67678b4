//! Integration tests for subscriptions, their history log and exclusive
//! content.

use chrono::{Duration, Utc};
use fundify_core::subscription::{
    ACTION_CANCELLED, ACTION_CREATED, ACTION_RENEWED, SUB_STATUS_ACTIVE, SUB_STATUS_CANCELLED,
};
use fundify_db::models::audience::CreateAudience;
use fundify_db::models::content::{CreateContent, UpdateContent};
use fundify_db::models::creator::CreateCreator;
use fundify_db::models::subscription::{CreateSubscription, RenewSubscription};
use fundify_db::repositories::{AudienceRepo, ContentRepo, CreatorRepo, SubscriptionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_pair(pool: &PgPool) -> (i64, i64) {
    let creator = CreatorRepo::create(
        pool,
        &CreateCreator {
            first_name: "Cara".to_string(),
            last_name: "Maker".to_string(),
            email: "cara@example.com".to_string(),
            password_hash: "hash".to_string(),
            page_name: "cara".to_string(),
            category: None,
            bio: None,
        },
    )
    .await
    .unwrap();
    let audience = AudienceRepo::create(
        pool,
        &CreateAudience {
            first_name: "Abe".to_string(),
            last_name: "Backer".to_string(),
            email: "abe@example.com".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap();
    (creator.id, audience.id)
}

fn new_subscription(creator_id: i64, audience_id: i64, days: i64) -> CreateSubscription {
    let start = Utc::now();
    CreateSubscription {
        audience_id,
        audience_email: "abe@example.com".to_string(),
        creator_id,
        creator_page_name: "cara".to_string(),
        tier: "basic".to_string(),
        start_date: start,
        end_date: start + Duration::days(days),
        payment_id: None,
    }
}

fn new_content(creator_id: i64, tier: &str, published: bool) -> CreateContent {
    CreateContent {
        creator_id,
        page_name: "cara".to_string(),
        title: "Behind the scenes".to_string(),
        description: "Studio footage".to_string(),
        content_type: "video".to_string(),
        file_url: "http://localhost:5001/uploads/x.mp4".to_string(),
        storage_key: "creators/cara/content/x.mp4".to_string(),
        file_size: 1024,
        published,
        access_tier: tier.to_string(),
        tags: vec![],
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_writes_history(pool: PgPool) {
    let (creator_id, audience_id) = seed_pair(&pool).await;
    let sub = SubscriptionRepo::create(&pool, &new_subscription(creator_id, audience_id, 30), 1)
        .await
        .unwrap();
    assert_eq!(sub.status, SUB_STATUS_ACTIVE);

    let history = SubscriptionRepo::history(&pool, sub.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, ACTION_CREATED);
    assert_eq!(history[0].note, "Initial subscription for 1 month(s)");

    let active = SubscriptionRepo::find_active_pair(&pool, audience_id, creator_id)
        .await
        .unwrap();
    assert!(active.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_row_for_pair_conflicts(pool: PgPool) {
    let (creator_id, audience_id) = seed_pair(&pool).await;
    SubscriptionRepo::create(&pool, &new_subscription(creator_id, audience_id, 30), 1)
        .await
        .unwrap();
    let err = SubscriptionRepo::create(&pool, &new_subscription(creator_id, audience_id, 30), 1)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_subscriptions_audience_creator"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_subscription_is_not_active(pool: PgPool) {
    let (creator_id, audience_id) = seed_pair(&pool).await;
    let mut input = new_subscription(creator_id, audience_id, 30);
    input.start_date = Utc::now() - Duration::days(60);
    input.end_date = Utc::now() - Duration::days(30);
    SubscriptionRepo::create(&pool, &input, 1).await.unwrap();

    assert!(SubscriptionRepo::find_active_pair(&pool, audience_id, creator_id)
        .await
        .unwrap()
        .is_none());
    assert!(SubscriptionRepo::active_for_audience(&pool, audience_id)
        .await
        .unwrap()
        .is_empty());
    assert!(SubscriptionRepo::find_pair(&pool, audience_id, creator_id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cancel_then_renew(pool: PgPool) {
    let (creator_id, audience_id) = seed_pair(&pool).await;
    let sub = SubscriptionRepo::create(&pool, &new_subscription(creator_id, audience_id, 30), 1)
        .await
        .unwrap();

    let cancelled = SubscriptionRepo::cancel(&pool, sub.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, SUB_STATUS_CANCELLED);
    assert!(SubscriptionRepo::cancel(&pool, sub.id).await.unwrap().is_none());

    let now = Utc::now();
    let renewed = SubscriptionRepo::renew(
        &pool,
        sub.id,
        &RenewSubscription {
            tier: Some("premium".to_string()),
            start_date: now,
            end_date: now + Duration::days(90),
            payment_id: None,
        },
        3,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renewed.status, SUB_STATUS_ACTIVE);
    assert_eq!(renewed.tier, "premium");

    // The row is active again, so a second renewal of the same period is refused.
    let again = SubscriptionRepo::renew(
        &pool,
        sub.id,
        &RenewSubscription {
            tier: None,
            start_date: now,
            end_date: now + Duration::days(30),
            payment_id: None,
        },
        1,
    )
    .await
    .unwrap();
    assert!(again.is_none());

    let actions: Vec<String> = SubscriptionRepo::history(&pool, sub.id)
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.action)
        .collect();
    assert_eq!(actions, vec![ACTION_CREATED, ACTION_CANCELLED, ACTION_RENEWED]);

    assert_eq!(SubscriptionRepo::list_for_creator(&pool, creator_id).await.unwrap().len(), 1);
    assert_eq!(SubscriptionRepo::list_for_audience(&pool, audience_id).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Exclusive content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_content_listing_and_engagement(pool: PgPool) {
    let (creator_id, audience_id) = seed_pair(&pool).await;
    let published = ContentRepo::create(&pool, &new_content(creator_id, "basic", true))
        .await
        .unwrap();
    ContentRepo::create(&pool, &new_content(creator_id, "elite", false))
        .await
        .unwrap();

    assert_eq!(ContentRepo::list_by_creator(&pool, creator_id).await.unwrap().len(), 2);
    let visible = ContentRepo::list_published_for_creators(&pool, &[creator_id])
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, published.id);

    let viewed = ContentRepo::increment_views(&pool, published.id).await.unwrap().unwrap();
    assert_eq!(viewed.views, 1);
    assert_eq!(ContentRepo::add_like(&pool, published.id).await.unwrap(), Some(1));
    assert_eq!(ContentRepo::add_like(&pool, published.id).await.unwrap(), Some(2));

    ContentRepo::add_comment(&pool, published.id, audience_id, "Abe Backer", "Great!")
        .await
        .unwrap();
    let comments = ContentRepo::list_comments(&pool, published.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "Great!");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_content_update_and_delete(pool: PgPool) {
    let (creator_id, _) = seed_pair(&pool).await;
    let content = ContentRepo::create(&pool, &new_content(creator_id, "basic", true))
        .await
        .unwrap();

    let updated = ContentRepo::update(
        &pool,
        content.id,
        &UpdateContent {
            access_tier: Some("premium".to_string()),
            published: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.access_tier, "premium");
    assert!(!updated.published);
    assert_eq!(updated.title, content.title);

    let err = ContentRepo::update(
        &pool,
        content.id,
        &UpdateContent {
            access_tier: Some("platinum".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_exclusive_content_tier"));

    assert!(ContentRepo::delete(&pool, content.id).await.unwrap());
    assert!(ContentRepo::find_by_id(&pool, content.id).await.unwrap().is_none());
}
