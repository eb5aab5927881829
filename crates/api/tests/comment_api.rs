//! HTTP-level integration tests for comment threads: attachment
//! resolution, reply inheritance, depth-limited fetch, and cascade delete.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_production_item, create_sample_item, delete, get, post_json, put_json,
};
use sqlx::PgPool;

/// Create a comment through the API, asserting success, returning its id.
async fn create_comment(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/comments", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Attachment resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_attaches_to_one_entity(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({
            "content": "Looking sharp",
            "production_item_id": product_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["production_item_id"], product_id);
    assert!(json["data"]["sample_item_id"].is_null());
    assert!(json["data"]["parent_comment_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_without_attachment_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({ "content": "floating note" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_with_two_attachments_is_rejected(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;
    let item_id =
        create_sample_item(&pool, product_id, "PROTOTYPE", Some("BLACK"), Some("M"), "A").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({
            "content": "ambiguous",
            "production_item_id": product_id,
            "sample_item_id": item_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("ambiguous"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_on_missing_entity_is_referential_integrity_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({ "content": "ghost", "sample_item_id": 999_999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Reply inheritance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn replies_inherit_the_parents_entity_attachment(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;
    let item_id =
        create_sample_item(&pool, product_id, "PROTOTYPE", Some("BLACK"), Some("M"), "A").await;

    let top = create_comment(
        &pool,
        serde_json::json!({ "content": "collar looks off", "sample_item_id": item_id }),
    )
    .await;

    // A reply names only its parent; the entity attachment is copied.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({ "content": "agreed", "parent_comment_id": top }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let reply = body_json(response).await;
    assert_eq!(reply["data"]["sample_item_id"], item_id);
    assert_eq!(reply["data"]["parent_comment_id"], top);

    // A deep reply (reply to a reply) inherits it too.
    let reply_id = reply["data"]["id"].as_i64().unwrap();
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({ "content": "same", "parent_comment_id": reply_id }),
    )
    .await;
    let deep = body_json(response).await;
    assert_eq!(deep["data"]["sample_item_id"], item_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reply_to_missing_parent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({ "content": "orphan", "parent_comment_id": 999_999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Thread fetch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn thread_nests_replies_to_the_requested_depth(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;

    // Chain: top -> r1 -> r2 -> r3 -> r4.
    let top = create_comment(
        &pool,
        serde_json::json!({ "content": "level 0", "production_item_id": product_id }),
    )
    .await;
    let mut parent = top;
    for level in 1..=4 {
        parent = create_comment(
            &pool,
            serde_json::json!({ "content": format!("level {level}"), "parent_comment_id": parent }),
        )
        .await;
    }

    // Default depth is 3: levels 1-3 are nested, level 4 is not fetched.
    let app = common::build_test_app(pool.clone());
    let response = get(
        app,
        &format!("/api/v1/comments?entity_type=PRODUCTION_ITEM&entity_id={product_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let level1 = &json["data"][0]["replies"][0];
    let level3 = &level1["replies"][0]["replies"][0];
    assert_eq!(level3["content"], "level 3");
    assert!(level3["replies"].as_array().unwrap().is_empty());

    // Asking for depth 4 surfaces the last reply.
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/comments?entity_type=PRODUCTION_ITEM&entity_id={product_id}&depth=4"),
    )
    .await;
    let json = body_json(response).await;
    let level4 = &json["data"][0]["replies"][0]["replies"][0]["replies"][0]["replies"][0];
    assert_eq!(level4["content"], "level 4");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn thread_for_unknown_entity_type_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/comments?entity_type=WIDGET&entity_id=1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_content_in_place(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;
    let id = create_comment(
        &pool,
        serde_json::json!({ "content": "typo here", "production_item_id": product_id }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/comments/{id}"),
        serde_json::json!({ "content": "fixed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "fixed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_comment_deletes_its_replies(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;
    let top = create_comment(
        &pool,
        serde_json::json!({ "content": "thread root", "production_item_id": product_id }),
    )
    .await;
    create_comment(
        &pool,
        serde_json::json!({ "content": "reply", "parent_comment_id": top }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/comments/{top}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/comments?entity_type=PRODUCTION_ITEM&entity_id={product_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_content_is_rejected(pool: PgPool) {
    let product_id = create_production_item(&pool, "Denim Jacket X").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comments",
        serde_json::json!({ "content": "   ", "production_item_id": product_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
