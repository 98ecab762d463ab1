use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn checkout_lifecycle() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-001").await;

    // Acquire.
    let token = app.lock_document(id).await;
    let doc = app.get(&routes::document(id)).await;
    assert_eq!(doc.body["locked"], true);

    // Update with the token succeeds.
    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": &token, "title": "Herziene titel"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    // Release.
    let res = app
        .post(&routes::document_unlock(id), &json!({"lock": &token}))
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    // The released token no longer authorizes updates.
    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": &token, "title": "Nogmaals herzien"}),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "UNLOCKED");
}

#[tokio::test]
async fn second_acquire_is_rejected() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-002").await;

    app.lock_document(id).await;

    let res = app.post_empty(&routes::document_lock(id)).await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.code(), "ALREADY_LOCKED");
}

#[tokio::test]
async fn concurrent_acquires_have_exactly_one_winner() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-003").await;

    let path = routes::document_lock(id);
    let (a, b, c, d) = tokio::join!(
        app.post_empty(&path),
        app.post_empty(&path),
        app.post_empty(&path),
        app.post_empty(&path),
    );

    let statuses = [a.status, b.status, c.status, d.status];
    let winners = statuses.iter().filter(|&&s| s == 200).count();
    let losers = statuses.iter().filter(|&&s| s == 409).count();
    assert_eq!(winners, 1, "statuses: {statuses:?}");
    assert_eq!(losers, 3, "statuses: {statuses:?}");
}

#[tokio::test]
async fn update_with_wrong_token_is_rejected() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-004").await;

    app.lock_document(id).await;

    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": "0000000000000000000000000000dead", "title": "Kaping"}),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "LOCK_MISMATCH");

    // Missing token is a mismatch too, not "unlocked".
    let res = app
        .patch(&routes::document(id), &json!({"title": "Kaping"}))
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "LOCK_MISMATCH");
}

#[tokio::test]
async fn update_unlocked_document_is_rejected() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-005").await;

    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": "f81d4fae7dec11d0a76500a0c91e6bf6", "title": "Zonder lock"}),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "UNLOCKED");
}

#[tokio::test]
async fn release_with_wrong_token_needs_force() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-006").await;

    let token = app.lock_document(id).await;

    let res = app
        .post(&routes::document_unlock(id), &json!({"lock": "wrong-token"}))
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "LOCK_MISMATCH");

    // Administrative override clears the lock regardless.
    let res = app
        .post(
            &routes::document_unlock(id),
            &json!({"lock": "wrong-token", "force": true}),
        )
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    let doc = app.get(&routes::document(id)).await;
    assert_eq!(doc.body["locked"], false);

    // The forcibly invalidated token is dead.
    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": &token, "title": "Te laat"}),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "UNLOCKED");
}

#[tokio::test]
async fn reacquisition_issues_a_fresh_token() {
    let app = TestApp::spawn().await;
    let id = app.create_document("LCK-007").await;

    let first = app.lock_document(id).await;
    let res = app
        .post(&routes::document_unlock(id), &json!({"lock": &first}))
        .await;
    assert_eq!(res.status, 204);

    let second = app.lock_document(id).await;
    assert_ne!(first, second);

    // The old token does not work against the new lock.
    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": &first, "title": "Oude token"}),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "LOCK_MISMATCH");
}
