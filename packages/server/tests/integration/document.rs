use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use common::Confidentiality;
use serde_json::json;
use server::policy::PermissiveRelationPolicy;
use uuid::Uuid;

use crate::common::{DOCUMENT_CONTENT, StubCatalog, TestApp, document_body, routes};

#[tokio::test]
async fn create_defaults_confidentiality_from_type_catalog() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::DOCUMENTS, &document_body("DOC-001")).await;
    assert_eq!(res.status, 201, "{}", res.text);

    // The stub catalog registers `internal` on every type.
    assert_eq!(res.body["confidentiality"], "internal");
    assert_eq!(res.body["locked"], false);
    assert_eq!(res.body["usage_rights_indicator"], "unknown");
    assert_eq!(res.body["content_size"], DOCUMENT_CONTENT.len() as i64);
}

#[tokio::test]
async fn create_with_explicit_confidentiality_skips_catalog() {
    // A failing catalog proves the lookup is not made when the level is
    // supplied explicitly.
    let app = TestApp::spawn_with(
        Arc::new(StubCatalog {
            level: Confidentiality::Internal,
            fail: true,
        }),
        Arc::new(PermissiveRelationPolicy),
    )
    .await;

    let mut body = document_body("DOC-002");
    body["confidentiality"] = json!("confidential");
    let res = app.post(routes::DOCUMENTS, &body).await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["confidentiality"], "confidential");
}

#[tokio::test]
async fn catalog_failure_aborts_create_without_partial_state() {
    let app = TestApp::spawn_with(
        Arc::new(StubCatalog {
            level: Confidentiality::Internal,
            fail: true,
        }),
        Arc::new(PermissiveRelationPolicy),
    )
    .await;

    let res = app.post(routes::DOCUMENTS, &document_body("DOC-003")).await;
    assert_eq!(res.status, 502, "{}", res.text);
    assert_eq!(res.code(), "CLASSIFICATION_RESOLUTION_FAILED");

    let list = app.get(routes::DOCUMENTS).await;
    assert_eq!(list.body["total"], 0);
}

#[tokio::test]
async fn create_with_lock_token_is_rejected() {
    let app = TestApp::spawn().await;

    let mut body = document_body("DOC-004");
    body["lock"] = json!("f81d4fae7dec11d0a76500a0c91e6bf6");
    let res = app.post(routes::DOCUMENTS, &body).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "LOCKED_AT_CREATE");
}

#[tokio::test]
async fn create_with_indicator_yes_is_rejected() {
    let app = TestApp::spawn().await;

    let mut body = document_body("DOC-005");
    body["usage_rights_indicator"] = json!("yes");
    let res = app.post(routes::DOCUMENTS, &body).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "MISSING_USAGE_RIGHTS");
}

#[tokio::test]
async fn create_with_signature_while_drafting_is_rejected() {
    let app = TestApp::spawn().await;

    let mut body = document_body("DOC-006");
    body["signature"] = json!({"kind": "digital", "date": "2026-01-10"});
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "VALIDATION_ERROR");

    // The same signature is fine on a definitive document.
    body["status"] = json!("definitive");
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["signature"]["kind"], "digital");
}

#[tokio::test]
async fn duplicate_identification_within_organization_conflicts() {
    let app = TestApp::spawn().await;

    app.create_document("DOC-007").await;
    let res = app.post(routes::DOCUMENTS, &document_body("DOC-007")).await;

    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.code(), "CONSTRAINT_VIOLATION");

    // A different organization can reuse the identification.
    let mut body = document_body("DOC-007");
    body["source_organization"] = json!("987654329");
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 201, "{}", res.text);
}

#[tokio::test]
async fn create_rejects_malformed_fields() {
    let app = TestApp::spawn().await;

    let mut body = document_body("DOC 008");
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 400, "identification with space: {}", res.text);

    body = document_body("DOC-008");
    body["source_organization"] = json!("12345");
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 400, "short RSIN: {}", res.text);

    body = document_body("DOC-008");
    body["content"] = json!("not*base64!");
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 400, "bad base64: {}", res.text);
}

#[tokio::test]
async fn download_round_trips_content() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-009").await;

    let (status, content_type, bytes) = app.get_bytes(&routes::document_download(id)).await;

    assert_eq!(status, 200);
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert_eq!(bytes, DOCUMENT_CONTENT);
}

#[tokio::test]
async fn get_missing_document_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::document(Uuid::new_v4())).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NOT_FOUND");
}

#[tokio::test]
async fn patch_updates_only_supplied_fields() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-010").await;
    let token = app.lock_document(id).await;

    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": token, "title": "Jaarverslag 2025 (herzien)"}),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Jaarverslag 2025 (herzien)");
    // Untouched fields survive.
    assert_eq!(res.body["author"], "Afdeling Communicatie");
    assert_eq!(res.body["language"], "dut");
}

#[tokio::test]
async fn patch_replaces_content_and_size() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-011").await;
    let token = app.lock_document(id).await;

    let new_content = b"replacement bytes";
    let res = app
        .patch(
            &routes::document(id),
            &json!({"lock": token, "content": BASE64.encode(new_content)}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["content_size"], new_content.len() as i64);

    let (status, _, bytes) = app.get_bytes(&routes::document_download(id)).await;
    assert_eq!(status, 200);
    assert_eq!(bytes, new_content);
}

#[tokio::test]
async fn patch_cannot_change_document_type() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-012").await;
    let token = app.lock_document(id).await;

    let res = app
        .patch(
            &routes::document(id),
            &json!({
                "lock": token,
                "document_type": "https://catalog.example.org/api/v1/document-types/2",
            }),
        )
        .await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "IMMUTABLE_FIELD");
}

#[tokio::test]
async fn put_replaces_document_and_clears_omitted_groups() {
    let app = TestApp::spawn().await;

    let mut body = document_body("DOC-013");
    body["status"] = json!("definitive");
    body["integrity"] = json!({
        "algorithm": "sha_256",
        "value": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
        "date": "2026-01-15",
    });
    let res = app.post(routes::DOCUMENTS, &body).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.id();
    assert!(res.body["integrity"].is_object());

    let token = app.lock_document(id).await;

    // Full update without the integrity group clears it.
    let mut replacement = document_body("DOC-013");
    replacement["status"] = json!("definitive");
    replacement["title"] = json!("Besluit 2026");
    replacement["lock"] = json!(token);
    let res = app.put(&routes::document(id), &replacement).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Besluit 2026");
    assert!(res.body["integrity"].is_null());
}

#[tokio::test]
async fn delete_removes_document_and_content() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-014").await;

    let res = app.delete(&routes::document(id)).await;
    assert_eq!(res.status, 204, "{}", res.text);

    assert_eq!(app.get(&routes::document(id)).await.status, 404);
    let (status, _, _) = app.get_bytes(&routes::document_download(id)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn delete_locked_document_is_rejected() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-015").await;
    app.lock_document(id).await;

    let res = app.delete(&routes::document(id)).await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.code(), "ALREADY_LOCKED");
}

#[tokio::test]
async fn delete_related_document_is_rejected() {
    let app = TestApp::spawn().await;
    let id = app.create_document("DOC-016").await;
    app.create_relation(id, "https://cases.example.org/api/v1/cases/1")
        .await;

    let res = app.delete(&routes::document(id)).await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.code(), "CONSTRAINT_VIOLATION");
}
