use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn creating_rights_flips_indicator_to_yes() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-001").await;

    let res = app
        .post(
            routes::USAGE_RIGHTS,
            &json!({
                "document": doc,
                "start_date": "2026-01-01",
                "end_date": "2026-12-31",
                "conditions": "Alleen voor intern gebruik",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["document"], doc.to_string());

    let doc_res = app.get(&routes::document(doc)).await;
    assert_eq!(doc_res.body["usage_rights_indicator"], "yes");
}

#[tokio::test]
async fn indicator_cannot_be_cleared_while_rights_exist() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-002").await;
    app.create_usage_rights(doc).await;

    let token = app.lock_document(doc).await;

    for indicator in ["no", "unknown"] {
        let res = app
            .patch(
                &routes::document(doc),
                &json!({"lock": &token, "usage_rights_indicator": indicator}),
            )
            .await;
        assert_eq!(res.status, 400, "indicator {indicator}: {}", res.text);
        assert_eq!(res.code(), "USAGE_RIGHTS_CONFLICT", "indicator {indicator}");
    }
}

#[tokio::test]
async fn indicator_cannot_be_set_yes_directly() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-003").await;
    let token = app.lock_document(doc).await;

    let res = app
        .patch(
            &routes::document(doc),
            &json!({"lock": token, "usage_rights_indicator": "yes"}),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "MISSING_USAGE_RIGHTS");
}

#[tokio::test]
async fn indicator_yes_passes_while_rights_exist() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-004").await;
    app.create_usage_rights(doc).await;

    let token = app.lock_document(doc).await;

    // Confirming the derived value is allowed; only contradicting it is not.
    let res = app
        .patch(
            &routes::document(doc),
            &json!({"lock": token, "usage_rights_indicator": "yes", "title": "Bijgewerkt"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["usage_rights_indicator"], "yes");
}

#[tokio::test]
async fn deleting_last_rights_resets_indicator() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-005").await;
    let first = app.create_usage_rights(doc).await;
    let second = app.create_usage_rights(doc).await;

    let res = app.delete(&routes::usage_rights(first)).await;
    assert_eq!(res.status, 204, "{}", res.text);

    // One record remains, so the indicator stays `yes`.
    let doc_res = app.get(&routes::document(doc)).await;
    assert_eq!(doc_res.body["usage_rights_indicator"], "yes");

    let res = app.delete(&routes::usage_rights(second)).await;
    assert_eq!(res.status, 204, "{}", res.text);

    let doc_res = app.get(&routes::document(doc)).await;
    assert_eq!(doc_res.body["usage_rights_indicator"], "unknown");
}

#[tokio::test]
async fn document_reference_is_immutable() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-006").await;
    let other = app.create_document("GBR-006B").await;
    let id = app.create_usage_rights(doc).await;

    let res = app
        .patch(&routes::usage_rights(id), &json!({"document": other}))
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "IMMUTABLE_FIELD");

    // The validity period and conditions are mutable.
    let res = app
        .patch(
            &routes::usage_rights(id),
            &json!({"end_date": "2027-06-30", "conditions": "Naamsvermelding verplicht"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["end_date"], "2027-06-30");
}

#[tokio::test]
async fn validity_period_must_be_ordered() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("GBR-007").await;

    let res = app
        .post(
            routes::USAGE_RIGHTS,
            &json!({
                "document": doc,
                "start_date": "2026-06-01",
                "end_date": "2026-01-01",
                "conditions": "Onmogelijke periode",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn rights_require_existing_document() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::USAGE_RIGHTS,
            &json!({
                "document": Uuid::new_v4(),
                "start_date": "2026-01-01",
                "conditions": "n.v.t.",
            }),
        )
        .await;
    assert_eq!(res.status, 404, "{}", res.text);
}
