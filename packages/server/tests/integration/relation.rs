use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::common::{RejectAllPolicy, StubCatalog, TestApp, routes};

#[tokio::test]
async fn create_and_get_relation() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("REL-001").await;

    let res = app
        .post(
            routes::RELATIONS,
            &json!({
                "document": doc,
                "object": "https://cases.example.org/api/v1/cases/42",
                "object_type": "case",
                "relation_kind": "belongs_to",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.id();

    let res = app.get(&routes::relation(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["object_type"], "case");
    assert_eq!(res.body["relation_kind"], "belongs_to");
    assert_eq!(res.body["document"], doc.to_string());
}

#[tokio::test]
async fn duplicate_relation_is_rejected() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("REL-002").await;
    let object = "https://cases.example.org/api/v1/cases/7";

    app.create_relation(doc, object).await;

    let res = app
        .post(
            routes::RELATIONS,
            &json!({
                "document": doc,
                "object": object,
                "object_type": "case",
                "relation_kind": "establishes",
            }),
        )
        .await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.code(), "DUPLICATE_RELATION");
}

#[tokio::test]
async fn same_object_may_relate_to_different_documents() {
    let app = TestApp::spawn().await;
    let doc_a = app.create_document("REL-003A").await;
    let doc_b = app.create_document("REL-003B").await;
    let object = "https://cases.example.org/api/v1/cases/9";

    app.create_relation(doc_a, object).await;
    app.create_relation(doc_b, object).await;
}

#[tokio::test]
async fn relation_fields_are_immutable() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("REL-004").await;
    let object = "https://cases.example.org/api/v1/cases/11";
    let id = app.create_relation(doc, object).await;

    for (field, value) in [
        ("object", json!("https://cases.example.org/api/v1/cases/12")),
        ("object_type", json!("decision")),
        ("relation_kind", json!("establishes")),
        ("document", json!(Uuid::new_v4())),
    ] {
        let res = app.patch(&routes::relation(id), &json!({field: value})).await;
        assert_eq!(res.status, 400, "field {field}: {}", res.text);
        assert_eq!(res.code(), "IMMUTABLE_FIELD", "field {field}");
    }

    // Re-supplying the stored values is a no-op, not a violation.
    let res = app
        .patch(
            &routes::relation(id),
            &json!({"object": object, "object_type": "case"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
}

#[tokio::test]
async fn policy_rejection_maps_to_invalid_relation_kind() {
    let app = TestApp::spawn_with(Arc::new(StubCatalog::default()), Arc::new(RejectAllPolicy))
        .await;
    let doc = app.create_document("REL-005").await;

    let res = app
        .post(
            routes::RELATIONS,
            &json!({
                "document": doc,
                "object": "https://cases.example.org/api/v1/cases/13",
                "object_type": "case",
                "relation_kind": "belongs_to",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "INVALID_RELATION_KIND");
}

#[tokio::test]
async fn relation_requires_existing_document() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::RELATIONS,
            &json!({
                "document": Uuid::new_v4(),
                "object": "https://cases.example.org/api/v1/cases/14",
                "object_type": "case",
                "relation_kind": "belongs_to",
            }),
        )
        .await;
    assert_eq!(res.status, 404, "{}", res.text);
    assert_eq!(res.code(), "NOT_FOUND");
}

#[tokio::test]
async fn delete_relation_frees_the_pair() {
    let app = TestApp::spawn().await;
    let doc = app.create_document("REL-006").await;
    let object = "https://cases.example.org/api/v1/cases/15";
    let id = app.create_relation(doc, object).await;

    let res = app.delete(&routes::relation(id)).await;
    assert_eq!(res.status, 204, "{}", res.text);
    assert_eq!(app.get(&routes::relation(id)).await.status, 404);

    // The pair can be related again after deletion.
    app.create_relation(doc, object).await;
}
