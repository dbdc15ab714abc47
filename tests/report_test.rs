mod common;

use serde_json::Value;

fn is_report_id(id: &str) -> bool {
    id.len() == 16
        && id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[tokio::test]
async fn submit_report_returns_created_id() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reports"))
        .json(&serde_json::json!({
            "target": 42,
            "reporter": 7,
            "context": "spam",
            "reason": "scamming"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());
    let report_id = body["report_id"].as_str().unwrap();
    assert!(
        is_report_id(report_id),
        "Expected 16 lowercase hex chars, got '{}'",
        report_id
    );
}

#[tokio::test]
async fn submitted_report_appears_once_in_pending() {
    let app = common::spawn_app().await;
    let report_id = common::submit_report(&app, 42, 7).await;

    let resp = app.client.get(app.url("/reports")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let pending = body["pending"].as_array().unwrap();
    let actioned = body["actioned"].as_array().unwrap();

    assert_eq!(pending.len(), 1);
    assert!(actioned.is_empty());
    assert_eq!(pending[0]["id"], report_id.as_str());
    assert_eq!(pending[0]["status"], "pending");
    assert_eq!(pending[0]["target"], 42);
    assert_eq!(pending[0]["reporter"], 7);
    assert!(pending[0].get("actionedAt").is_none());
    assert!(pending[0]["timestamp"].is_string());
}

#[tokio::test]
async fn submitted_report_captures_source_address() {
    let app = common::spawn_app().await;
    common::submit_report(&app, 42, 7).await;

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["pending"][0]["sourceAddress"], "127.0.0.1");
}

#[tokio::test]
async fn report_ids_are_unique() {
    let app = common::spawn_app().await;

    let mut seen = std::collections::HashSet::new();
    for i in 0..20 {
        let id = common::submit_report(&app, 100 + i, 7).await;
        assert!(seen.insert(id), "duplicate report id issued");
    }
}

#[tokio::test]
async fn pending_keeps_submission_order() {
    let app = common::spawn_app().await;

    let first = common::submit_report(&app, 1, 7).await;
    let second = common::submit_report(&app, 2, 7).await;
    let third = common::submit_report(&app, 3, 7).await;

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = body["pending"]
        .as_array()
        .unwrap()
        .iter()
        .map(|report| report["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, [first.as_str(), second.as_str(), third.as_str()]);
}

#[tokio::test]
async fn submit_trims_context_and_reason() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reports"))
        .json(&serde_json::json!({
            "target": 42,
            "reporter": 7,
            "context": "  spam  ",
            "reason": " scamming "
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["pending"][0]["context"], "spam");
    assert_eq!(body["pending"][0]["reason"], "scamming");
}

#[tokio::test]
async fn submit_without_target_is_rejected() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reports"))
        .json(&serde_json::json!({
            "reporter": 7,
            "context": "spam"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("target"));
}

#[tokio::test]
async fn submit_without_context_is_rejected() {
    let app = common::spawn_app().await;

    for payload in [
        serde_json::json!({ "target": 42, "reporter": 7 }),
        serde_json::json!({ "target": 42, "reporter": 7, "context": "" }),
    ] {
        let resp = app
            .client
            .post(app.url("/reports"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("context"));
    }

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["pending"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn submit_without_reason_is_accepted() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reports"))
        .json(&serde_json::json!({
            "target": 42,
            "reporter": 7,
            "context": "spam"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["pending"][0].get("reason").is_none());
}

#[tokio::test]
async fn approve_moves_report_to_actioned() {
    let app = common::spawn_app().await;
    let report_id = common::submit_report(&app, 42, 7).await;

    let resp = common::action_report(&app, &report_id, "approved").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());
    assert_eq!(body["message"], "Report approved");

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["pending"].as_array().unwrap().is_empty());
    let actioned = body["actioned"].as_array().unwrap();
    assert_eq!(actioned.len(), 1);
    assert_eq!(actioned[0]["id"], report_id.as_str());
    assert_eq!(actioned[0]["status"], "approved");
    assert!(actioned[0]["actionedAt"].is_string());
}

#[tokio::test]
async fn deny_moves_report_to_actioned() {
    let app = common::spawn_app().await;
    let report_id = common::submit_report(&app, 42, 7).await;

    let resp = common::action_report(&app, &report_id, "denied").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Report denied");

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["actioned"][0]["status"], "denied");
}

#[tokio::test]
async fn action_unknown_id_is_not_found() {
    let app = common::spawn_app().await;

    let resp = common::action_report(&app, "deadbeef00000000", "approved").await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn action_is_not_repeatable() {
    let app = common::spawn_app().await;
    let report_id = common::submit_report(&app, 42, 7).await;

    let resp = common::action_report(&app, &report_id, "denied").await;
    assert_eq!(resp.status(), 200);

    // The id now lives in the actioned collection and no longer resolves.
    let resp = common::action_report(&app, &report_id, "approved").await;
    assert_eq!(resp.status(), 404);

    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["actioned"].as_array().unwrap().len(), 1);
    assert_eq!(body["actioned"][0]["status"], "denied");
}

#[tokio::test]
async fn action_with_invalid_decision_is_rejected() {
    let app = common::spawn_app().await;
    let report_id = common::submit_report(&app, 42, 7).await;

    let resp = common::action_report(&app, &report_id, "banhammer").await;
    assert_eq!(resp.status(), 400);

    // The report stays pending.
    let body: Value = app
        .client
        .get(app.url("/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["pending"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn action_with_missing_fields_is_rejected() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reports/action"))
        .json(&serde_json::json!({ "action": "approved" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = app
        .client
        .post(app.url("/reports/action"))
        .json(&serde_json::json!({ "reportId": "deadbeef00000000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}
