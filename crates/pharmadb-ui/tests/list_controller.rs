//! List page controller against a wiremock store.

mod common;

use std::time::Duration;

use pharmadb_core::{Coordinate, NewPharmacy};
use pharmadb_ui::{messages, ListController, ListPhase, MutationOutcome};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{record_json, test_store, RecordingPrompter};

#[tokio::test]
async fn mount_loads_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(1, "One"), record_json(2, "Two")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = ListController::new(test_store(&server.uri()), RecordingPrompter::default());
    assert_eq!(controller.view().phase, ListPhase::Idle);

    controller.mount().await;

    let view = controller.view();
    assert_eq!(view.phase, ListPhase::Loaded);
    assert!(!view.is_loading());
    assert_eq!(view.records.len(), 2);
    assert_eq!(view.records[1].name, "Two");
}

#[tokio::test]
async fn list_failure_on_first_load_keeps_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let controller = ListController::new(test_store(&server.uri()), RecordingPrompter::default());
    controller.mount().await;

    let view = controller.view();
    assert_eq!(view.error(), Some(messages::LOAD_FAILED));
    assert!(!view.is_loading());
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn transport_failure_reaches_error_state() {
    let controller = ListController::new(
        test_store("http://127.0.0.1:1"),
        RecordingPrompter::default(),
    );
    controller.mount().await;

    let view = controller.view();
    assert_eq!(view.error(), Some(messages::LOAD_FAILED));
    assert!(!view.is_loading());
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(1, "One")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = ListController::new(test_store(&server.uri()), RecordingPrompter::default());
    controller.mount().await;
    controller.refresh().await;

    let view = controller.view();
    assert_eq!(view.error(), Some(messages::LOAD_FAILED));
    assert_eq!(view.records.len(), 1, "last good list must stay displayed");
}

#[tokio::test]
async fn declined_delete_sends_nothing_and_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(1, "One")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let prompter = RecordingPrompter::answering(false);
    let controller = ListController::new(test_store(&server.uri()), prompter.clone());
    controller.mount().await;
    let before = controller.view();

    let outcome = controller.delete(1).await;

    assert_eq!(outcome, MutationOutcome::Declined);
    assert_eq!(prompter.confirm_count(), 1);
    assert_eq!(controller.view(), before);
    assert!(prompter.notices().is_empty());
}

#[tokio::test]
async fn confirmed_delete_refetches_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(1, "One"), record_json(2, "Two")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/pharmacies/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(2, "Two")])))
        .mount(&server)
        .await;

    let prompter = RecordingPrompter::answering(true);
    let controller = ListController::new(test_store(&server.uri()), prompter.clone());
    controller.mount().await;

    let outcome = controller.delete(1).await;

    assert_eq!(outcome, MutationOutcome::Completed);
    let view = controller.view();
    assert_eq!(view.phase, ListPhase::Loaded);
    assert!(view.records.iter().all(|r| r.id != 1));
    assert_eq!(view.records.len(), 1);
    assert_eq!(prompter.notices(), vec![messages::DELETED.to_string()]);
}

#[tokio::test]
async fn delete_of_missing_id_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(1, "One")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/pharmacies/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let controller = ListController::new(
        test_store(&server.uri()),
        RecordingPrompter::answering(true),
    );
    controller.mount().await;

    let outcome = controller.delete(42).await;

    assert_eq!(outcome, MutationOutcome::Failed);
    let view = controller.view();
    assert_eq!(view.error(), Some(messages::DELETE_FAILED));
    assert!(!view.is_loading());
    assert_eq!(view.records.len(), 1, "delete failure must not patch the list");
}

#[tokio::test]
async fn register_refetches_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(201).set_body_json(record_json(9, "New")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record_json(9, "New")])))
        .mount(&server)
        .await;

    let prompter = RecordingPrompter::default();
    let controller = ListController::new(test_store(&server.uri()), prompter.clone());
    controller.mount().await;

    let record = NewPharmacy::new("New", 120.5, Coordinate::new(37.5, 127.0), None).unwrap();
    let outcome = controller.register(&record).await;

    assert_eq!(outcome, MutationOutcome::Completed);
    assert_eq!(controller.view().records[0].id, 9);
    assert_eq!(prompter.notices(), vec![messages::REGISTERED.to_string()]);
}

#[tokio::test]
async fn completion_after_unmount_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record_json(1, "One")]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let controller = ListController::new(test_store(&server.uri()), RecordingPrompter::default());

    tokio::join!(controller.mount(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.unmount();
    });

    let view = controller.view();
    assert!(
        view.records.is_empty(),
        "unmounted controller must not commit late results"
    );
    assert_eq!(view.phase, ListPhase::Idle);
}

#[tokio::test]
async fn delete_on_unmounted_page_neither_prompts_nor_sends() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let prompter = RecordingPrompter::answering(true);
    let controller = ListController::new(test_store(&server.uri()), prompter.clone());

    assert_eq!(controller.delete(1).await, MutationOutcome::Stale);
    assert_eq!(prompter.confirm_count(), 0);
    assert!(prompter.notices().is_empty());
}

#[tokio::test]
async fn register_after_unmount_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pharmacies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(record_json(9, "New")))
        .expect(0)
        .mount(&server)
        .await;

    let controller = ListController::new(test_store(&server.uri()), RecordingPrompter::default());
    controller.mount().await;
    controller.unmount();

    let record = NewPharmacy::new("New", 120.5, Coordinate::new(37.5, 127.0), None).unwrap();
    assert_eq!(controller.register(&record).await, MutationOutcome::Stale);
    assert!(controller.view().records.is_empty());
}
