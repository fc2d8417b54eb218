//! End-to-end dashboard flows over the HTTP adapter and a loopback stub.

use std::sync::Arc;
use std::time::Duration;

use records_console::domain::{
    ActionError, ActionOutcome, DashboardController, DashboardSettings, FormField, Mode,
    RefreshFailurePolicy, Severity,
};
use records_console::outbound::http::HttpRecordService;
use records_console::test_support::MutableClock;
use rstest::rstest;
use serde_json::json;

mod support;

use support::stub_server::{StubResponse, StubServer};

fn record(id: &str, name: &str, city: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@x.com", name.to_lowercase()),
        "age": 30,
        "phone": "5551234567",
        "city": city,
        "idNumber": format!("ID-{name}")
    })
}

fn dashboard(
    server: &StubServer,
    settings: DashboardSettings,
) -> DashboardController<HttpRecordService> {
    let service =
        HttpRecordService::new(server.base_url(), Duration::from_secs(5)).expect("client builds");
    DashboardController::new(
        Arc::new(service),
        Arc::new(MutableClock::at_fixture_time()),
        settings,
    )
}

#[rstest]
#[tokio::test]
async fn create_sends_one_post_then_one_list() {
    let server = StubServer::start([
        StubResponse::new(201, ""),
        StubResponse::json(200, &json!([record("1", "Ana", "Lima")])),
    ])
    .await;
    let dashboard = dashboard(&server, DashboardSettings::default());
    for (field, value) in FormField::ALL
        .into_iter()
        .zip(["Ana", "ana@x.com", "30", "5551234567", "Lima", "A1"])
    {
        dashboard.set_field_value(field, value);
    }

    let outcome = dashboard.submit().await.expect("create applied");

    assert_eq!(outcome, ActionOutcome::Applied);
    let calls: Vec<_> = server
        .requests()
        .into_iter()
        .map(|request| (request.method, request.path))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("POST".to_owned(), "/api/add".to_owned()),
            ("GET".to_owned(), "/api/details".to_owned()),
        ]
    );
    assert_eq!(dashboard.view().records.len(), 1);
}

#[rstest]
#[tokio::test]
async fn invalid_form_never_reaches_the_server() {
    let server = StubServer::start([]).await;
    let dashboard = dashboard(&server, DashboardSettings::default());
    dashboard.set_field_value(FormField::Age, "-3");

    let error = dashboard.submit().await.expect_err("validation blocks");

    assert!(matches!(error, ActionError::Invalid(_)));
    assert!(server.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn edit_update_round_trip() {
    let server = StubServer::start([
        StubResponse::json(200, &json!([record("7", "Bea", "Lima")])),
        StubResponse::new(200, ""),
        StubResponse::json(200, &json!([record("7", "Bea", "Cusco")])),
    ])
    .await;
    let dashboard = dashboard(&server, DashboardSettings::default());
    dashboard.load().await.expect("initial load");
    let first = dashboard.record_at(1).expect("one record");

    dashboard.enter_edit_mode(&first);
    dashboard.set_field_value(FormField::City, "Cusco");
    dashboard.update().await.expect("update applied");

    assert_eq!(dashboard.mode(), Mode::Create);
    let requests = server.requests();
    assert_eq!(requests[1].method, "PUT");
    assert_eq!(requests[1].path, "/api/details/7");
    assert_eq!(requests[1].json()["city"], "Cusco");
    assert_eq!(
        dashboard.record_at(1).expect("refreshed").fields().city,
        "Cusco"
    );
}

#[rstest]
#[tokio::test]
async fn failed_refresh_notifies_only_when_configured() {
    let server = StubServer::start([StubResponse::new(503, "maintenance")]).await;
    let settings = DashboardSettings {
        refresh_failures: RefreshFailurePolicy::Notify,
        ..DashboardSettings::default()
    };
    let dashboard = dashboard(&server, settings);

    dashboard.load().await.expect_err("load fails");

    let notification = dashboard.notification().expect("failure notified");
    assert_eq!(notification.severity(), Severity::Error);
    assert!(notification.message().starts_with("Error occurred: status 503"));
    assert!(dashboard.view().records.is_empty());
}
