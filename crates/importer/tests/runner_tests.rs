//! Integration tests for running several catalogue imports in one process.

use mockito::{Matcher, Server};
use serde_json::json;

use tcpbi_core::config::{Credentials, Endpoints};
use tcpbi_importer::catalog::{INVOICES, TIMESHEETS};
use tcpbi_importer::runner::run_all;
use tcpbi_pipeline::Importer;

fn credentials() -> Credentials {
    Credentials {
        tenant: "contoso".into(),
        client_id: "app-id".into(),
        client_secret: "app-secret".into(),
        powerbi_user: "pbi@contoso.com".into(),
        powerbi_password: "pbi-pass".into(),
        tc_user: "tc-user".into(),
        tc_password: "tc-pass".into(),
    }
}

/// A failing import does not prevent the next one from running.
#[tokio::test]
async fn failure_of_one_import_does_not_stop_the_next() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/contoso/oauth2/token")
        .with_status(200)
        .with_body(r#"{"access_token":"pbi-token"}"#)
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", "/token")
        .with_status(200)
        .with_body("tc-token")
        .expect(2)
        .create_async()
        .await;

    // Timesheets query fails, invoices query succeeds.
    let timesheets_select = server
        .mock("POST", "/select")
        .match_body(Matcher::Regex("From T In Timesheet".into()))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let invoices_select = server
        .mock("POST", "/select")
        .match_body(Matcher::Regex("From I In Invoice".into()))
        .with_status(200)
        .with_body(json!({ "value": [{ "ObjectUuid": "a", "USR_Revenue": 1.5 }] }).to_string())
        .expect(1)
        .create_async()
        .await;

    let list = server
        .mock("GET", "/datasets")
        .with_status(200)
        .with_body(json!({ "value": [{ "id": "d1", "name": "Invoices" }] }).to_string())
        .expect(1)
        .create_async()
        .await;
    server
        .mock("DELETE", "/datasets/d1/tables/Invoices/rows")
        .with_status(200)
        .create_async()
        .await;
    let load = server
        .mock("POST", "/datasets/d1/tables/Invoices/rows")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let importer = Importer::new(credentials(), &Endpoints::single_host(&server.url())).unwrap();
    let report = run_all(&importer, &[TIMESHEETS, INVOICES]).await;

    assert!(!report.all_succeeded());
    assert_eq!(report.failed, vec!["timesheets"]);
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].0, "invoices");
    assert_eq!(report.succeeded[0].1.dataset_id, "d1");
    assert_eq!(report.succeeded[0].1.rows_loaded, 1);

    timesheets_select.assert_async().await;
    invoices_select.assert_async().await;
    list.assert_async().await;
    load.assert_async().await;
}

#[tokio::test]
async fn empty_selection_reports_success() {
    let importer =
        Importer::new(credentials(), &Endpoints::single_host("http://127.0.0.1:1")).unwrap();
    let report = run_all(&importer, &[]).await;
    assert!(report.all_succeeded());
    assert!(report.succeeded.is_empty());
}
