//! Console integration tests against a mock management server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gam_api::types::BandwidthCreate;
use gam_api::{ApiClient, TransportConfig};
use gam_core::{Console, ListController, Navigation, Resource};

fn console_for(server: &MockServer) -> Arc<Console> {
    let base = Url::parse(&server.uri()).unwrap();
    let api = ApiClient::new(base, &TransportConfig::default()).unwrap();
    Arc::new(Console::new(api))
}

fn device_json(id: i64, serial: &str) -> serde_json::Value {
    json!({
        "id": id,
        "serial": serial,
        "mac": "00:11:22:33:44:55",
        "ip": "10.0.0.2",
        "name": null,
        "vendor": "Positron",
        "product_class": "GAM-12-M",
        "hardware_version": "2",
        "software_version": "1.8.0",
        "online": true,
        "read_only": false,
        "last_seen": null
    })
}

#[tokio::test]
async fn repeated_list_renders_hit_the_server_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gam/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [device_json(1, "GM1001")],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let list = ListController::new(Resource::Devices, Vec::new());

    let first = console.list_devices(&list).await.unwrap();
    let second = console.list_devices(&list).await.unwrap();
    assert_eq!(first.total, 1);
    assert_eq!(second.rows[0].serial, "GM1001");
}

#[tokio::test]
async fn delete_device_navigates_to_list_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gam/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [device_json(1, "GM1001"), device_json(2, "GM1002")],
            "total": 2
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/gam/devices/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let list = ListController::new(Resource::Devices, Vec::new());

    console.list_devices(&list).await.unwrap();
    let nav = console.delete_device(1).await.unwrap();
    assert_eq!(nav, Navigation::List(Resource::Devices));

    // The cached page was invalidated; this render goes to the server.
    console.list_devices(&list).await.unwrap();
}

#[tokio::test]
async fn device_scoped_tabs_are_invalidated_by_sync() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gam/devices/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_json(1, "GM1001")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/gam/devices/1/ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "device_id": 1,
            "index": 1,
            "link_up": true,
            "speed_mbps": 1000,
            "sfp_vendor": null,
            "sfp_serial": null,
            "sfp_part_number": null
        }])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/gam/devices/1/sync"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    console.device_ports(1).await.unwrap();
    console.device_ports(1).await.unwrap(); // cached
    console.sync_device(1).await.unwrap();
    console.device_ports(1).await.unwrap(); // refetched
}

#[tokio::test]
async fn create_bandwidth_defaults_to_first_device() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gam/devices"))
        .and(query_param("page_size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [device_json(42, "GM1042")],
            "total": 7
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/bandwidths"))
        .and(body_partial_json(json!({"device_id": 42})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "name": "resi-100",
            "device_id": 42,
            "ds_bw": 100,
            "us_bw": 20,
            "synced": false,
            "deleted": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let created = console
        .create_bandwidth(BandwidthCreate {
            name: "resi-100".into(),
            ds_bw: 100,
            us_bw: 20,
            device_id: None,
        })
        .await
        .unwrap();
    assert_eq!(created.device_id, Some(42));
    assert_eq!(created.rate_summary(), "100/20");
}

#[tokio::test]
async fn sync_is_refused_when_device_is_offline() {
    let server = MockServer::start().await;
    let mut offline = device_json(3, "GM1003");
    offline["online"] = json!(false);
    Mock::given(method("GET"))
        .and(path("/api/gam/devices/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offline))
        .expect(1)
        .mount(&server)
        .await;
    // No POST mock: the sync request must never go out.

    let console = console_for(&server);
    let err = console.sync_device(3).await.unwrap_err();
    assert!(matches!(err, gam_core::CoreError::Rejected { .. }));
    assert!(err.to_string().contains("offline"));
}

#[tokio::test]
async fn provision_is_refused_for_read_only_device() {
    let server = MockServer::start().await;
    let mut frozen = device_json(4, "GM1004");
    frozen["read_only"] = json!(true);
    Mock::given(method("GET"))
        .and(path("/api/gam/devices/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(frozen))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let err = console.provision_endpoints(4).await.unwrap_err();
    assert!(matches!(err, gam_core::CoreError::Rejected { .. }));
    assert!(err.to_string().contains("read-only"));
}

#[tokio::test]
async fn stale_persisted_session_is_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "session expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let err = console
        .restore(secrecy::SecretString::from("dead-session"), "admin".into())
        .await
        .unwrap_err();
    assert!(matches!(err, gam_core::CoreError::AuthenticationFailed { .. }));
    assert!(!console.session().has_session());
    assert!(!console.session().state().is_logged_in());
}

#[tokio::test]
async fn server_error_during_restore_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "internal error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let err = console
        .restore(secrecy::SecretString::from("maybe-alive"), "admin".into())
        .await
        .unwrap_err();
    // The session was not proven dead, so it survives for a retry.
    assert!(!matches!(err, gam_core::CoreError::AuthenticationFailed { .. }));
    assert!(console.session().has_session());
}
