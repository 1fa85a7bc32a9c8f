// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gam_api::types::{BandwidthCreate, FirmwareUpload, ListQuery};
use gam_api::{ApiClient, Error, ExportResource};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let url = server.uri().parse().expect("mock server URL");
    let client = ApiClient::with_client(reqwest::Client::new(), url);
    (server, client)
}

fn device_json(id: i64, serial: &str, online: bool) -> serde_json::Value {
    json!({
        "id": id,
        "serial": serial,
        "mac": "00:11:22:33:44:55",
        "ip": "10.0.0.2",
        "name": "rack-1",
        "vendor": "Positron",
        "product_class": "GAM-12-M",
        "hardware_version": "1.0",
        "software_version": "1.8.0",
        "online": online,
        "read_only": false,
        "last_seen": "2026-08-01T10:00:00Z"
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_pagination() {
    let (server, client) = setup().await;

    let body = json!({
        "items": [device_json(1, "GM1001", true), device_json(2, "GM1002", false)],
        "total": 42
    });

    Mock::given(method("GET"))
        .and(path("/api/gam/devices"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client.list_devices(&ListQuery::new(2, 20)).await.unwrap();

    assert_eq!(page.total, 42);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].serial, "GM1001");
    assert!(page.items[0].online);
    assert!(!page.items[1].online);
}

#[tokio::test]
async fn test_list_devices_search_and_filters_on_wire() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/gam/devices"))
        .and(query_param("search", "rack"))
        .and(query_param("online", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "items": [], "total": 0 })),
        )
        .mount(&server)
        .await;

    let mut query = ListQuery::new(1, 10);
    query.search = Some("rack".into());
    query.filters.push(("online".into(), "true".into()));

    let page = client.list_devices(&query).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_get_device() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/gam/devices/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_json(7, "GM1007", true)))
        .mount(&server)
        .await;

    let device = client.get_device(7).await.unwrap();
    assert_eq!(device.id, 7);
    assert_eq!(device.serial, "GM1007");
    assert_eq!(device.product_class.as_deref(), Some("GAM-12-M"));
}

#[tokio::test]
async fn test_login_installs_bearer_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "sess-abc123",
            "user": {
                "id": 1,
                "username": "admin",
                "privilege": 15,
                "enabled": true,
                "session_timeout_secs": 900
            }
        })))
        .mount(&server)
        .await;

    // Subsequent requests must carry the session id as a bearer header.
    Mock::given(method("GET"))
        .and(path("/api/alarms/counts"))
        .and(header("authorization", "Bearer sess-abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "critical": 1, "major": 2, "minor": 0, "normal": 3
        })))
        .mount(&server)
        .await;

    let session = client
        .login("admin", &SecretString::from("secret".to_owned()))
        .await
        .unwrap();
    assert_eq!(session.user.username, "admin");
    assert!(client.has_session());

    let counts = client.alarm_counts().await.unwrap();
    assert_eq!(counts.total(), 6);
}

#[tokio::test]
async fn test_create_bandwidth_profile() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/bandwidths"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "name": "Gold",
            "device_id": 1,
            "ds_bw": 500,
            "us_bw": 500,
            "synced": false,
            "deleted": false
        })))
        .mount(&server)
        .await;

    let req = BandwidthCreate {
        name: "Gold".into(),
        ds_bw: 500,
        us_bw: 500,
        device_id: None,
    };
    let profile = client.create_bandwidth(&req).await.unwrap();

    assert_eq!(profile.id, 9);
    // Server defaulted the device scope to the first available device.
    assert_eq!(profile.device_id, Some(1));
}

#[tokio::test]
async fn test_firmware_upload_echoes_manifest_metadata() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/firmware/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "version": "1.8.1",
            "revision": "r5",
            "technology": "mimo"
        })))
        .mount(&server)
        .await;

    let upload = FirmwareUpload {
        image: Some(("gam-1.8.1.bin".into(), vec![0u8; 16])),
        manifest: Some(("manifest.json".into(), b"{}".to_vec())),
        checksum: None,
        signature: None,
    };
    let result = client.upload_firmware(upload).await.unwrap();

    assert_eq!(result.version.as_deref(), Some("1.8.1"));
    assert_eq!(result.revision.as_deref(), Some("r5"));
    assert_eq!(result.technology.as_deref(), Some("mimo"));
}

#[tokio::test]
async fn test_csv_export_returns_blob() {
    let (server, client) = setup().await;

    let csv = "serial,online\nGM1001,true\n";
    Mock::given(method("GET"))
        .and(path("/api/gam/devices/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string(csv),
        )
        .mount(&server)
        .await;

    let bytes = client
        .export_csv(ExportResource::Devices, &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(bytes, csv.as_bytes());
}

#[tokio::test]
async fn test_delete_device() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/gam/devices/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_device(5).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_users(&ListQuery::default()).await;
    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/gam/devices/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "device not found" })),
        )
        .mount(&server)
        .await;

    let result = client.get_device(999).await;
    match result {
        Err(ref e) => assert!(e.is_not_found(), "expected not-found, got: {e:?}"),
        Ok(_) => panic!("expected 404 error"),
    }
}

#[tokio::test]
async fn test_error_409_business_rule_rejection() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/firmware/1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "cannot delete baseline firmware"
        })))
        .mount(&server)
        .await;

    let result = client.delete_firmware(1).await;
    match result {
        Err(Error::Rejected { detail }) => {
            assert_eq!(detail, "cannot delete baseline firmware");
        }
        other => panic!("expected Rejected error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_422_validation_list() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/bandwidths"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "msg": "name must not be empty" },
                { "msg": "ds_bw must be positive" }
            ]
        })))
        .mount(&server)
        .await;

    let req = BandwidthCreate {
        name: String::new(),
        ds_bw: 0,
        us_bw: 100,
        device_id: None,
    };
    let result = client.create_bandwidth(&req).await;

    match result {
        Err(Error::Api {
            status,
            ref fields,
            ..
        }) => {
            assert_eq!(status, 422);
            assert_eq!(
                fields,
                &["name must not be empty", "ds_bw must be positive"]
            );
        }
        other => panic!("expected Api 422 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let result = client.list_alarms(&ListQuery::default()).await;
    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}
