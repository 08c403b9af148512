//! Feed Pipeline Integration Tests
//!
//! Runs the real `FeedClient` against an in-process axum server that plays
//! the part of the CNEOS `cad.api`, then through the transform and the
//! memoized `ApproachFeed`.

use neo_sentinel::feed::{ApproachSource, FeedClient, FeedQuery};
use neo_sentinel::pipeline::{ApproachFeed, FeedView};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const CAD_BODY: &str = r#"{
  "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.5"},
  "count": "3",
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
  "data": [
    ["2025 UC1", "3", "2460990.7", "2025-Dec-03 04:51", "0.0421", "0.0419", "0.0423", "6.9", "6.8", "00:04", "24.9"],
    ["2025 SK", "7", "2460973.3", "2025-Nov-16 19:12", "0.00257", "0.00256", "0.00258", "11.4", "11.3", "< 00:01", "28.1"],
    ["467317", "41", "2460981.0", "2025-Nov-24 12:00", "0.0487", "0.0487", "0.0487", "19.5", "19.5", "< 00:01", "20.3"]
  ]
}"#;

/// Fake CNEOS endpoint: records query strings and serves a scripted status/body.
#[derive(Clone)]
struct FakeCneos {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    hits: Arc<AtomicUsize>,
    status: Arc<Mutex<StatusCode>>,
    body: &'static str,
}

impl FakeCneos {
    fn new(body: &'static str) -> Self {
        Self {
            queries: Arc::new(Mutex::new(Vec::new())),
            hits: Arc::new(AtomicUsize::new(0)),
            status: Arc::new(Mutex::new(StatusCode::OK)),
            body,
        }
    }

    fn fail_with(&self, status: StatusCode) {
        *self.status.lock().unwrap() = status;
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn cad_api(
    State(fake): State<FakeCneos>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    fake.queries.lock().unwrap().push(params);
    let status = *fake.status.lock().unwrap();
    (status, fake.body).into_response()
}

/// Start the fake endpoint on an ephemeral port and return its URL.
async fn spawn_fake(fake: FakeCneos) -> String {
    let app = Router::new().route("/cad.api", get(cad_api)).with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/cad.api")
}

fn client(endpoint: &str) -> FeedClient {
    FeedClient::new(endpoint, Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_client_sends_cneos_query() {
    let fake = FakeCneos::new(CAD_BODY);
    let endpoint = spawn_fake(fake.clone()).await;

    let payload = client(&endpoint).fetch(&FeedQuery::default()).await.unwrap();
    assert_eq!(payload.len(), 3);
    assert_eq!(payload.field_index("cd"), Some(3));

    let queries = fake.queries.lock().unwrap();
    let q = &queries[0];
    assert_eq!(q["date-min"], "now");
    assert_eq!(q["date-max"], "+60");
    assert_eq!(q["dist-max"], "0.05");
    assert_eq!(q["sort"], "date");
}

#[tokio::test]
async fn test_end_to_end_table() {
    let fake = FakeCneos::new(CAD_BODY);
    let endpoint = spawn_fake(fake).await;
    let feed = ApproachFeed::new(Arc::new(client(&endpoint)), 60, 0.05);

    let table = feed.load().await.unwrap();
    let names: Vec<&str> = table.records().iter().map(|r| r.designation.as_str()).collect();
    assert_eq!(names, ["2025 SK", "467317", "2025 UC1"]);

    let sk = &table.records()[0];
    assert_eq!(sk.approach_date, "2025-11-16 19:12");
    assert_eq!(sk.lunar_distance, 1.0);
    assert_eq!(sk.distance_km, 384_467.0);
}

#[tokio::test]
async fn test_http_error_status_is_network_error() {
    let fake = FakeCneos::new(CAD_BODY);
    fake.fail_with(StatusCode::SERVICE_UNAVAILABLE);
    let endpoint = spawn_fake(fake).await;

    let err = client(&endpoint).fetch(&FeedQuery::default()).await.unwrap_err();
    assert_eq!(err.code(), "NETWORK_ERROR");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let fake = FakeCneos::new("<html>maintenance</html>");
    let endpoint = spawn_fake(fake).await;

    let err = client(&endpoint).fetch(&FeedQuery::default()).await.unwrap_err();
    assert_eq!(err.code(), "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn test_zero_count_view() {
    let fake = FakeCneos::new(r#"{"signature": {"version": "1.5"}, "count": "0"}"#);
    let endpoint = spawn_fake(fake).await;
    let feed = ApproachFeed::new(Arc::new(client(&endpoint)), 30, 0.02);

    match feed.view().await {
        FeedView::NoApproaches { message } => assert_eq!(
            message,
            "No close approaches (within 0.02 AU) are listed for the next 30 days."
        ),
        other => panic!("expected no_approaches, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upstream_outage_after_load_keeps_cache() {
    let fake = FakeCneos::new(CAD_BODY);
    let endpoint = spawn_fake(fake.clone()).await;
    let feed = ApproachFeed::new(Arc::new(client(&endpoint)), 60, 0.05);

    let before = feed.load().await.unwrap();
    fake.fail_with(StatusCode::BAD_GATEWAY);

    assert!(feed.refresh_view().await.is_unavailable());
    let after = feed.load().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    // load after the failed refresh is served from cache
    assert_eq!(fake.hits(), 2);
}
