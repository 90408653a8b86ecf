use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use nutrition_report::http::{AppState, DEFAULT_REQUEST_TIMEOUT, router};
use nutrition_report::{LoggingSheetClient, ReportService};
use nutrition_sheet_client::config::Config;
use nutrition_sheet_client::http_client::ReqwestSheetClient;
use reqwest::Client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET_CSV: &str = "\
\"Timestamp\",\"Date\",\"Morning Weight\",\"Sleep Hours\",\"Energy Level\",\"Step Count\",\"Total Calories\",\"Protein (grams)\",\"Carbohydrates (grams)\",\"Fat (grams)\",\"Exercise\",\"Exercise Duration (minutes)\",\"Did any of these situations affect your eating yesterday?\",\"Daily Notes\"
\"1/1/2024 7:00:00\",\"1/1/2024\",\"181.0\",\"5.5\",\"7\",\"9000\",\"1100\",\"60\",\"80\",\"40\",\"Run\",\"45\",\"Stress\",\"tired\"
\"1/2/2024 7:02:10\",\"1/2/2024\",\"178.5\",\"7\",\"5\",\"11000\",\"2000\",\"120\",\"210\",\"70\",\"\",\"\",\"Stress, Travel\",\"\"
\"1/3/2024 6:55:00\",\"1/3/2024\",\"179\",\"8\",\"6\",\"n/a\",\"\",\"\",\"\",\"\",\"Lift\",\"60\",\"\",\"\"
\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\"
";

async fn start_app(sheet: &MockServer) -> String {
    let mut cfg = Config::new("sheet123");
    cfg.base_url = sheet.uri();
    let client = LoggingSheetClient::new(ReqwestSheetClient::new(cfg));
    let state = Arc::new(AppState {
        service: ReportService::new(Arc::new(client)),
        metrics: PrometheusBuilder::new().build_recorder().handle(),
    });
    let app = router(state, DEFAULT_REQUEST_TIMEOUT);

    // bind to ephemeral port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::serve(listener, app.into_make_service());
    tokio::spawn(async move {
        server.await.ok();
    });
    format!("http://{addr}")
}

async fn mock_sheet(status: u16, body: &str) -> MockServer {
    let sheet = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/sheet123/gviz/tq"))
        .and(query_param("tqx", "out:csv"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&sheet)
        .await;
    sheet
}

#[tokio::test]
async fn weekly_report_from_sheet() {
    let sheet = mock_sheet(200, SHEET_CSV).await;
    let base = start_app(&sheet).await;
    let http = Client::new();

    let res = http
        .get(format!("{base}/report"))
        .query(&[("start", "2024-01-01"), ("end", "2024-01-07")])
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let report: serde_json::Value = res.json().await.unwrap();

    assert_eq!(report["days_included"], 3);
    assert_eq!(report["averages"]["weight"]["average"], 179.5);
    assert_eq!(report["averages"]["steps"]["valid_days"], 2);
    assert_eq!(report["averages"]["calories"]["average"], 1550.0);

    let kinds: Vec<&str> = report["insights"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["type"].as_str())
        .collect();
    assert!(kinds.contains(&"nutrition-energy"));
    assert!(kinds.contains(&"protein-recovery"));
    assert!(kinds.contains(&"sleep-weight"));
    assert!(kinds.contains(&"calorie-compensation"));
}

#[tokio::test]
async fn dashboard_and_records_from_sheet() {
    let sheet = mock_sheet(200, SHEET_CSV).await;
    let base = start_app(&sheet).await;
    let http = Client::new();

    let records: serde_json::Value = http
        .get(format!("{base}/records"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records.as_array().map(Vec::len), Some(3));
    assert_eq!(records[2]["Step Count"], "n/a");

    // Columns come back in sheet order, not sorted.
    let raw = http
        .get(format!("{base}/records"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let timestamp = raw.find("\"Timestamp\"").unwrap();
    let date = raw.find("\"Date\"").unwrap();
    let notes = raw.find("\"Daily Notes\"").unwrap();
    assert!(timestamp < date && date < notes, "{raw}");

    let dashboard: serde_json::Value = http
        .get(format!("{base}/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["situations"][0]["tag"], "Stress");
    assert_eq!(dashboard["situations"][0]["count"], 2);
    assert_eq!(dashboard["recent"]["workouts"], 2);
    assert_eq!(dashboard["exercise"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let sheet = mock_sheet(500, "backend down").await;
    let base = start_app(&sheet).await;

    let res = Client::new()
        .get(format!("{base}/report?start=2024-01-01&end=2024-01-07"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 502);
    assert!(res.text().await.unwrap().contains("500"));
}

#[tokio::test]
async fn bad_range_never_reaches_the_sheet() {
    let sheet = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHEET_CSV))
        .expect(0)
        .mount(&sheet)
        .await;
    let base = start_app(&sheet).await;

    let res = Client::new()
        .get(format!("{base}/report?start=2024-01-01&end=whenever"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test]
async fn measurements_from_their_own_tab() {
    let sheet = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/sheet123/gviz/tq"))
        .and(query_param("sheet", "Measurements"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "\"Date\",\"Waist\",\"Chest\",\"Arms\"\n\
             \"1/1/2024\",\"34.5\",\"41\",\"14\"\n\
             \"1/8/2024\",\"34\",\"\",\"14.25\"\n",
        ))
        .expect(1)
        .mount(&sheet)
        .await;
    let base = start_app(&sheet).await;

    let charts: serde_json::Value = Client::new()
        .get(format!("{base}/measurements"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(charts["labels"], serde_json::json!(["1/1/2024", "1/8/2024"]));
    assert_eq!(charts["series"][0]["field"], "Waist");
    assert_eq!(charts["series"][1]["points"], serde_json::json!([41.0, null]));
    assert_eq!(charts["series"][2]["points"], serde_json::json!([14.0, 14.25]));
}
