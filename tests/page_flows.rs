use outreach_dashboard::api::ApiClient;
use outreach_dashboard::api::models::ScanStatus;
use outreach_dashboard::state::{ActionState, FetchState};
use outreach_dashboard::views::businesses::BusinessListModel;
use outreach_dashboard::views::campaigns::{self, CampaignListModel};
use outreach_dashboard::views::upload::{self, SelectedFile, UploadModel};
use outreach_dashboard::views::{analytics, dashboard, scanner};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.uri())).unwrap()
}

fn scan_status(pending: u64, scanned: u64) -> serde_json::Value {
    json!({
        "total_businesses": 20,
        "pending_scan": pending,
        "scanned": scanned,
        "active": 20 - pending - scanned,
        "scan_completion_rate": (20 - pending) as f64 * 5.0
    })
}

#[tokio::test]
async fn created_campaign_shows_up_after_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"campaigns": [], "total_items": 0})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{
                "id": 1,
                "name": "Spring Promo",
                "status": "draft",
                "created_at": "2024-03-01T10:00:00",
                "messages_summary": {"total": 0, "sent": 0, "failed": 0, "opened": 0, "replied": 0}
            }],
            "total_items": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut list = FetchState::from_result(client.campaigns().await);
    assert!(list.data().unwrap().campaigns.is_empty());

    let mut model = CampaignListModel::default();
    model.open_form();
    model.form.name = "Spring Promo".into();
    model.form.message_template = "Hello {business_name}".into();
    let request = model.begin_create().unwrap();

    let result = campaigns::create(&client, &request).await;
    model.finish_create(&result);
    assert!(!model.form_visible());
    assert!(model.form.name.is_empty());

    list = FetchState::from_result(client.campaigns().await);
    let rows = campaigns::rows(&list.data_or_default().campaigns);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Spring Promo");
    assert_eq!(rows[0].messages, "0 sent of 0 total");
    assert_eq!(rows[0].success_rate, 0);
    assert_eq!(rows[0].created, "2024-03-01");
    assert!(rows[0].can_send);
}

#[tokio::test]
async fn rejected_campaign_keeps_form_open_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Name is required"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut model = CampaignListModel::default();
    model.open_form();
    model.form.name = "X".into();
    model.form.message_template = "Y".into();

    let result = campaigns::create(&client, &model.form.to_request().unwrap()).await;
    model.finish_create(&result);
    assert!(model.form_visible());
    assert_eq!(model.form_error(), Some("Name is required"));
    assert_eq!(model.form.name, "X");
}

#[tokio::test]
async fn bulk_scan_reports_counts_and_refreshes_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(12, 6)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/scan/all-pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "done", "scanned_count": 12, "total_pending": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(0, 18)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let status: ScanStatus = client.scan_status().await.unwrap();
    let mut action = ActionState::Idle;
    assert!(scanner::can_scan(&status, &action));
    assert_eq!(scanner::scan_button_label(&status, &action), "Scan 12 Pending Businesses");

    assert!(action.start());
    assert!(!scanner::can_scan(&status, &action));
    action.finish(scanner::scan_all_pending(&client).await);

    let lines = scanner::success_lines(action.success().unwrap());
    assert_eq!(lines, vec!["done", "• Businesses scanned: 12", "• Total pending: 0"]);

    let status = client.scan_status().await.unwrap();
    assert_eq!(status.pending_scan, 0);
    assert!(!scanner::can_scan(&status, &action));
    assert_eq!(scanner::progress_label(&status), "20 of 20 businesses");
    assert_eq!(scanner::pending_note(&status), Some(scanner::NOTHING_PENDING));
}

#[tokio::test]
async fn bulk_scan_failure_uses_server_text_or_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scan/all-pending"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Scan already running"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/scan/all-pending"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(
        scanner::scan_all_pending(&client).await.unwrap_err(),
        "Scan already running"
    );
    assert_eq!(
        scanner::scan_all_pending(&client).await.unwrap_err(),
        "Failed to start scan: HTTP 500"
    );
}

#[tokio::test]
async fn single_business_scan_posts_to_business_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scan/business/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"contacts_found": 2})))
        .expect(1)
        .mount(&server)
        .await;

    scanner::scan_business(&client_for(&server).await, 7)
        .await
        .unwrap();
}

#[tokio::test]
async fn dashboard_totals_come_from_three_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"businesses": [], "total_items": 20, "total_pages": 2})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [
                {"id": 1, "name": "A", "status": "completed", "messages_summary": {"total": 5, "sent": 4}},
                {"id": 2, "name": "B", "status": "sending", "messages_summary": {"total": 3, "sent": 1}}
            ],
            "total_items": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(4, 10)))
        .mount(&server)
        .await;

    let stats = dashboard::load_stats(&client_for(&server).await).await;
    let cards = stats.cards();
    assert_eq!(cards[0].value, "20");
    assert_eq!(cards[1].value, "2");
    assert_eq!(cards[2].value, "8");
    assert_eq!(cards[3].value, "80%");
    assert_eq!(cards[3].description, "10 of 14 scanned");
}

#[tokio::test]
async fn dashboard_zeroes_everything_when_one_request_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"businesses": [], "total_items": 20, "total_pages": 2})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"campaigns": [], "total_items": 3})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let stats = dashboard::load_stats(&client_for(&server).await).await;
    assert_eq!(stats, dashboard::DashboardStats::default());
}

#[tokio::test]
async fn refreshing_dashboard_repeats_the_three_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"businesses": [], "total_items": 20, "total_pages": 2})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"campaigns": [], "total_items": 0})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(4, 10)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(0, 14)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let before = dashboard::load_stats(&client).await;
    assert_eq!(before.cards()[3].value, "80%");

    let after = dashboard::load_stats(&client).await;
    assert_eq!(after.cards()[3].value, "100%");
    assert_eq!(after.cards()[0].value, "20");
}

#[tokio::test]
async fn refreshing_scanner_picks_up_new_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(3, 10)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scan_status(0, 13)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let status = FetchState::from_result(client.scan_status().await).data_or_default();
    assert_eq!(scanner::pending_note(&status), None);

    let status = FetchState::from_result(client.scan_status().await).data_or_default();
    assert_eq!(scanner::pending_note(&status), Some(scanner::NOTHING_PENDING));
    assert_eq!(scanner::scan_button_label(&status, &ActionState::Idle), "Scan 0 Pending Businesses");
}

#[tokio::test]
async fn business_filters_and_clamping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/businesses"))
        .and(query_param("page", "3"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "businesses": [], "total_items": 4, "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut model = BusinessListModel::default();
    model.apply(&outreach_dashboard::api::models::BusinessPage {
        total_pages: 5,
        ..Default::default()
    });
    assert!(model.next_page());
    assert!(model.next_page());
    assert!(model.set_status_filter("active"));

    let page = client.businesses(&model.query()).await.unwrap();
    assert!(model.apply(&page));
    assert_eq!(model.query().page, 1);
    assert_eq!(model.pagination().label(), "Page 1 of 1");
    assert!(!model.pagination().can_next());
}

#[tokio::test]
async fn upload_surfaces_server_error_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/businesses/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Missing Business Name column"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/businesses/upload"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/businesses/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "CSV processing completed.",
            "result": {"total_rows": 3, "processed": 2, "errors": 1, "error_details": ["Row 3: missing name"]}
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = upload::save_sample(dir.path()).unwrap();
    let file = SelectedFile {
        name: "sample_businesses.csv".into(),
        mime: Some("text/csv".into()),
        size: std::fs::metadata(&path).unwrap().len(),
        path,
    };
    let client = client_for(&server).await;
    let mut model = UploadModel::default();
    assert!(model.select(file));

    let picked = model.begin().unwrap();
    model.finish(upload::upload(&client, &picked).await);
    assert_eq!(model.error(), Some("Missing Business Name column"));

    let picked = model.begin().unwrap();
    model.finish(upload::upload(&client, &picked).await);
    assert_eq!(model.error(), Some(upload::UPLOAD_FAILED));

    let picked = model.begin().unwrap();
    model.finish(upload::upload(&client, &picked).await);
    assert_eq!(model.error(), None);
    let lines = upload::result_lines(model.action().success().unwrap());
    assert_eq!(
        lines,
        vec![
            "CSV processing completed.",
            "• Total rows: 3",
            "• Processed: 2",
            "• Errors: 1",
            "  Row 3: missing name",
        ]
    );
    assert!(model.selected().is_none());
}

#[tokio::test]
async fn upload_of_missing_file_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/businesses/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = SelectedFile {
        path: dir.path().join("gone.csv"),
        name: "gone.csv".into(),
        mime: None,
        size: 0,
    };
    let err = upload::upload(&client_for(&server).await, &file)
        .await
        .unwrap_err();
    assert!(err.starts_with("Could not read gone.csv"));
}

#[tokio::test]
async fn analytics_report_and_export() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"businesses": [], "total_items": 9, "total_pages": 1})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{
                "id": 1,
                "name": "A very long campaign name",
                "status": "completed",
                "messages_summary": {"total": 4, "sent": 3, "failed": 1, "opened": 2, "replied": 0}
            }],
            "total_items": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/export"))
        .and(query_param("date_range", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_string("campaign,sent\n"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let report = analytics::load(&client).await.unwrap();
    assert_eq!(report.cards()[0].value, "9");
    assert_eq!(report.cards()[3].value, "75%");
    assert_eq!(report.bars[0].label, "A very long cam...");
    let labels: Vec<_> = report.pie.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["Sent", "Failed", "Opened"]);

    let dir = tempfile::tempdir().unwrap();
    let saved = analytics::export_to(&client, dir.path()).await.unwrap();
    let name = saved.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("analytics_export_") && name.ends_with(".csv"));
    assert_eq!(std::fs::read_to_string(saved).unwrap(), "campaign,sent\n");
}
