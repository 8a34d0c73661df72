use std::sync::Arc;

use async_trait::async_trait;
use job_tracker::bot::ConversationHandler;
use job_tracker::extraction::{FetchError, JobScraper, PageFetcher};
use job_tracker::storage::{ApplicationStore, MemoryStore, SqliteStore};
use job_tracker::web::{build_rocket, BotState};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;

struct LeverPage;

#[async_trait]
impl PageFetcher for LeverPage {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Ok(r#"<html><body>
                <div class="main-header-text"><a>Vandelay Industries</a></div>
                <div class="posting-headline"><h2>Import/Export Analyst</h2></div>
            </body></html>"#
            .to_string())
    }
}

async fn client_with(store: Arc<dyn ApplicationStore>) -> Client {
    let handler = ConversationHandler::new(JobScraper::new(Arc::new(LeverPage)), store);
    let state = BotState {
        handler,
        sheet_configured: false,
    };
    Client::tracked(build_rocket(state, 0))
        .await
        .expect("valid rocket instance")
}

async fn post_message(client: &Client, body: &str) -> String {
    let response = client
        .post("/webhook")
        .header(ContentType::Form)
        .body(body)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::XML));
    response.into_string().await.expect("response body")
}

#[rocket::async_test]
async fn help_reply_is_twiml() {
    let client = client_with(Arc::new(MemoryStore::new())).await;

    let body = post_message(&client, "Body=help&From=whatsapp%3A%2B15550001&SmsSid=SM1").await;
    assert!(body.starts_with("<?xml"));
    assert!(body.contains("<Response><Message>"));
    assert!(body.contains("Job Tracker Bot Help"));
}

#[rocket::async_test]
async fn url_submission_is_stored() {
    let store = Arc::new(MemoryStore::new());
    let client = client_with(store.clone()).await;

    let body = post_message(
        &client,
        "Body=https%3A%2F%2Fjobs.lever.co%2Fvandelay%2F1%0Areferral+from+Kramer&From=whatsapp%3A%2B15550001",
    )
    .await;
    assert!(body.contains("Vandelay Industries"));

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].company, "Vandelay Industries");
    assert_eq!(records[0].role, "Import/Export Analyst");
    assert_eq!(records[0].notes, "referral from Kramer");
    assert_eq!(records[0].job_link, "https://jobs.lever.co/vandelay/1");
}

#[rocket::async_test]
async fn manual_entry_round_trips_through_sqlite() {
    let store = Arc::new(SqliteStore::in_memory().await.unwrap());
    let client = client_with(store.clone()).await;

    let body = post_message(&client, "Body=Acme+-+Engineer&From=whatsapp%3A%2B15550001").await;
    assert!(body.contains("Job Application Tracked"));

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, "Applied");
    assert_eq!(records[0].company, "Acme");
    assert_eq!(records[0].role, "Engineer");
}

#[rocket::async_test]
async fn missing_body_asks_for_input() {
    let client = client_with(Arc::new(MemoryStore::new())).await;

    let body = post_message(&client, "From=whatsapp%3A%2B15550001").await;
    assert!(body.contains("Please send a job posting URL"));
}

#[rocket::async_test]
async fn health_reports_storage() {
    let client = client_with(Arc::new(MemoryStore::new())).await;

    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let json: serde_json::Value = response.into_json().await.expect("json body");
    assert_eq!(json["status"], "Bot is running!");
    assert_eq!(json["storage"], "memory");
    assert_eq!(json["storage_healthy"], true);
    assert_eq!(json["google_sheet_id"], "Not configured");
}
