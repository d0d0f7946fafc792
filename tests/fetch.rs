//! End-to-end runs against a one-shot local HTTP stub.

use anyhow::Result;
use chrono::NaiveTime;
use std::cell::RefCell;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use outage_alert::api::{AccountNumber, ApiConfig, OutageClient};
use outage_alert::error::FetchError;
use outage_alert::voice::Announcer;
use outage_alert::{run_check, Advisory, HourLabels};

const SAMPLE: &str = include_str!("fixtures/sample_response.json");

#[derive(Default)]
struct RecordingAnnouncer {
    spoken: RefCell<Vec<String>>,
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, text: &str) -> Result<()> {
        self.spoken.borrow_mut().push(text.to_string());
        Ok(())
    }
}

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0)
}

/// Serves a single response and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = header_end(&buf) {
                let head = String::from_utf8_lossy(&buf[..end]).to_string();
                if buf.len() >= end + content_length(&head) {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{}/GAVTurnOff/GavGroupByAccountNumber", addr), handle)
}

fn client(endpoint: String) -> OutageClient {
    OutageClient::new(&ApiConfig {
        endpoint,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn account() -> AccountNumber {
    "00000000".parse().unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[tokio::test]
async fn posts_form_and_parses_schedule() {
    let (endpoint, server) = serve_once("200 OK", SAMPLE).await;
    let client = client(endpoint);
    assert!(client.endpoint().starts_with("http://127.0.0.1:"));

    let response = client.fetch_schedule(&account()).await.unwrap();
    assert_eq!(response.graphs.today.unwrap().hours_list.len(), 24);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /GAVTurnOff/GavGroupByAccountNumber"));
    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("x-requested-with: xmlhttprequest"));
    assert!(lower.contains("content-type: application/x-www-form-urlencoded; charset=utf-8"));
    assert!(request.ends_with("accountNumber=00000000&userSearchChoice=pob&address="));
}

#[tokio::test]
async fn not_found_reports_wrong_account() {
    let (endpoint, server) = serve_once("404 Not Found", "").await;
    let err = client(endpoint).fetch_schedule(&account()).await.unwrap_err();
    assert!(matches!(err, FetchError::AccountNotFound(_)));
    assert_eq!(err.to_string(), "the account number 00000000 is incorrect");
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let (endpoint, server) = serve_once("200 OK", "{\"graphs\": ").await;
    let err = client(endpoint).fetch_schedule(&account()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn announces_upcoming_outage() {
    let (endpoint, server) = serve_once("200 OK", SAMPLE).await;
    let announcer = RecordingAnnouncer::default();

    let advisory = run_check(
        &client(endpoint),
        &account(),
        HourLabels::OneBased,
        at(9, 50),
        &announcer,
    )
    .await
    .unwrap();

    assert_eq!(advisory, Some(Advisory::ScheduledOutage));
    assert_eq!(
        announcer.spoken.borrow().as_slice(),
        ["A scheduled power outage is expected in 15 minutes"]
    );
    server.await.unwrap();
}

#[tokio::test]
async fn stays_quiet_outside_the_window() {
    let (endpoint, server) = serve_once("200 OK", SAMPLE).await;
    let announcer = RecordingAnnouncer::default();

    let advisory = run_check(
        &client(endpoint),
        &account(),
        HourLabels::Wrapped,
        at(10, 30),
        &announcer,
    )
    .await
    .unwrap();

    assert_eq!(advisory, None);
    assert!(announcer.spoken.borrow().is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn fetch_failure_skips_prediction() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "boom").await;
    let announcer = RecordingAnnouncer::default();

    let result = run_check(
        &client(endpoint),
        &account(),
        HourLabels::Wrapped,
        at(10, 50),
        &announcer,
    )
    .await;

    assert!(result.is_err());
    assert!(announcer.spoken.borrow().is_empty());
    server.await.unwrap();
}
