use chrono::{DateTime, Utc};
use product_scraper::{scrape_product, Client, Error, TIMESTAMP_FIELD};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "fc-test-key";

fn client_for(server: &MockServer) -> Client {
    Client::builder(API_KEY)
        .base_url(format!("{}/", server.uri()))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

async fn mount_scrape(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn timestamp_of(record: &serde_json::Map<String, serde_json::Value>) -> DateTime<Utc> {
    let raw = record[TIMESTAMP_FIELD].as_str().unwrap();
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

#[tokio::test]
async fn populated_payload_gets_timestamp() {
    let server = MockServer::start().await;
    let payload = json!({
        "url": "https://shop.example/kettle",
        "name": "Stainless Kettle",
        "price": 39.5,
        "currency": "EUR",
        "main_image_url": "https://shop.example/kettle.jpg",
    });
    mount_scrape(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"json": payload, "metadata": {"statusCode": 200}},
        })),
    )
    .await;

    let started = Utc::now();
    let mut record = scrape_product(&client_for(&server), "https://shop.example/kettle")
        .await
        .unwrap();

    assert!(timestamp_of(&record) >= started);
    record.remove(TIMESTAMP_FIELD);
    assert_eq!(serde_json::Value::Object(record), payload);
}

#[tokio::test]
async fn missing_payload_yields_only_timestamp() {
    for data in [json!({"json": null}), json!({"markdown": "# Kettle"})] {
        let server = MockServer::start().await;
        mount_scrape(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data})),
        )
        .await;

        let started = Utc::now();
        let record = scrape_product(&client_for(&server), "https://shop.example/kettle")
            .await
            .unwrap();

        assert_eq!(record.len(), 1);
        assert!(timestamp_of(&record) >= started);
    }
}

#[tokio::test]
async fn sends_schema_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .and(body_partial_json(json!({
            "url": "https://shop.example/kettle",
            "formats": [{
                "type": "json",
                "prompt": "Extract product information including name, price, currency, and main image URL",
                "schema": {
                    "type": "object",
                    "required": ["url", "name", "price", "currency", "main_image_url"],
                },
            }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    scrape_product(&client_for(&server), "https://shop.example/kettle")
        .await
        .unwrap();
}

#[tokio::test]
async fn url_is_not_validated_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .and(body_partial_json(json!({"url": "definitely not a url"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Invalid URL",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = scrape_product(&client_for(&server), "definitely not a url")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(msg) if msg == "Invalid URL"));
}

#[tokio::test]
async fn unsuccessful_envelope_is_an_error() {
    let server = MockServer::start().await;
    mount_scrape(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Page blocked",
        })),
    )
    .await;

    let err = scrape_product(&client_for(&server), "https://shop.example/kettle")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Scrape(msg) if msg == "Page blocked"));
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let server = MockServer::start().await;
    mount_scrape(
        &server,
        ResponseTemplate::new(429)
            .insert_header("Retry-After", "7")
            .set_body_json(json!({"success": false, "error": "Too many requests"})),
    )
    .await;

    let err = scrape_product(&client_for(&server), "https://shop.example/kettle")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RateLimit { retry_after: 7, .. }));

    let server = MockServer::start().await;
    mount_scrape(
        &server,
        ResponseTemplate::new(402).set_body_json(json!({"error": "Insufficient credits"})),
    )
    .await;
    let err = scrape_product(&client_for(&server), "https://shop.example/kettle")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PaymentRequired(_)));

    let server = MockServer::start().await;
    mount_scrape(&server, ResponseTemplate::new(502).set_body_string("bad gateway")).await;
    let err = scrape_product(&client_for(&server), "https://shop.example/kettle")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 502, .. }));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    mount_scrape(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(2))
            .set_body_json(json!({"success": true, "data": {}})),
    )
    .await;

    let client = Client::builder(API_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = scrape_product(&client, "https://shop.example/kettle")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
}

#[test]
fn empty_api_key_is_rejected() {
    assert!(matches!(Client::builder("").build(), Err(Error::Config(_))));
}
