use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use obsrv_client::rest::ObsrvClient;
use obsrv_client::types::{BookDepth, PriceLevel};

fn build_public_client(server: &MockServer) -> ObsrvClient {
    ObsrvClient::builder()
        .base_url(&server.uri())
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_info() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "name": "obsrv",
        "apiversion": 100,
        "time": {
            "unixtime": 1_700_000_000,
            "iso": "2023-11-14T22:13:20Z"
        }
    });

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let info = client.info().await.unwrap().unwrap();
    assert_eq!(info.name, "obsrv");
    assert_eq!(info.apiversion, 100);
    assert_eq!(info.time.unixtime, 1_700_000_000);
}

#[tokio::test]
async fn test_market_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["GOOG", "IBM"])))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let markets = client.market_list().await.unwrap().unwrap();
    assert_eq!(markets, vec!["GOOG".to_string(), "IBM".to_string()]);
}

#[tokio::test]
async fn test_book_uses_path_segment_and_depth_query() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "bids": [{"price": 990, "qty": 5}, {"price": 995, "qty": 1}],
        "asks": [{"price": 1005, "qty": 7}]
    });

    Mock::given(method("GET"))
        .and(path("/book/GOOG"))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let book = client
        .book("GOOG", BookDepth::AGGREGATED)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.best_bid(), Some(&PriceLevel { price: 995, qty: 1 }));
    assert_eq!(book.best_ask(), Some(&PriceLevel { price: 1005, qty: 7 }));
}

#[tokio::test]
async fn test_book_unknown_market_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/book/NOPE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let book = client.book("NOPE", BookDepth::TOP).await.unwrap();
    assert!(book.is_none());
}

#[tokio::test]
async fn test_public_requests_are_stamped_but_unsigned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketList"))
        .and(header("host", "127.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    client.market_list().await.unwrap().unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert!(headers.get("x-unixtime").is_some());
    assert!(headers.get("authorization").is_none());
    assert!(headers.get("etag").is_none());
}
