use std::sync::Arc;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use obsrv_client::auth::{FixedClock, StaticCredentials, body_digest};
use obsrv_client::error::ObsrvError;
use obsrv_client::rest::{
    MarketAddRequest, ObsrvClient, OrderAddRequest, OrderCancelRequest, OrderModifyRequest,
};
use obsrv_client::types::{BookType, Side};

const UNIXTIME: i64 = 1_700_000_000;

fn build_client(server: &MockServer) -> ObsrvClient {
    let credentials = Arc::new(StaticCredentials::new("testuser", "testpass"));
    ObsrvClient::builder()
        .base_url(&server.uri())
        .unwrap()
        .credentials(credentials)
        .clock(Arc::new(FixedClock(UNIXTIME)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_market_add_signed_request() {
    let server = MockServer::start().await;
    let body = r#"{"symbol":"GOOG","booktype":"simple"}"#;

    Mock::given(method("POST"))
        .and(path("/marketAdd"))
        .and(body_json(serde_json::json!({"symbol": "GOOG", "booktype": "simple"})))
        .and(header("content-type", "application/json"))
        .and(header("host", "127.0.0.1"))
        .and(header("x-unixtime", "1700000000"))
        .and(header("etag", body_digest(body.as_bytes()).as_str()))
        .and(header(
            "authorization",
            "cscpp1-sha256 testuser 6caae44601f2034b8a332e220652cd5071facc3faf10de7bee0a3886a8cdaa12",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let created = client
        .market_add(&MarketAddRequest::new("GOOG"))
        .await
        .unwrap();
    assert_eq!(created, Some(true));

    let requests = server.received_requests().await.unwrap();
    let content_length = requests[0].headers.get("content-length").unwrap();
    assert_eq!(content_length.to_str().unwrap(), body.len().to_string());
}

#[tokio::test]
async fn test_market_add_duplicate_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/marketAdd"))
        .respond_with(ResponseTemplate::new(406))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = MarketAddRequest::new("GOOG").book_type(BookType::Depth);
    let err = client.market_add(&request).await.unwrap_err();

    assert_eq!(err.status_code(), Some(406));
    assert_eq!(err.to_string(), "HTTP status 406: Not Acceptable");
}

#[tokio::test]
async fn test_order_add() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orderAdd"))
        .and(body_json(serde_json::json!({
            "symbol": "IBM",
            "is_buy": true,
            "price": 1000,
            "qty": 10
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"orderId": "7c9e6679-7425-40de-944b-e07fc1f90ae7"})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = OrderAddRequest::limit("IBM", Side::Buy, 1000, 10);
    let response = client.order_add(&request).await.unwrap().unwrap();

    assert_eq!(response.order_id, "7c9e6679-7425-40de-944b-e07fc1f90ae7");
}

#[tokio::test]
async fn test_order_cancel_and_modify() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orderCancel"))
        .and(body_json(serde_json::json!({"oid": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/orderModify"))
        .and(body_json(serde_json::json!({"oid": "abc", "price": 1050, "qtyDelta": -2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(false))
        .mount(&server)
        .await;

    let client = build_client(&server);

    let cancelled = client
        .order_cancel(&OrderCancelRequest::new("abc"))
        .await
        .unwrap();
    assert_eq!(cancelled, Some(true));

    let modified = client
        .order_modify(&OrderModifyRequest::new("abc", 1050, -2))
        .await
        .unwrap();
    assert_eq!(modified, Some(false));
}

#[tokio::test]
async fn test_order_info_signed_without_body() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "id": "abc",
        "side": "sell",
        "qty": 10,
        "price": 1000,
        "aon": false,
        "ioc": true,
        "submitted_at": 1700000000.5,
        "stop_price": 990,
        "type": "limit-stop"
    });

    Mock::given(method("GET"))
        .and(path("/order/abc"))
        .and(header(
            "authorization",
            "cscpp1-sha256 testuser 5125bb27ac48745ca8351ca2802951146560f8d50f66c26e4a914959befae5f9",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = client.order_info("abc").await.unwrap().unwrap();

    assert_eq!(order.side, Side::Sell);
    assert_eq!(order.stop_price, Some(990));
    assert!(order.is_stop());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("etag").is_none());
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_order_info_unknown_order_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/order/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = client.order_info("missing").await.unwrap();
    assert!(order.is_none());
}

#[tokio::test]
async fn test_private_endpoint_without_credentials() {
    let server = MockServer::start().await;

    let client = ObsrvClient::builder()
        .base_url(&server.uri())
        .unwrap()
        .build()
        .unwrap();
    let result = client.order_cancel(&OrderCancelRequest::new("abc")).await;

    assert!(matches!(result, Err(ObsrvError::MissingCredentials)));
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
