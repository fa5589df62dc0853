/*
[INPUT]:  Mock trade pages
[OUTPUT]: Test results for the trade-history aggregator
[POS]:    Integration tests - pagination window, normalization, backoff
[UPDATE]: When aggregation or normalization rules change
*/

mod common;

use std::time::{Duration, Instant};

use btcmarkets_adapter::{BtcMarketsError, ClientConfig, TradeSide, TradeTable};
use common::{setup_mock_server, test_client, test_client_with_config};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const START: i64 = 1_600_000_000_000;
const END: i64 = 1_700_000_000_000;

/// Two BTC-AUD trades at 1600000100000 and 1600000200000 epoch ms
const TWO_TRADE_PAGE: &str = r#"[
    {
        "id": "4321",
        "marketId": "BTC-AUD",
        "timestamp": "2020-09-13T12:28:20.000000Z",
        "price": "25000.50",
        "amount": "0.25",
        "side": "Bid",
        "fee": "12.5",
        "valueInQuoteAsset": "6250.125",
        "orderId": "o-1"
    },
    {
        "id": "4322",
        "marketId": "BTC-AUD",
        "timestamp": "2020-09-13T12:30:00.000000Z",
        "price": "25100.00",
        "amount": "0.10",
        "side": "Ask",
        "fee": "5.02",
        "valueInQuoteAsset": "2510.00",
        "orderId": "o-2"
    }
]"#;

async fn mount_trades(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/v3/trades"))
        .and(query_param("marketId", "BTC-AUD"))
        .and(query_param("startTime", START.to_string()))
        .and(query_param("limit", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_raw(body.to_string(), "application/json"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_trade_history_end_to_end() {
    let server = setup_mock_server().await;
    mount_trades(&server, TWO_TRADE_PAGE).await;

    let client = test_client(&server.uri());
    let table = assert_ok!(client.trade_history("BTC-AUD", START, END).await);

    assert_eq!(table.len(), 2);

    // newest first
    let rows = table.rows();
    assert_eq!(rows[0].id, "4322");
    assert_eq!(rows[0].timestamp, 1_600_000_200_000);
    assert_eq!(rows[0].side, TradeSide::Sell);
    assert_eq!(rows[1].id, "4321");
    assert_eq!(rows[1].timestamp, 1_600_000_100_000);
    assert_eq!(rows[1].side, TradeSide::Buy);

    // normalized fields
    assert_eq!(rows[1].price, 25000.50);
    assert_eq!(rows[1].qty, 0.25);
    assert_eq!(rows[1].quote_qty, 1.0);
    assert_eq!(rows[1].commission, 12.5);
    assert_eq!(rows[1].commission_asset, "AUD");
    assert_eq!(rows[1].commission_asset_usd_price, 6250.125);

    // id-indexed lookup
    assert_eq!(table.trade("4321").unwrap().id, "4321");
    assert_eq!(TradeTable::COLUMNS[0], "price");
    assert_eq!(TradeTable::COLUMNS[7], "timestamp");
}

#[tokio::test]
async fn test_empty_page_is_no_trades_found() {
    let server = setup_mock_server().await;
    mount_trades(&server, "[]").await;

    let client = test_client(&server.uri());
    let err = client.trade_history("BTC-AUD", START, END).await.unwrap_err();

    match err {
        BtcMarketsError::NoTradesFound { symbol } => assert_eq!(symbol, "BTC-AUD"),
        other => panic!("expected NoTradesFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_trades_after_window_end_are_dropped() {
    let server = setup_mock_server().await;
    mount_trades(&server, TWO_TRADE_PAGE).await;

    // both mocked trades sit after this end time
    let end_before_page = 1_600_000_000_500;
    let client = test_client(&server.uri());
    let err = client
        .trade_history("BTC-AUD", START, end_before_page)
        .await
        .unwrap_err();

    assert!(matches!(err, BtcMarketsError::NoTradesFound { .. }));
}

#[tokio::test]
async fn test_inverted_window_skips_the_request() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v3/trades"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.trade_history("BTC-AUD", END, START).await.unwrap_err();

    assert!(matches!(err, BtcMarketsError::NoTradesFound { .. }));
}

#[tokio::test]
async fn test_rate_limited_page_waits_out_cooldown() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v3/trades"))
        .respond_with(ResponseTemplate::new(429).set_body_raw(
            r#"{"code":"TooManyRequests","message":"Too many requests"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let cooldown = Duration::from_millis(200);
    let config = ClientConfig {
        rate_limit_cooldown: cooldown,
        ..ClientConfig::default()
    };
    let client = test_client_with_config(&server.uri(), config);

    let started = Instant::now();
    let err = client.trade_history("BTC-AUD", START, END).await.unwrap_err();

    assert!(err.is_rate_limit());
    assert!(started.elapsed() >= cooldown);
}

#[tokio::test]
async fn test_failed_page_is_treated_as_empty() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v3/trades"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            r#"{"code":"InternalServerError","message":"boom"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.trade_history("BTC-AUD", START, END).await.unwrap_err();

    // the failure is logged, not raised; the empty result surfaces instead
    assert!(matches!(err, BtcMarketsError::NoTradesFound { .. }));
}

#[tokio::test]
async fn test_unrecognized_side_token_passes_through() {
    let server = setup_mock_server().await;
    let page = r#"[
        {
            "id": "9001",
            "marketId": "BTC-AUD",
            "timestamp": "2020-09-13T12:28:20.000000Z",
            "price": "25000.50",
            "amount": "0.25",
            "side": "Cross",
            "fee": "12.5",
            "valueInQuoteAsset": "6250.125"
        }
    ]"#;
    mount_trades(&server, page).await;

    let client = test_client(&server.uri());
    let table = assert_ok!(client.trade_history("BTC-AUD", START, END).await);

    assert_eq!(
        table.rows()[0].side,
        TradeSide::Other("Cross".to_string())
    );
}
