//! Integration tests for Tushare payload decoding.

use darwin_data::frame;
use darwin_data::tushare::TushareResponse;
use rstest::rstest;

const DAILY_BASIC_BODY: &str = r#"{
    "request_id": "d9f1",
    "code": 0,
    "msg": "",
    "data": {
        "fields": ["trade_date", "ts_code", "total_mv", "pe", "pe_ttm", "pb", "turnover_rate"],
        "items": [
            ["20240103", "600000.SH", 2052345.12, 4.51, 4.62, 0.37, 0.21],
            ["20240105", "600000.SH", 2071002.00, 4.55, 4.66, 0.38, 0.19],
            ["20240104", "600000.SH", 2060117.50, null, 4.64, 0.37, 0.25]
        ],
        "has_more": false
    }
}"#;

#[test]
fn test_daily_basic_latest_row() {
    let response: TushareResponse = serde_json::from_str(DAILY_BASIC_BODY).unwrap();
    let df = response
        .into_payload("daily_basic")
        .unwrap()
        .into_frame()
        .unwrap();
    let latest = frame::sort_by(&df, "trade_date", true).unwrap();

    assert_eq!(
        frame::str_values(&latest, "trade_date").unwrap()[0].as_deref(),
        Some("20240105")
    );
    assert_eq!(
        frame::f64_at(&latest, "total_mv", 0).unwrap(),
        Some(2071002.0)
    );
    assert_eq!(frame::f64_at(&latest, "pe", 1).unwrap(), None);
}

#[rstest]
#[case(r#"{"code": 40203, "msg": "exceeded rate", "data": null}"#, 40203)]
#[case(r#"{"code": -2001, "msg": "bad argument"}"#, -2001)]
fn test_provider_error_codes(#[case] body: &str, #[case] expected: i64) {
    let response: TushareResponse = serde_json::from_str(body).unwrap();
    match response.into_payload("daily") {
        Err(darwin_data::DataError::Api { code, .. }) => assert_eq!(code, expected),
        other => panic!("expected provider error, got {:?}", other.map(|p| p.fields)),
    }
}
