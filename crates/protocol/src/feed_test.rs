//! Tests for feed decoding

use crate::{ProtocolError, SupplierFeed, SupplierId, SupplierSet};

#[test]
fn test_decode_full_supplier() {
    let json = br#"{
        "data": [{
            "supplierId": 3,
            "shortName": "dsp_three",
            "endPoint": "http://dsp3.example/bid",
            "openRtbVersion": "2.4",
            "contentType": "application/json;charset=utf-8",
            "acceptEncoding": "gzip",
            "contentEncoding": "gzip",
            "currency": "EUR",
            "tmax": 120,
            "connectionKeepAlive": false,
            "underTest": true,
            "active": false
        }]
    }"#;

    let set = SupplierFeed::decode(json).unwrap();
    assert_eq!(set.len(), 1);

    let s = &set.as_slice()[0];
    assert_eq!(s.supplier_id, SupplierId::new(3));
    assert_eq!(s.short_name, "dsp_three");
    assert_eq!(s.endpoint, "http://dsp3.example/bid");
    assert_eq!(s.open_rtb_version, "2.4");
    assert_eq!(s.accept_encoding.as_deref(), Some("gzip"));
    assert_eq!(s.currency, "EUR");
    assert_eq!(s.tmax_ms, Some(120));
    assert!(!s.connection_keep_alive);
    assert!(s.under_test);
    assert!(!s.active);
}

#[test]
fn test_decode_applies_defaults() {
    let json = br#"{"data": [{"supplierId": 1, "endPoint": "http://a/bid"}]}"#;
    let set = SupplierFeed::decode(json).unwrap();
    let s = &set.as_slice()[0];

    assert_eq!(s.open_rtb_version, crate::DEFAULT_OPENRTB_VERSION);
    assert_eq!(s.content_type, crate::DEFAULT_CONTENT_TYPE);
    assert_eq!(s.currency, crate::DEFAULT_CURRENCY);
    assert!(s.active);
    assert!(s.connection_keep_alive);
    assert_eq!(s.label(), "supplier:1");
}

#[test]
fn test_decode_preserves_feed_order() {
    let json = br#"{"data": [
        {"supplierId": 9, "endPoint": "http://9"},
        {"supplierId": 2, "endPoint": "http://2"},
        {"supplierId": 5, "endPoint": "http://5"}
    ]}"#;
    let set = SupplierFeed::decode(json).unwrap();
    let ids: Vec<u64> = set.ids().map(SupplierId::get).collect();
    assert_eq!(ids, vec![9, 2, 5]);
}

#[test]
fn test_decode_empty_data_is_ok() {
    let set = SupplierFeed::decode(br#"{"data": []}"#).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_decode_missing_data_is_error() {
    let err = SupplierFeed::decode(br#"{"suppliers": []}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::Decode(_)));
}

#[test]
fn test_decode_garbage_is_error() {
    let err = SupplierFeed::decode(b"<html>502</html>").unwrap_err();
    assert!(matches!(err, ProtocolError::Decode(_)));
}

#[test]
fn test_active_only_filters_inactive() {
    let json = br#"{"data": [
        {"supplierId": 1, "endPoint": "http://1"},
        {"supplierId": 2, "endPoint": "http://2", "active": false},
        {"supplierId": 3, "endPoint": "http://3"}
    ]}"#;
    let set: SupplierSet = SupplierFeed::decode(json).unwrap().active_only();
    let ids: Vec<u64> = set.ids().map(SupplierId::get).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_encode_then_decode_keeps_contents() {
    let json = br#"{"data": [{"supplierId": 4, "shortName": "four", "endPoint": "http://4"}]}"#;
    let set = SupplierFeed::decode(json).unwrap();
    let encoded = SupplierFeed::encode_pretty(&set).unwrap();
    assert!(encoded.contains("\"endPoint\""));
    assert_eq!(SupplierFeed::decode(encoded.as_bytes()).unwrap(), set);
}
