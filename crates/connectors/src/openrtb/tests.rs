//! Tests for the OpenRTB connector factory

use super::*;

fn supplier(endpoint: &str) -> SupplierDefinition {
    SupplierDefinition::new(SupplierId::new(11), endpoint)
}

#[tokio::test]
async fn test_build_valid_endpoint() {
    let factory = OpenRtbConnectorFactory::default();
    let connector = factory.build(&supplier("http://dsp.example:8080/bid")).await.unwrap();

    assert_eq!(connector.supplier_id(), SupplierId::new(11));
    assert_eq!(connector.endpoint().host_str(), Some("dsp.example"));
    assert_eq!(connector.endpoint().port(), Some(8080));
    assert!(!connector.is_closed());
    assert_eq!(connector.request_count(), 0);
}

#[tokio::test]
async fn test_build_https_without_keep_alive() {
    let factory = OpenRtbConnectorFactory::default();
    let mut def = supplier("https://dsp.example/openrtb");
    def.connection_keep_alive = false;

    assert!(factory.build(&def).await.is_ok());
}

#[tokio::test]
async fn test_build_rejects_bad_endpoints() {
    let factory = OpenRtbConnectorFactory::default();

    for (endpoint, reason) in [
        ("", "empty endpoint"),
        ("   ", "empty endpoint"),
        ("not a url", "relative URL"),
        ("ftp://dsp.example/bid", "unsupported scheme"),
        ("http://dsp.example:notaport/bid", "port"),
    ] {
        let err = factory.build(&supplier(endpoint)).await.unwrap_err();
        match err {
            ConnectorError::InvalidEndpoint { supplier_id, reason: got, .. } => {
                assert_eq!(supplier_id, SupplierId::new(11));
                assert!(got.contains(reason), "{endpoint:?}: {got}");
            }
            other => panic!("{endpoint:?}: unexpected error {other}"),
        }
    }
}

#[tokio::test]
async fn test_retired_connector_refuses_send() {
    let factory = OpenRtbConnectorFactory::default();
    let connector = factory.build(&supplier("http://127.0.0.1:9/bid")).await.unwrap();

    connector.retire();
    connector.retire();
    assert!(connector.is_closed());

    let err = connector.send(Bytes::from_static(b"{}")).await.unwrap_err();
    assert!(matches!(err, ConnectorError::Closed(id) if id == SupplierId::new(11)));
    assert_eq!(connector.request_count(), 0);
}

#[test]
fn test_no_bid_detection() {
    let no_bid = BidResponse {
        status: 204,
        body: Bytes::new(),
    };
    let bid = BidResponse {
        status: 200,
        body: Bytes::from_static(br#"{"id":"1"}"#),
    };
    assert!(no_bid.is_no_bid());
    assert!(!bid.is_no_bid());
}
