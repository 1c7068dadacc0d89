use super::*;

#[test]
fn test_request_id_increment() {
    let id = AtomicU64::new(1);
    assert_eq!(id.fetch_add(1, Ordering::SeqCst), 1);
    assert_eq!(id.fetch_add(1, Ordering::SeqCst), 2);
    assert_eq!(id.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_connect_rejects_malformed_endpoint() {
    let result = CdpClient::connect("not a url", Duration::from_secs(1)).await;
    assert!(matches!(result, Err(CdpError::ConnectionFailed(_))));
}

#[tokio::test]
async fn test_connect_reports_missing_chrome() {
    // Port 9 (discard) is essentially never serving the DevTools endpoint.
    let result = CdpClient::connect("http://127.0.0.1:9", Duration::from_secs(1)).await;
    assert!(matches!(result, Err(CdpError::ChromeNotAvailable(_))));
}
