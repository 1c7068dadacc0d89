use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Runtime.addBinding".to_string(),
        params: Some(serde_json::json!({"name": "__chatsweepEmit"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Runtime.addBinding"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 2,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"sessionId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
    assert!(resp.method.is_none());
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{
        "method": "Runtime.bindingCalled",
        "params": {"name": "__chatsweepEmit", "payload": "{\"type\":\"domChanged\"}", "executionContextId": 3},
        "sessionId": "S1"
    }"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.method.as_deref(), Some("Runtime.bindingCalled"));
    let binding: BindingCalled = serde_json::from_value(resp.params.unwrap()).unwrap();
    assert_eq!(binding.name, "__chatsweepEmit");
    assert_eq!(binding.execution_context_id, Some(3));
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "ChatGPT",
        "url": "https://ChatGPT.com/c/abc",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert!(info.is_page());
    assert_eq!(info.host().as_deref(), Some("chatgpt.com"));
}

#[test]
fn test_page_info_without_host() {
    let json = r#"{"id": "x", "type": "service_worker", "title": "", "url": "about:blank"}"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(!info.is_page());
    assert_eq!(info.host(), None);
}

#[test]
fn test_frame_main() {
    let frame: FrameInfo =
        serde_json::from_str(r#"{"id": "F", "url": "https://claude.ai/new"}"#).unwrap();
    assert!(frame.is_main());
    let child: FrameInfo =
        serde_json::from_str(r#"{"id": "G", "parentId": "F", "url": "about:blank"}"#).unwrap();
    assert!(!child.is_main());
}

#[test]
fn test_mouse_event_type_serialize() {
    let json = serde_json::to_string(&MouseEventType::MouseMoved).unwrap();
    assert_eq!(json, "\"mouseMoved\"");
}
