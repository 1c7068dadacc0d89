//! Bridge JavaScript loader.
//!
//! The page-side half lives in `bridge_script.js` and is embedded at build
//! time. Every engine call becomes one `Runtime.evaluate` of an expression
//! built by [`bridge_call`].

use serde_json::Value;

/// Binding the page calls with JSON-encoded UI events.
pub const BINDING_NAME: &str = "__chatsweepEmit";

/// Global the bridge installs its API under.
pub const BRIDGE_GLOBAL: &str = "__chatsweep";

/// Load the bridge JavaScript code.
pub(crate) fn bridge_script() -> &'static str {
    include_str!("bridge_script.js")
}

/// Expression invoking `window.__chatsweep.<method>(...args)`.
///
/// Arguments are embedded as JSON literals, which are valid JavaScript.
pub(crate) fn bridge_call(method: &str, args: &[Value]) -> String {
    let args = args
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "(() => {{ const b = window.{global}; \
         if (!b) throw new Error('chatsweep bridge missing'); \
         return b.{method}({args}); }})()",
        global = BRIDGE_GLOBAL,
        method = method,
        args = args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_defines_api() {
        let script = bridge_script();
        assert!(script.contains("window.__chatsweep = {"));
        assert!(script.contains(BINDING_NAME));
        for method in [
            "listItems",
            "findWithin",
            "visibleControls",
            "hover",
            "activate",
            "ensureToggle",
            "setMode",
            "mountToolbar",
            "updateToolbar",
            "unmountToolbar",
            "dragBox",
            "highlight",
        ] {
            assert!(script.contains(&format!("{}(", method)), "missing {}", method);
        }
    }

    #[test]
    fn test_bridge_call_embeds_json() {
        let expr = bridge_call("findWithin", &[json!("cs-3"), json!("button[aria-label=\"x\"]")]);
        assert!(expr.contains("b.findWithin(\"cs-3\", \"button[aria-label=\\\"x\\\"]\")"));
        assert!(expr.contains("window.__chatsweep"));
    }

    #[test]
    fn test_bridge_call_no_args() {
        let expr = bridge_call("mountToolbar", &[]);
        assert!(expr.contains("b.mountToolbar()"));
    }

    #[test]
    fn test_bridge_call_escapes_script_text() {
        let expr = bridge_call("ensureToggle", &[json!("nav"), json!("'); alert(1); ('"), json!(false)]);
        assert!(expr.contains("\"'); alert(1); ('\""));
        assert!(expr.ends_with("false); })()"));
    }
}
