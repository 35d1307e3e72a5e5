use dioxus::document::eval;
use serde::Deserialize;
use services::ClickContext;
use tracker_core::milestone::NormalizedPoint;

/// Widest viewport, in CSS pixels, that keeps the sidebar collapsed.
const NARROW_VIEWPORT: f64 = 768.0;

/// Selection and viewport state read from the page.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub(super) struct PointerProbe {
    selecting: bool,
    width: f64,
    height: f64,
}

impl PointerProbe {
    /// An unknown (zero) width is not narrow.
    pub(super) fn is_narrow(self) -> bool {
        self.width > 0.0 && self.width <= NARROW_VIEWPORT
    }

    /// Click context for a click at client coordinates `(x, y)`.
    pub(super) fn click_at(self, x: f64, y: f64) -> ClickContext {
        if self.selecting {
            return ClickContext::selecting();
        }
        ClickContext::at(NormalizedPoint::from_client(x, y, self.width, self.height))
    }
}

const POINTER_PROBE_SCRIPT: &str = r#"
    const sel = window.getSelection();
    return {
        selecting: !!sel && sel.toString().length > 0,
        width: window.innerWidth || 0,
        height: window.innerHeight || 0,
    };
"#;

pub(super) async fn probe_pointer() -> PointerProbe {
    eval(POINTER_PROBE_SCRIPT)
        .join::<PointerProbe>()
        .await
        .unwrap_or_default()
}

pub(super) async fn copy_to_clipboard(text: &str) -> bool {
    let script = copy_to_clipboard_script(text);
    eval(&script).join::<bool>().await.unwrap_or(false)
}

fn copy_to_clipboard_script(text: &str) -> String {
    format!(
        r#"
    try {{
        await navigator.clipboard.writeText({text});
        return true;
    }} catch (err) {{
        return false;
    }}
"#,
        text = js_string_literal(text),
    )
}

fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
