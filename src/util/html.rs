/// Escape markup-significant characters. Absent input yields an empty string.
///
/// Must run before any highlight markup is injected into the same text.
pub fn escape_html(content: Option<&str>) -> String {
    match content {
        Some(s) => html(s),
        None => String::new(),
    }
}

pub fn html(content: &str) -> String {
    content.replace('<', "&lt;").replace('>', "&gt;")
}
