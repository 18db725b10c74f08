//! HTML pages for the main and staff subdomains
//!
//! Templates are compiled in and filled with escaped values.

const INDEX_TEMPLATE: &str = include_str!("../../templates/main/index.html");
const STAFF_TEMPLATE: &str = include_str!("../../templates/staff/index.html");
const ERROR_TEMPLATE: &str = include_str!("../../templates/errors/error.html");

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Landing page
pub fn index(invite_url: &str) -> String {
    INDEX_TEMPLATE.replace("{{invite_url}}", &escape(invite_url))
}

/// Staff landing page
pub fn staff_index() -> String {
    STAFF_TEMPLATE.to_string()
}

/// Error page for a status code
pub fn error(code: u16, title: &str, message: &str) -> String {
    ERROR_TEMPLATE
        .replace("{{code}}", &code.to_string())
        .replace("{{title}}", &escape(title))
        .replace("{{message}}", &escape(message))
}
