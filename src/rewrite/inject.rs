//! Script injection into captured HTML.
//!
//! Pure byte-level splicing: no HTML parsing, no charset handling.

use super::script::TOUCH_POINTS_SCRIPT;

/// Closing body tag, matched case-sensitively.
pub const BODY_CLOSE: &[u8] = b"</body>";

/// Where the script ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Replaced the last `</body>`, found at this byte offset.
    BeforeBodyClose(usize),
    /// No `</body>` in the document; script appended at the end.
    Appended,
}

impl Placement {
    pub fn label(&self) -> &'static str {
        match self {
            Placement::BeforeBodyClose(_) => "before_body_close",
            Placement::Appended => "appended",
        }
    }
}

/// A rewritten document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub body: Vec<u8>,
    pub placement: Placement,
}

/// Byte offset of the last `</body>` in `content`.
pub fn find_body_close(content: &[u8]) -> Option<usize> {
    content
        .windows(BODY_CLOSE.len())
        .rposition(|window| window == BODY_CLOSE)
}

/// Splice the touch-point script into an HTML document.
///
/// The last `</body>` is consumed and replaced by the script, which carries
/// its own closing tag. Without a closing tag the script is appended as-is.
pub fn inject_touch_points(content: &[u8]) -> Injected {
    let script = TOUCH_POINTS_SCRIPT.as_bytes();
    let mut body = Vec::with_capacity(content.len() + script.len());

    let placement = match find_body_close(content) {
        Some(idx) => {
            body.extend_from_slice(&content[..idx]);
            body.extend_from_slice(script);
            body.extend_from_slice(&content[idx + BODY_CLOSE.len()..]);
            Placement::BeforeBodyClose(idx)
        }
        None => {
            body.extend_from_slice(content);
            body.extend_from_slice(script);
            Placement::Appended
        }
    };

    Injected { body, placement }
}
