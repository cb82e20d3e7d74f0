//! Escaping and formatting helpers shared by the view layer.
//!
//! Everything here is pure. Callers that insert user-supplied text into
//! markup must pass it through [`escape_html`] first.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Escape text so it renders literally inside HTML markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a byte count as `512 B`, `2.0 KB` or `5.0 MB`.
///
/// The tenths digit rounds half up, so `1280` bytes is `1.3 KB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        return format!("{bytes} B");
    }
    if bytes < MIB {
        return format!("{} KB", one_decimal(bytes, KIB));
    }
    format!("{} MB", one_decimal(bytes, MIB))
}

/// `bytes / unit` with one decimal, halves rounded up.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn one_decimal(bytes: u64, unit: u64) -> String {
    let tenths = (bytes as f64 * 10.0 / unit as f64).round() as u64;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Format a similarity fraction in `[0, 1]` as a whole percentage (`0.87` -> `87%`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_similarity(similarity: f64) -> String {
    let percent = (similarity * 100.0).round() as i64;
    format!("{percent}%")
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
