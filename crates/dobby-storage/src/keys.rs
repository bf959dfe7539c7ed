//! Blob key generation.

use chrono::Utc;
use uuid::Uuid;

/// A fresh blob name: `<unix millis>-<12 hex chars><ext>`, where `ext` is
/// the extension of `original_name` including the dot, or empty.
pub fn blob_name(original_name: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        &random[..12],
        extension(original_name)
    )
}

/// The extension of the final path segment, including the leading dot.
fn extension(original_name: &str) -> &str {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    match base.rfind('.') {
        Some(0) | None => "",
        Some(i) if i + 1 == base.len() => "",
        Some(i) => &base[i..],
    }
}
