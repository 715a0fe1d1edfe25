//! Output filename sanitizing
//!
//! Derives collision-free, storage-safe PNG names from arbitrary upload
//! filenames: the original extension is stripped, the stem is reduced to a
//! conservative character set, and a random suffix keeps repeated uploads of
//! the same file distinct.

use uuid::Uuid;

/// Stem used when sanitizing leaves nothing of the original name
const FALLBACK_STEM: &str = "image";

/// Sanitize an upload filename into a unique PNG output name
///
/// The final extension is stripped, surrounding whitespace trimmed, spaces
/// replaced with underscores, and every character outside `[A-Za-z0-9_-]`
/// dropped. An 8-hex-character random suffix and the `.png` extension are
/// appended.
///
/// # Examples
/// ```
/// use squarefit::sanitize_output_name;
///
/// let name = sanitize_output_name("My Photo (1).jpeg");
/// assert!(name.starts_with("My_Photo_1_"));
/// assert!(name.ends_with(".png"));
/// ```
#[must_use]
pub fn sanitize_output_name(name: &str) -> String {
    let stem = match name.rfind('.') {
        // Only a trailing `.ext` counts as an extension, not a leading dot
        Some(idx) if idx > 0 => name.get(..idx).unwrap_or(name),
        _ => name,
    };

    let mut base: String = stem
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if base.is_empty() {
        base = FALLBACK_STEM.to_string();
    }

    let suffix = Uuid::new_v4().simple().to_string();
    let suffix = suffix.get(..8).unwrap_or("00000000");
    format!("{}_{}.png", base, suffix)
}
