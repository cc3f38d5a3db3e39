//! Turning whatever the caller typed into a bare handle.

const STRIPPED: [&str; 3] = ["https://", "http://", "t.me/"];

/// Normalize a raw identifier (`@name`, `t.me/name`, `https://t.me/name/`) into a bare handle.
///
/// Never fails; the result may be empty.
pub fn normalize(raw: &str) -> String {
    let mut handle = raw.strip_prefix('@').unwrap_or(raw).to_string();

    for needle in STRIPPED {
        handle = handle.replace(needle, "");
    }

    handle.retain(|c| c != '/' && c != ':');
    handle
}
