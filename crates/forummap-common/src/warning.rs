//! Input warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The tokenizer uses it to report recoverable markup errors that the grammar
//! never sees (an unterminated comment, a stray NUL character, ...).

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning and report whether it is new.
///
/// A poisoned lock only means another thread panicked while inserting; the
/// set itself is still usable.
fn record(key: String) -> bool {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.get_or_insert_with(HashSet::new).insert(key)
}

/// Warn about a recoverable input problem (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("tokenizer", "parse error: eof-in-tag");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[forummap {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if the given warning has already been reported.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before loading a new document).
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_is_recorded_once() {
        assert!(record("[test] first".to_string()));
        assert!(!record("[test] first".to_string()));
    }

    #[test]
    fn test_warn_once_marks_message() {
        warn_once("test", "marked message");
        assert!(was_warned("test", "marked message"));
        assert!(!was_warned("test", "never reported"));
    }
}
