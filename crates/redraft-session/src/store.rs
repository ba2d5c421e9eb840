//! Rewrite suggestion store with auto-expiring "copied" indicators.
//!
//! Holds the candidates of the most recent rewrite. Each entry carries an
//! independent `copied` flag set by a clipboard write and reverted by a timer
//! after a fixed delay. The revert is keyed by the entry's id, not its index,
//! so a suggestion removed or superseded before the timer fires is never
//! written to.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use redraft_core::RedraftError;

use crate::error::SessionError;

/// One generated rewrite candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub text: String,
    pub copied: bool,
}

impl Suggestion {
    fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            copied: false,
        }
    }
}

/// Clipboard capability boundary.
///
/// A failed write must not crash the store; it surfaces as `ClipboardDenied`
/// and the copied indicator stays unset.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), RedraftError>;
}

/// Clipboard implementation that records the write in the log.
///
/// The actual system clipboard belongs to the hosting surface; this is the
/// default used by the CLI composition root.
pub struct LoggingClipboard;

impl Clipboard for LoggingClipboard {
    fn write_text(&self, text: &str) -> Result<(), RedraftError> {
        tracing::info!(text_len = text.len(), "Copied to clipboard");
        Ok(())
    }
}

/// Thread-safe store of zero or more rewrite suggestions.
///
/// Clones share the same underlying entries; the revision session owns one
/// handle and the UI may hold another.
#[derive(Clone)]
pub struct SuggestionStore {
    entries: Arc<Mutex<Vec<Suggestion>>>,
    clipboard: Arc<dyn Clipboard>,
    copied_reset: Duration,
}

impl SuggestionStore {
    pub fn new(clipboard: Arc<dyn Clipboard>, copied_reset: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            clipboard,
            copied_reset,
        }
    }

    /// Replace every entry with a fresh batch.
    ///
    /// Indices are stable between calls to this method but not across them:
    /// all entries get new ids, so pending copied-reverts for the old batch
    /// become no-ops.
    pub fn replace_all(&self, texts: Vec<String>) {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        *entries = texts.into_iter().map(Suggestion::new).collect();
        tracing::debug!(count = entries.len(), "Suggestions replaced");
    }

    /// Remove the entry at `index`.
    ///
    /// Any revert scheduled for the removed entry is keyed by its id and will
    /// find nothing to write to.
    pub fn remove_at(&self, index: usize) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        if index >= entries.len() {
            return Err(SessionError::IndexOutOfRange(index));
        }
        let removed = entries.remove(index);
        tracing::debug!(id = %removed.id, "Suggestion removed");
        Ok(())
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.lock().expect("store mutex poisoned").clear();
    }

    /// Copy the entry at `index` to the clipboard and set its copied flag,
    /// scheduling the flag to revert after the configured delay.
    ///
    /// A clipboard failure is soft: it is logged, the flag stays false, and
    /// `ClipboardDenied` is returned.
    pub fn mark_copied(&self, index: usize) -> Result<(), SessionError> {
        let id = {
            let mut entries = self.entries.lock().expect("store mutex poisoned");
            let entry = entries
                .get_mut(index)
                .ok_or(SessionError::IndexOutOfRange(index))?;

            if let Err(e) = self.clipboard.write_text(&entry.text) {
                tracing::warn!(error = %e, "Clipboard write failed; copied flag left unset");
                return Err(SessionError::Core(RedraftError::ClipboardDenied(
                    e.to_string(),
                )));
            }
            entry.copied = true;
            entry.id
        };

        let entries = Arc::clone(&self.entries);
        let delay = self.copied_reset;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut entries = entries.lock().expect("store mutex poisoned");
            // The entry may have been removed or superseded in the interim;
            // in that case there is nothing to revert.
            if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
                entry.copied = false;
            }
        });

        Ok(())
    }

    /// Snapshot of the current entries.
    pub fn snapshot(&self) -> Vec<Suggestion> {
        self.entries.lock().expect("store mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().expect("store mutex poisoned").is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RESET: Duration = Duration::from_millis(2000);

    /// Clipboard double that records writes and can be told to fail.
    struct FakeClipboard {
        writes: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeClipboard {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                writes: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&self, text: &str) -> Result<(), RedraftError> {
            if self.fail {
                return Err(RedraftError::ClipboardDenied(
                    "permission denied".to_string(),
                ));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn store_with(clipboard: Arc<FakeClipboard>) -> SuggestionStore {
        SuggestionStore::new(clipboard, RESET)
    }

    // ---- Basic operations ----

    #[test]
    fn test_new_store_is_empty() {
        let store = store_with(FakeClipboard::new(false));
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_replace_all() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["one".to_string(), "two".to_string()]);

        let entries = store.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "one");
        assert_eq!(entries[1].text, "two");
        assert!(entries.iter().all(|e| !e.copied));
    }

    #[test]
    fn test_replace_all_supersedes_previous_batch() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["old".to_string()]);
        let old_id = store.snapshot()[0].id;

        store.replace_all(vec!["new".to_string()]);
        let entries = store.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "new");
        assert_ne!(entries[0].id, old_id);
    }

    #[test]
    fn test_remove_at() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        store.remove_at(1).unwrap();

        let texts: Vec<String> = store.snapshot().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["only".to_string()]);
        let err = store.remove_at(5).unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange(5)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["a".to_string(), "b".to_string()]);
        store.clear();
        assert!(store.is_empty());
    }

    // ---- Copied flag lifecycle ----

    #[tokio::test(start_paused = true)]
    async fn test_mark_copied_sets_flag_and_writes_clipboard() {
        let clipboard = FakeClipboard::new(false);
        let store = store_with(Arc::clone(&clipboard));
        store.replace_all(vec!["copy me".to_string()]);

        store.mark_copied(0).unwrap();
        assert!(store.snapshot()[0].copied);
        assert_eq!(clipboard.writes.lock().unwrap().as_slice(), ["copy me"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copied_flag_reverts_after_delay() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["copy me".to_string()]);
        store.mark_copied(0).unwrap();

        // Just before the delay the flag is still set.
        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(store.snapshot()[0].copied);

        // After the delay it has reverted.
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!store.snapshot()[0].copied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_before_revert_leaves_no_stale_write() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["first".to_string(), "second".to_string()]);
        store.mark_copied(0).unwrap();

        // Removing index 0 shifts "second" into slot 0 before the timer fires.
        store.remove_at(0).unwrap();

        // At t=1000 mark the survivor; its own revert is due at t=3000.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        store.mark_copied(0).unwrap();

        // The stale timer for "first" fires at t=2000 and must not clear the
        // flag now occupying index 0.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let entries = store.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "second");
        assert!(entries[0].copied);

        // The survivor's own timer still reverts it on schedule.
        tokio::time::sleep(Duration::from_millis(501)).await;
        assert!(!store.snapshot()[0].copied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revert_skips_superseded_batch() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["old".to_string()]);
        store.mark_copied(0).unwrap();

        // A new rewrite supersedes the batch before the timer fires.
        store.replace_all(vec!["new".to_string()]);
        store.mark_copied(0).unwrap();

        tokio::time::sleep(Duration::from_millis(2001)).await;
        // Both timers have fired; neither panicked and the new entry's flag
        // was reverted by its own timer only.
        let entries = store.snapshot();
        assert_eq!(entries[0].text, "new");
        assert!(!entries[0].copied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_flags_per_entry() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all(vec!["a".to_string(), "b".to_string()]);

        store.mark_copied(1).unwrap();
        let entries = store.snapshot();
        assert!(!entries[0].copied);
        assert!(entries[1].copied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_copied_out_of_range() {
        let store = store_with(FakeClipboard::new(false));
        let err = store.mark_copied(0).unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange(0)));
    }

    // ---- Clipboard failure ----

    #[tokio::test(start_paused = true)]
    async fn test_clipboard_failure_is_soft() {
        let store = store_with(FakeClipboard::new(true));
        store.replace_all(vec!["text".to_string()]);

        let err = store.mark_copied(0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Core(RedraftError::ClipboardDenied(_))
        ));
        // The copied indicator stays unset.
        assert!(!store.snapshot()[0].copied);
    }

    // ---- Shared handles ----

    #[test]
    fn test_clones_share_entries() {
        let store = store_with(FakeClipboard::new(false));
        let other = store.clone();
        store.replace_all(vec!["shared".to_string()]);
        assert_eq!(other.len(), 1);
    }

    // ---- Logging clipboard ----

    #[test]
    fn test_logging_clipboard_succeeds() {
        assert!(LoggingClipboard.write_text("anything").is_ok());
    }

    // ---- Concurrency smoke ----

    #[tokio::test]
    async fn test_concurrent_mark_copied() {
        let store = store_with(FakeClipboard::new(false));
        store.replace_all((0..8).map(|i| format!("s{}", i)).collect());

        let counter = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                if store.mark_copied(i).is_ok() {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
        assert!(store.snapshot().iter().all(|e| e.copied));
    }
}
