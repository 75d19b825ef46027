//! Per-scope keystroke buffers.
//!
//! Staleness is computed lazily from the timestamp of the last keystroke
//! whenever a buffer is touched, so no timer thread is involved.

use std::time::{Duration, Instant};

/// Index of a language pair inside the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Empty,
    Accumulating,
}

/// Recently typed characters for one scope.
#[derive(Debug, Clone)]
pub struct KeyBuffer {
    text: String,
    last_update: Option<Instant>,
    timeout: Duration,
}

impl KeyBuffer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            text: String::new(),
            last_update: None,
            timeout,
        }
    }

    pub fn state(&self) -> BufferState {
        if self.text.is_empty() {
            BufferState::Empty
        } else {
            BufferState::Accumulating
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters, which is how many backspaces erase the buffer.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when more than `timeout` passed since the last keystroke.
    pub fn is_stale(&self, now: Instant) -> bool {
        self.last_update
            .is_some_and(|t| now.saturating_duration_since(t) > self.timeout)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.last_update = None;
    }

    fn expire_if_stale(&mut self, now: Instant) {
        if self.is_stale(now) {
            self.clear();
        }
    }

    fn push(&mut self, ch: char, now: Instant) {
        self.expire_if_stale(now);
        self.text.push(ch);
        self.last_update = Some(now);
    }

    fn backspace(&mut self, now: Instant) {
        self.expire_if_stale(now);
        if self.text.pop().is_some() {
            self.last_update = Some(now);
        }
    }

    fn take(&mut self, now: Instant) -> Option<String> {
        self.expire_if_stale(now);
        let text = std::mem::take(&mut self.text);
        self.last_update = None;
        (!text.is_empty()).then_some(text)
    }

    fn reseed(&mut self, text: &str, now: Instant) {
        self.text.clear();
        self.text.push_str(text);
        self.last_update = (!text.is_empty()).then_some(now);
    }
}

/// Owns one [`KeyBuffer`] per scope.
///
/// Every scope buffers every printable character; which pair the text belongs
/// to is decided only when a hotkey fires.
#[derive(Debug, Clone, Default)]
pub struct BufferManager {
    buffers: Vec<KeyBuffer>,
}

impl BufferManager {
    pub fn new<I>(timeouts: I) -> Self
    where
        I: IntoIterator<Item = Duration>,
    {
        Self {
            buffers: timeouts.into_iter().map(KeyBuffer::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn get(&self, scope: ScopeId) -> Option<&KeyBuffer> {
        self.buffers.get(scope.0)
    }

    pub fn on_character(&mut self, ch: char, now: Instant) {
        for buf in &mut self.buffers {
            buf.push(ch, now);
        }
    }

    pub fn on_backspace(&mut self, now: Instant) {
        for buf in &mut self.buffers {
            buf.backspace(now);
        }
    }

    /// Drops every scope's buffer.
    pub fn on_boundary_key(&mut self) {
        for buf in &mut self.buffers {
            buf.clear();
        }
    }

    /// Returns the buffered text if it is fresh and non-empty.
    ///
    /// The buffer is empty afterwards either way.
    pub fn snapshot_and_clear(&mut self, scope: ScopeId, now: Instant) -> Option<String> {
        self.buffers.get_mut(scope.0)?.take(now)
    }

    /// Replaces a scope's contents with text that is now on screen.
    pub fn reseed(&mut self, scope: ScopeId, text: &str, now: Instant) {
        if let Some(buf) = self.buffers.get_mut(scope.0) {
            buf.reseed(text, now);
        }
    }

    pub fn clear(&mut self, scope: ScopeId) {
        if let Some(buf) = self.buffers.get_mut(scope.0) {
            buf.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ScopeId = ScopeId(0);
    const B: ScopeId = ScopeId(1);

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn typed(mgr: &mut BufferManager, s: &str, at: Instant) {
        for ch in s.chars() {
            mgr.on_character(ch, at);
        }
    }

    #[test]
    fn accumulates_in_order() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10)]);
        assert_eq!(mgr.get(A).unwrap().state(), BufferState::Empty);

        typed(&mut mgr, "hello", t0);
        assert_eq!(mgr.get(A).unwrap().state(), BufferState::Accumulating);
        assert_eq!(mgr.snapshot_and_clear(A, t0).as_deref(), Some("hello"));
        assert_eq!(mgr.get(A).unwrap().state(), BufferState::Empty);
    }

    #[test]
    fn timeout_boundary_is_inclusive() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10)]);

        typed(&mut mgr, "abc", t0);
        assert_eq!(mgr.snapshot_and_clear(A, t0 + secs(10)).as_deref(), Some("abc"));

        typed(&mut mgr, "abc", t0);
        let just_after = t0 + secs(10) + Duration::from_millis(1);
        assert_eq!(mgr.snapshot_and_clear(A, just_after), None);
    }

    #[test]
    fn stale_text_is_dropped_before_new_keystroke() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(2)]);

        typed(&mut mgr, "old", t0);
        typed(&mut mgr, "new", t0 + secs(5));
        assert_eq!(mgr.snapshot_and_clear(A, t0 + secs(5)).as_deref(), Some("new"));
    }

    #[test]
    fn timestamp_tracks_latest_keystroke() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(3)]);

        typed(&mut mgr, "ab", t0);
        typed(&mut mgr, "c", t0 + secs(2));
        assert_eq!(mgr.snapshot_and_clear(A, t0 + secs(4)).as_deref(), Some("abc"));
    }

    #[test]
    fn boundary_clears_every_scope() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10), secs(10)]);

        typed(&mut mgr, "abc", t0);
        mgr.on_boundary_key();
        assert_eq!(mgr.snapshot_and_clear(A, t0), None);
        assert_eq!(mgr.snapshot_and_clear(B, t0), None);
    }

    #[test]
    fn scopes_buffer_independently() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10), secs(1)]);

        typed(&mut mgr, "abc", t0);
        assert_eq!(mgr.snapshot_and_clear(A, t0 + secs(5)).as_deref(), Some("abc"));
        assert_eq!(mgr.snapshot_and_clear(B, t0 + secs(5)), None);
    }

    #[test]
    fn backspace_pops_last_character() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10)]);

        typed(&mut mgr, "hello", t0);
        mgr.on_backspace(t0);
        mgr.on_backspace(t0);
        assert_eq!(mgr.get(A).unwrap().as_str(), "hel");
        assert_eq!(mgr.get(A).unwrap().char_len(), 3);
    }

    #[test]
    fn backspace_on_empty_buffer_is_harmless() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10)]);
        mgr.on_backspace(t0);
        assert_eq!(mgr.get(A).unwrap().state(), BufferState::Empty);
    }

    #[test]
    fn reseed_replaces_contents_and_refreshes_timestamp() {
        let t0 = Instant::now();
        let mut mgr = BufferManager::new([secs(10)]);

        typed(&mut mgr, "abcd", t0);
        let snap = mgr.snapshot_and_clear(A, t0 + secs(3));
        assert_eq!(snap.as_deref(), Some("abcd"));

        mgr.reseed(A, "שלום", t0 + secs(3));
        assert_eq!(mgr.get(A).unwrap().char_len(), 4);
        assert_eq!(mgr.snapshot_and_clear(A, t0 + secs(12)).as_deref(), Some("שלום"));
    }

    #[test]
    fn unknown_scope_is_none() {
        let mut mgr = BufferManager::new([secs(10)]);
        assert_eq!(mgr.snapshot_and_clear(ScopeId(7), Instant::now()), None);
    }
}
