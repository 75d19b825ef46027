//! Turns the serialized key stream into replace commands.
//!
//! The dispatcher owns every keystroke buffer and toggle state. Each call to
//! [`Dispatcher::handle`] consumes one event and yields at most one
//! [`Command`], which the caller executes through a [`crate::TextSink`].

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    buffer::{BufferManager, ScopeId},
    event::{Boundary, KeyEvent},
    hotkey::{Hotkey, Key, MOD_SHORTCUT},
    text::{
        convert::{DirectionPolicy, convert},
        mapping::MappingTable,
    },
    toggle::ToggleState,
};

/// One enabled language pair as the dispatcher sees it.
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub hotkey: Hotkey,
    pub table: Arc<MappingTable>,
    pub timeout: Duration,
    pub direction: DirectionPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceKind {
    Convert,
    Revert,
}

/// Erase `delete` characters before the caret, then type `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub scope: ScopeId,
    pub delete: usize,
    pub insert: String,
    pub kind: ReplaceKind,
}

#[derive(Debug)]
pub struct Dispatcher {
    scopes: Vec<Scope>,
    buffers: BufferManager,
    toggles: Vec<ToggleState>,
}

impl Dispatcher {
    pub fn new(scopes: Vec<Scope>) -> Self {
        let buffers = BufferManager::new(scopes.iter().map(|s| s.timeout));
        let toggles = vec![ToggleState::default(); scopes.len()];
        Self {
            scopes,
            buffers,
            toggles,
        }
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    pub fn buffers(&self) -> &BufferManager {
        &self.buffers
    }

    pub fn toggle(&self, id: ScopeId) -> Option<&ToggleState> {
        self.toggles.get(id.0)
    }

    pub fn scope_for(&self, hotkey: Hotkey) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|s| s.hotkey == hotkey)
            .map(ScopeId)
    }

    pub fn handle(&mut self, event: KeyEvent, now: Instant) -> Option<Command> {
        match event {
            KeyEvent::Typed(ch) => self.buffers.on_character(ch, now),
            KeyEvent::Backspace => self.buffers.on_backspace(now),
            KeyEvent::Boundary(kind) => self.on_boundary(kind),
            KeyEvent::Chord { hotkey, text } => {
                if let Some(scope) = self.scope_for(hotkey) {
                    return self.on_hotkey(scope, now);
                }
                self.on_unmatched_chord(hotkey, text, now);
            }
        }
        None
    }

    /// Handles a hotkey press for `scope`.
    ///
    /// Returns `None` when the buffer is empty or stale, or when converting
    /// would not change the text.
    #[tracing::instrument(level = "debug", skip_all, fields(scope = scope.0))]
    pub fn on_hotkey(&mut self, scope: ScopeId, now: Instant) -> Option<Command> {
        let pair = self.scopes.get(scope.0)?;

        let Some(snapshot) = self.buffers.snapshot_and_clear(scope, now) else {
            self.toggles[scope.0].reset();
            tracing::debug!(pair = %pair.name, "buffer empty or stale, nothing to convert");
            return None;
        };

        let delete = snapshot.chars().count();
        let toggle = &mut self.toggles[scope.0];

        let (insert, kind) = match toggle.toggle_back(&snapshot) {
            Some(original) => (original, ReplaceKind::Revert),
            None => {
                let direction = pair.direction.resolve(&snapshot, &pair.table);
                let converted = convert(&snapshot, &pair.table, direction);
                if converted == snapshot {
                    self.buffers.reseed(scope, &snapshot, now);
                    tracing::debug!(pair = %pair.name, "no mapped characters in buffer");
                    return None;
                }
                tracing::trace!(?direction, "converted buffer");
                toggle.record_conversion(snapshot, converted.clone());
                (converted, ReplaceKind::Convert)
            }
        };

        self.buffers.reseed(scope, &insert, now);
        tracing::info!(
            pair = %pair.name,
            ?kind,
            delete,
            insert = insert.chars().count(),
            "replacing buffered text"
        );

        Some(Command {
            scope,
            delete,
            insert,
            kind,
        })
    }

    /// Forgets everything about `scope` after its replacement could not be
    /// typed. The user has to retype.
    pub fn injection_failed(&mut self, scope: ScopeId) {
        self.buffers.clear(scope);
        if let Some(toggle) = self.toggles.get_mut(scope.0) {
            toggle.reset();
        }
    }

    fn on_boundary(&mut self, kind: Boundary) {
        tracing::trace!(?kind, "boundary, dropping buffers");
        self.buffers.on_boundary_key();
        self.toggles.iter_mut().for_each(ToggleState::reset);
    }

    fn on_unmatched_chord(&mut self, hotkey: Hotkey, text: Option<char>, now: Instant) {
        if hotkey.mods & MOD_SHORTCUT != 0 {
            self.on_boundary(Boundary::Shortcut);
            return;
        }

        // Option and function-key presses: type what they produce, or treat
        // caret movement and word deletion as boundaries.
        match (text, hotkey.key) {
            (Some(ch), _) => self.buffers.on_character(ch, now),
            (None, Key::Return) => self.on_boundary(Boundary::Return),
            (None, Key::Tab) => self.on_boundary(Boundary::Tab),
            (None, Key::Escape) => self.on_boundary(Boundary::Escape),
            (None, key) if key == Key::Backspace || key.is_navigation() => {
                self.on_boundary(Boundary::Navigation);
            }
            _ => {}
        }
    }
}
