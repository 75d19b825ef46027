//! Platform independent core of language-fixer.
//!
//! The crate owns the keystroke buffers, the toggle-back bookkeeping and the
//! layout conversion tables. It never talks to the OS: callers feed it
//! [`KeyEvent`]s and execute the [`Command`]s it returns through a [`TextSink`].

pub mod buffer;
pub mod dispatch;
pub mod event;
pub mod hotkey;
pub mod sink;
pub mod text;
pub mod toggle;

pub use buffer::{BufferManager, BufferState, KeyBuffer, ScopeId};
pub use dispatch::{Command, Dispatcher, ReplaceKind, Scope};
pub use event::{Boundary, KeyEvent};
pub use hotkey::{Hotkey, HotkeyParseError, Key, MOD_ALT, MOD_CMD, MOD_CTRL, MOD_SHIFT};
pub use sink::{InjectError, TextSink, apply_command};
pub use text::{
    convert::{Direction, DirectionPolicy, convert, detect_direction},
    mapping::MappingTable,
};
pub use toggle::{LastAction, ToggleState};
