//! Global keyboard hook and synthetic input on macOS.
//!
//! The listener needs the Accessibility and Input Monitoring permissions.
//! Without them `rdev::listen` either fails or silently sees no events.

mod inject;
mod keys;

use std::time::Instant;

use language_fixer_core::{Boundary, Dispatcher, KeyEvent};
use rdev::{Event, EventType};

use self::{inject::CgSink, keys::ModState};
use crate::app::{App, AppError, InjectOptions};

/// Starts the injection worker and blocks on the event tap.
pub(crate) fn run(dispatcher: Dispatcher, opts: InjectOptions) -> Result<(), AppError> {
    let app = App::start(dispatcher, CgSink, opts)?;
    let mut mods = ModState::default();

    tracing::info!("listening for keyboard events");
    rdev::listen(move |event| on_event(&app, &mut mods, &event))
        .map_err(|e| AppError::Listen(format!("{e:?}")))
}

fn on_event(app: &App, mods: &mut ModState, event: &Event) {
    let now = Instant::now();

    match event.event_type {
        EventType::KeyPress(raw) => {
            // Modifier state is tracked even while injecting, otherwise a
            // release seen during injection leaves a stuck modifier.
            if mods.press(raw) || keys::is_inert(raw) || app.is_injecting() {
                return;
            }
            let text = keys::press_text(raw, event.name.as_deref());
            let classified = match keys::to_key(raw) {
                Some(key) => KeyEvent::from_press(key, mods.mask(), text),
                None => Some(KeyEvent::from_unmapped(mods.mask(), text)),
            };
            if let Some(ev) = classified {
                app.handle(ev, now);
            }
        }
        EventType::KeyRelease(raw) => {
            mods.release(raw);
        }
        EventType::ButtonPress(_) => {
            app.handle(KeyEvent::Boundary(Boundary::Pointer), now);
        }
        _ => {}
    }
}
