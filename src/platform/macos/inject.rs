//! Synthetic keyboard input through Quartz events.

use std::{thread, time::Duration};

use core_graphics::{
    event::{CGEvent, CGEventFlags, CGEventTapLocation, CGKeyCode},
    event_source::{CGEventSource, CGEventSourceStateID},
};
use language_fixer_core::{InjectError, TextSink};

/// `kVK_Delete`, the backspace key.
const KEY_BACKSPACE: CGKeyCode = 0x33;
const KEY_SPACE: CGKeyCode = 0x31;

/// Quartz truncates event strings longer than 20 UTF-16 units.
const MAX_EVENT_UTF16: usize = 20;

const KEY_GAP: Duration = Duration::from_millis(2);

/// Posts events at the HID level so they reach whichever app has focus.
pub(super) struct CgSink;

fn event_source() -> Result<CGEventSource, InjectError> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState).map_err(|()| InjectError::EventSource)
}

fn key_event(source: &CGEventSource, key: CGKeyCode, down: bool) -> Result<CGEvent, InjectError> {
    CGEvent::new_keyboard_event(source.clone(), key, down).map_err(|()| InjectError::EventCreate)
}

fn tap_key(source: &CGEventSource, key: CGKeyCode, flags: CGEventFlags) -> Result<(), InjectError> {
    for down in [true, false] {
        let event = key_event(source, key, down)?;
        event.set_flags(flags);
        event.post(CGEventTapLocation::HID);
    }
    Ok(())
}

/// Splits `text` into pieces of at most `MAX_EVENT_UTF16` UTF-16 units
/// without cutting a surrogate pair.
fn utf16_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut units = 0;

    for ch in text.chars() {
        if units + ch.len_utf16() > MAX_EVENT_UTF16 {
            chunks.push(std::mem::take(&mut current));
            units = 0;
        }
        current.push(ch);
        units += ch.len_utf16();
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

impl TextSink for CgSink {
    fn delete_preceding(&mut self, count: usize) -> Result<(), InjectError> {
        let source = event_source()?;
        for _ in 0..count {
            // Clear flags so a still-held hotkey modifier does not turn this
            // into option+backspace (delete word).
            tap_key(&source, KEY_BACKSPACE, CGEventFlags::CGEventFlagNull)?;
            thread::sleep(KEY_GAP);
        }
        Ok(())
    }

    fn insert_text(&mut self, text: &str) -> Result<(), InjectError> {
        let source = event_source()?;
        for chunk in utf16_chunks(text) {
            for down in [true, false] {
                let event = key_event(&source, 0, down)?;
                event.set_flags(CGEventFlags::CGEventFlagNull);
                event.set_string(&chunk);
                event.post(CGEventTapLocation::HID);
            }
            thread::sleep(KEY_GAP);
        }
        Ok(())
    }

    /// Ctrl+Space, the default "select previous input source" shortcut.
    fn switch_layout(&mut self) -> Result<(), InjectError> {
        let source = event_source()?;
        tap_key(&source, KEY_SPACE, CGEventFlags::CGEventFlagControl)
    }
}
