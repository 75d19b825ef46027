#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LastAction {
    #[default]
    None,
    Converted,
    RevertedToOriginal,
}

/// What the last hotkey press of a scope did, so a repeat press can undo it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleState {
    last_action: LastAction,
    last_original_text: String,
    last_converted_text: String,
}

impl ToggleState {
    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    pub fn record_conversion(&mut self, original: String, converted: String) {
        self.last_action = LastAction::Converted;
        self.last_original_text = original;
        self.last_converted_text = converted;
    }

    /// Returns the pre-conversion text when `snapshot` is exactly what the
    /// last conversion emitted, and marks the conversion as reverted.
    pub fn toggle_back(&mut self, snapshot: &str) -> Option<String> {
        if self.last_action != LastAction::Converted || snapshot != self.last_converted_text {
            return None;
        }
        self.last_action = LastAction::RevertedToOriginal;
        Some(self.last_original_text.clone())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
