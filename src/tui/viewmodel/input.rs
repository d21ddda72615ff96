//! Single-line text input state.

/// Editable line used for the image path and the history search.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Whether keystrokes go to this input
    pub active: bool,
    /// Current contents
    pub value: String,
}

impl TextInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            active: false,
            value: value.into(),
        }
    }

    /// Start editing, keeping the current contents.
    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Stop editing and discard the contents.
    pub fn cancel(&mut self) {
        self.active = false;
        self.value.clear();
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_lifecycle() {
        let mut input = TextInput::with_value("label");
        input.start();
        assert!(input.active);
        input.push_char('s');
        input.pop_char();
        input.push_char('.');
        assert_eq!(input.value, "label.");
        input.stop();
        assert!(!input.active);
        assert_eq!(input.trimmed(), "label.");
        input.cancel();
        assert!(input.value.is_empty());
    }
}
