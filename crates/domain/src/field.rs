//! Field: a single form input and its validation state.

/// Validation marker carried by a field.
///
/// `Validating` is transient: it is set while a remote check is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
    Validating,
}

/// Polarity of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Valid,
    Invalid,
}

/// Message attached below a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

/// The kind of control rendering a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Select,
    TextArea,
    Hidden,
}

/// A single form input.
///
/// The marker and the feedback message are single slots, so a field can
/// never carry more than one of each.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    pub name: String,
    pub label: Option<String>,
    pub value: String,
    pub kind: InputKind,
    pub required: bool,
    pub max_length: Option<usize>,
    /// Raw `min` attribute, kept verbatim for messages.
    pub min: Option<String>,
    /// Raw `max` attribute, kept verbatim for messages.
    pub max: Option<String>,
    /// Disabled controls are still validated but never submitted.
    pub disabled: bool,
    state: FieldState,
    feedback: Option<Feedback>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn range(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.min = min.map(str::to_string);
        self.max = max.map(str::to_string);
        self
    }

    /// The value with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Label shown in form-level messages, falling back to the field name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }

    #[must_use]
    pub fn state(&self) -> FieldState {
        self.state
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.state == FieldState::Invalid
    }

    #[must_use]
    pub fn is_validating(&self) -> bool {
        self.state == FieldState::Validating
    }

    /// Drop the marker and any feedback.
    pub fn reset(&mut self) {
        self.state = FieldState::Unvalidated;
        self.feedback = None;
    }

    /// Drop the feedback message, keeping the marker.
    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// Mark invalid and attach `message` as feedback.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.state = FieldState::Invalid;
        self.feedback = Some(Feedback {
            kind: FeedbackKind::Invalid,
            message: message.into(),
        });
    }

    /// Mark invalid without touching feedback.
    pub fn flag_invalid(&mut self) {
        self.state = FieldState::Invalid;
    }

    /// Drop an invalid marker, leaving any other marker in place.
    pub fn unflag_invalid(&mut self) {
        if self.state == FieldState::Invalid {
            self.state = FieldState::Unvalidated;
        }
    }

    /// Mark valid, optionally with a positive feedback message.
    pub fn accept(&mut self, message: Option<String>) {
        self.state = FieldState::Valid;
        self.feedback = message.map(|message| Feedback {
            kind: FeedbackKind::Valid,
            message,
        });
    }

    /// Mark as awaiting a remote answer. Clears any feedback.
    pub fn begin_validating(&mut self) {
        self.state = FieldState::Validating;
        self.feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_unvalidated_without_feedback() {
        let field = Field::new("name");
        assert_eq!(field.state(), FieldState::Unvalidated);
        assert!(field.feedback().is_none());
    }

    #[test]
    fn should_fall_back_to_name_when_label_missing_or_blank() {
        assert_eq!(Field::new("port").display_label(), "port");
        assert_eq!(Field::new("port").label("  ").display_label(), "port");
        assert_eq!(Field::new("port").label("Port").display_label(), "Port");
    }

    #[test]
    fn should_replace_feedback_when_rejected_twice() {
        let mut field = Field::new("ip_address");
        field.reject("first");
        field.reject("second");
        assert_eq!(field.feedback().unwrap().message, "second");
        assert!(field.is_invalid());
    }

    #[test]
    fn should_switch_marker_from_invalid_to_valid() {
        let mut field = Field::new("name");
        field.reject("taken");
        field.accept(Some("Device name is available".to_string()));
        assert_eq!(field.state(), FieldState::Valid);
        assert_eq!(field.feedback().unwrap().kind, FeedbackKind::Valid);
    }

    #[test]
    fn should_keep_feedback_when_only_flagged() {
        let mut field = Field::new("name");
        field.reject("taken");
        field.flag_invalid();
        assert_eq!(field.feedback().unwrap().message, "taken");
    }

    #[test]
    fn should_leave_valid_marker_when_unflagging() {
        let mut field = Field::new("port");
        field.accept(None);
        field.unflag_invalid();
        assert_eq!(field.state(), FieldState::Valid);
    }

    #[test]
    fn should_clear_feedback_when_validation_begins() {
        let mut field = Field::new("name");
        field.reject("taken");
        field.begin_validating();
        assert!(field.is_validating());
        assert!(field.feedback().is_none());
    }
}
