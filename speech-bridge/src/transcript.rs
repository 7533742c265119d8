use crate::providers::RecognizerEvent;

/// Accumulated transcript state for one note
///
/// Displayed text is an explicit merge of three inputs: the finalized
/// accumulator, the transient partial hypothesis, and an optional manual
/// override. Precedence: a manual edit wins once the user has typed,
/// until the next recognized final segment folds it back in.
#[derive(Debug, Clone, Default)]
pub struct TranscriptState {
    finalized: String,
    partial: String,
    manual_override: Option<String>,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a recognizer event.
    ///
    /// Interim events replace the partial buffer with the latest
    /// hypothesis. Final events append the segment to the finalized
    /// accumulator (event order preserved) and clear the partial buffer;
    /// a pending manual override becomes the new finalized base first, so
    /// user edits are not lost when recognition continues.
    pub fn apply_recognizer_event(&mut self, event: &RecognizerEvent) {
        if event.is_final {
            if let Some(manual) = self.manual_override.take() {
                self.finalized = manual;
            }
            let segment = event.text.trim();
            if !segment.is_empty() {
                if !self.finalized.is_empty() {
                    self.finalized.push(' ');
                }
                self.finalized.push_str(segment);
            }
            self.partial.clear();
        } else {
            self.partial = event.text.clone();
        }
    }

    /// Record a manual edit of the displayed text.
    pub fn edit(&mut self, text: &str) {
        self.manual_override = Some(text.to_string());
    }

    /// The text shown to the user: the manual override if one is pending,
    /// otherwise finalized plus partial.
    pub fn display(&self) -> String {
        if let Some(manual) = &self.manual_override {
            return manual.clone();
        }
        if self.partial.is_empty() {
            self.finalized.clone()
        } else if self.finalized.is_empty() {
            self.partial.clone()
        } else {
            format!("{} {}", self.finalized, self.partial)
        }
    }

    pub fn finalized(&self) -> &str {
        &self.finalized
    }

    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Drop the in-progress hypothesis, used when recording stops.
    pub fn discard_partial(&mut self) {
        self.partial.clear();
    }

    /// Reset to empty, used after a successful save.
    pub fn reset(&mut self) {
        self.finalized.clear();
        self.partial.clear();
        self.manual_override = None;
    }

    /// True when the displayed text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.display().trim().is_empty()
    }
}
