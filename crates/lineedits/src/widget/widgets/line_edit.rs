//! Single-line text input widget.
//!
//! The LineEdit widget is a headless single-line editor with support for:
//! - Text editing with a grapheme-aware cursor
//! - Placeholder text
//! - Echo modes, including password masking
//! - Validators and input masks
//! - Read-only and disabled states
//! - Maximum length constraint
//!
//! # Example
//!
//! ```
//! use lineedits::widget::widgets::{EchoMode, LineEdit};
//!
//! let mut edit = LineEdit::new().with_placeholder("Enter your name...");
//! edit.text_changed.connect(|text| {
//!     println!("Text changed: {}", text);
//! });
//!
//! edit.insert("secret");
//! edit.set_echo_mode(EchoMode::Password);
//! assert_eq!(edit.displayed_text(), "••••••");
//! ```

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use lineedits_core::{Object, ObjectId, Signal};

use crate::widget::input_mask::InputMask;
use crate::widget::validator::{ValidationState, Validator};
use crate::widget::{Widget, WidgetBase};

const LOG_TARGET: &str = "lineedits::line_edit";

/// Echo mode determines how text is displayed in the LineEdit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EchoMode {
    /// Display characters as entered (default).
    #[default]
    Normal,
    /// Don't display anything as the user types.
    NoEcho,
    /// Display a mask character instead of actual text.
    Password,
    /// Display characters while editing, mask them otherwise.
    PasswordEchoOnEdit,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Align to the center.
    Center,
    /// Align to the right edge.
    Right,
}

/// A single-line text input widget.
///
/// # Text and Input
///
/// Without an input mask, the typed input and [`text`](Self::text) are the
/// same string. With a mask, the widget keeps only the characters typed into
/// editable positions; `text` re-inserts the literals, and
/// [`displayed_text`](Self::displayed_text) also fills blanks.
///
/// # Editing Rules
///
/// User edits ([`insert`](Self::insert), [`backspace`](Self::backspace),
/// [`delete`](Self::delete)) are ignored unless the widget is editable, and
/// are rejected when the validator would call the result
/// [`ValidationState::Invalid`]. [`set_text`](Self::set_text) is never
/// rejected by the validator.
///
/// # Signals
///
/// - `text_changed`: Emitted when the text content changes
/// - `editing_finished`: Emitted when focus is lost or Return is pressed,
///   if the input is acceptable
/// - `return_pressed`: Emitted by [`press_return`](Self::press_return) when
///   the input is acceptable
/// - `validation_changed`: Emitted when the validation state changes
pub struct LineEdit {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The typed input. With a mask, only characters in editable positions.
    input: String,

    /// The value reported by `text()`.
    text: String,

    /// Placeholder text displayed when empty.
    placeholder: String,

    /// Current cursor position (byte offset in `input`).
    cursor_pos: usize,

    echo_mode: EchoMode,
    password_char: char,
    alignment: HorizontalAlignment,
    read_only: bool,

    /// Maximum text length in characters (None = unlimited). Ignored while a
    /// mask is set.
    max_length: Option<usize>,

    validator: Option<Arc<dyn Validator>>,
    mask: Option<InputMask>,

    /// Last validation state reported through `validation_changed`.
    validation_state: ValidationState,

    /// Signal emitted when text changes.
    pub text_changed: Signal<String>,

    /// Signal emitted when editing is finished with acceptable input.
    pub editing_finished: Signal<()>,

    /// Signal emitted when Return is pressed with acceptable input.
    pub return_pressed: Signal<()>,

    /// Signal emitted when the validation state changes.
    pub validation_changed: Signal<ValidationState>,
}

impl LineEdit {
    /// Create a new empty LineEdit.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            input: String::new(),
            text: String::new(),
            placeholder: String::new(),
            cursor_pos: 0,
            echo_mode: EchoMode::Normal,
            password_char: '•',
            alignment: HorizontalAlignment::Left,
            read_only: false,
            max_length: None,
            validator: None,
            mask: None,
            validation_state: ValidationState::Acceptable,
            text_changed: Signal::new(),
            editing_finished: Signal::new(),
            return_pressed: Signal::new(),
            validation_changed: Signal::new(),
        }
    }

    /// Create a new LineEdit with initial text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut edit = Self::new();
        edit.set_text(text);
        edit
    }

    // =========================================================================
    // Text Access
    // =========================================================================

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text content and move the cursor to the end.
    ///
    /// With a mask, characters that don't fit are dropped. Otherwise the text
    /// is truncated to `max_length`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let input = match &self.mask {
            Some(mask) => mask.filter(&text),
            None => self.truncate_to_max_length(text),
        };
        let cursor = input.len();
        self.commit(input, cursor);
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Get the text length in characters.
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }

    // =========================================================================
    // Placeholder
    // =========================================================================

    /// Get the placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.placeholder = text.into();
    }

    /// Set placeholder using builder pattern.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Whether the placeholder is shown instead of text.
    ///
    /// A masked widget always shows its mask, so never the placeholder.
    pub fn is_placeholder_visible(&self) -> bool {
        self.input.is_empty() && self.mask.is_none()
    }

    // =========================================================================
    // Echo Mode
    // =========================================================================

    /// Get the echo mode.
    pub fn echo_mode(&self) -> EchoMode {
        self.echo_mode
    }

    /// Set the echo mode.
    pub fn set_echo_mode(&mut self, mode: EchoMode) {
        if self.echo_mode != mode {
            tracing::debug!(target: LOG_TARGET, ?mode, "echo mode changed");
            self.echo_mode = mode;
        }
    }

    /// Set echo mode using builder pattern.
    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    /// Get the password mask character.
    pub fn password_char(&self) -> char {
        self.password_char
    }

    /// Set the password mask character.
    pub fn set_password_char(&mut self, ch: char) {
        self.password_char = ch;
    }

    /// The text as it would be drawn, after masking and echo mode.
    pub fn displayed_text(&self) -> String {
        let shown = match &self.mask {
            Some(mask) => mask.display_text(&self.input),
            None => self.input.clone(),
        };

        match self.echo_mode {
            EchoMode::Normal => shown,
            EchoMode::NoEcho => String::new(),
            EchoMode::Password => self.obscure(&shown),
            EchoMode::PasswordEchoOnEdit if self.base.has_focus() => shown,
            EchoMode::PasswordEchoOnEdit => self.obscure(&shown),
        }
    }

    fn obscure(&self, shown: &str) -> String {
        std::iter::repeat_n(self.password_char, shown.graphemes(true).count()).collect()
    }

    // =========================================================================
    // Alignment
    // =========================================================================

    /// Get the horizontal text alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Set the horizontal text alignment.
    pub fn set_alignment(&mut self, alignment: HorizontalAlignment) {
        if self.alignment != alignment {
            tracing::debug!(target: LOG_TARGET, ?alignment, "alignment changed");
            self.alignment = alignment;
        }
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Check if the widget is read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Set read-only mode.
    pub fn set_read_only(&mut self, read_only: bool) {
        if self.read_only != read_only {
            tracing::debug!(target: LOG_TARGET, read_only, "read-only changed");
            self.read_only = read_only;
        }
    }

    /// Set read-only using builder pattern.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Check if the widget is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Enable or disable the widget. A disabled widget loses focus.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.base.is_enabled() != enabled {
            tracing::debug!(target: LOG_TARGET, enabled, "enabled changed");
            self.base.set_enabled(enabled);
        }
    }

    /// Whether user edits are accepted: enabled and not read-only.
    pub fn is_editable(&self) -> bool {
        self.base.is_enabled() && !self.read_only
    }

    // =========================================================================
    // Max Length
    // =========================================================================

    /// Get the maximum text length.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Set the maximum text length (in characters), truncating the current
    /// text if needed.
    pub fn set_max_length(&mut self, max: Option<usize>) {
        self.max_length = max;
        if self.mask.is_none() && max.is_some_and(|max| self.input.chars().count() > max) {
            let truncated = self.truncate_to_max_length(self.input.clone());
            let cursor = self.cursor_pos.min(truncated.len());
            self.commit(truncated, cursor);
        }
    }

    /// Set max length using builder pattern.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.set_max_length(Some(max));
        self
    }

    fn truncate_to_max_length(&self, text: String) -> String {
        match self.max_length {
            Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
            _ => text,
        }
    }

    // =========================================================================
    // Validator
    // =========================================================================

    /// Install a validator. The current text is kept as is.
    pub fn set_validator<V: Validator + 'static>(&mut self, validator: V) {
        self.set_shared_validator(Arc::new(validator));
    }

    /// Install a validator that may be shared with other widgets.
    pub fn set_shared_validator(&mut self, validator: Arc<dyn Validator>) {
        self.validator = Some(validator);
        self.refresh_validation();
    }

    /// Remove the validator.
    pub fn clear_validator(&mut self) {
        if self.validator.take().is_some() {
            self.refresh_validation();
        }
    }

    /// Whether a validator is installed.
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Validation state of the current text.
    ///
    /// An incomplete mask caps the state at
    /// [`Intermediate`](ValidationState::Intermediate).
    pub fn validation_state(&self) -> ValidationState {
        self.validation_state
    }

    /// Whether the validator accepts the text and the mask is complete.
    pub fn has_acceptable_input(&self) -> bool {
        self.validation_state == ValidationState::Acceptable
    }

    fn compute_validation_state(&self) -> ValidationState {
        let state = self
            .validator
            .as_ref()
            .map_or(ValidationState::Acceptable, |v| v.validate(&self.text));
        let mask_incomplete = self
            .mask
            .as_ref()
            .is_some_and(|mask| !mask.is_complete(&self.input));

        if state == ValidationState::Acceptable && mask_incomplete {
            ValidationState::Intermediate
        } else {
            state
        }
    }

    fn refresh_validation(&mut self) {
        let state = self.compute_validation_state();
        if state != self.validation_state {
            self.validation_state = state;
            self.validation_changed.emit(state);
        }
    }

    /// Let the validator repair the text if it isn't acceptable.
    fn apply_fixup(&mut self) {
        if self.validation_state == ValidationState::Acceptable {
            return;
        }
        let fixed = self
            .validator
            .as_ref()
            .and_then(|validator| validator.fixup(&self.text));
        if let Some(fixed) = fixed {
            tracing::trace!(target: LOG_TARGET, from = %self.text, to = %fixed, "fixup applied");
            self.set_text(fixed);
        }
    }

    // =========================================================================
    // Input Mask
    // =========================================================================

    /// The input mask pattern, or `""` when there is none.
    pub fn input_mask(&self) -> &str {
        self.mask.as_ref().map_or("", InputMask::pattern)
    }

    /// Set the input mask. An empty pattern, or one with no positions,
    /// removes the mask.
    ///
    /// The current text is re-fitted to the new mask. Removing a mask keeps
    /// the text, literals included.
    pub fn set_input_mask(&mut self, pattern: &str) {
        if self.input_mask() == pattern {
            return;
        }

        self.mask = InputMask::new(pattern);
        tracing::debug!(target: LOG_TARGET, mask = self.input_mask(), "input mask changed");

        let current = self.text.clone();
        let input = match &self.mask {
            Some(mask) => mask.filter(&current),
            None => current,
        };
        let cursor = input.len();
        self.commit(input, cursor);
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Get the cursor position (byte offset into the typed input).
    pub fn cursor_position(&self) -> usize {
        self.cursor_pos
    }

    /// Set the cursor position, snapping to a grapheme boundary.
    pub fn set_cursor_position(&mut self, pos: usize) {
        self.cursor_pos = self.snap_to_grapheme_boundary(pos.min(self.input.len()));
    }

    /// Move cursor left by one grapheme.
    pub fn move_cursor_left(&mut self) {
        let pos = self.prev_grapheme_boundary(self.cursor_pos);
        self.set_cursor_position(pos);
    }

    /// Move cursor right by one grapheme.
    pub fn move_cursor_right(&mut self) {
        let pos = self.next_grapheme_boundary(self.cursor_pos);
        self.set_cursor_position(pos);
    }

    /// Move cursor to the start of the text.
    pub fn move_cursor_home(&mut self) {
        self.set_cursor_position(0);
    }

    /// Move cursor to the end of the text.
    pub fn move_cursor_end(&mut self) {
        self.set_cursor_position(self.input.len());
    }

    fn prev_grapheme_boundary(&self, pos: usize) -> usize {
        self.input
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .take_while(|&offset| offset < pos)
            .last()
            .unwrap_or(0)
    }

    fn next_grapheme_boundary(&self, pos: usize) -> usize {
        self.input
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .find(|&end| end > pos)
            .unwrap_or(self.input.len())
    }

    fn snap_to_grapheme_boundary(&self, pos: usize) -> usize {
        for (offset, grapheme) in self.input.grapheme_indices(true) {
            let end = offset + grapheme.len();
            if pos <= offset {
                return offset;
            }
            if pos < end {
                return if pos - offset <= end - pos { offset } else { end };
            }
        }
        self.input.len()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert text at the cursor as if typed.
    ///
    /// Returns `true` if the text changed.
    pub fn insert(&mut self, text: &str) -> bool {
        if !self.is_editable() || text.is_empty() {
            return false;
        }

        let (candidate, cursor) = match &self.mask {
            Some(mask) => {
                let (before, after) = self.input.split_at(self.cursor_pos);
                let slot = before.chars().count();
                let typed = mask.filter_from(slot, text);
                if typed.is_empty() {
                    return false;
                }
                let conformed = mask.conform(&format!("{before}{typed}{after}"));
                let cursor = byte_offset(&conformed, slot + typed.chars().count());
                (conformed, cursor)
            }
            None => {
                let room = self
                    .max_length
                    .map_or(usize::MAX, |max| max.saturating_sub(self.input.chars().count()));
                if room == 0 {
                    return false;
                }
                let inserted: String = text.chars().take(room).collect();
                let mut candidate = self.input.clone();
                candidate.insert_str(self.cursor_pos, &inserted);
                (candidate, self.cursor_pos + inserted.len())
            }
        };

        self.try_edit(candidate, cursor)
    }

    /// Delete the grapheme before the cursor.
    ///
    /// Returns `true` if the text changed.
    pub fn backspace(&mut self) -> bool {
        if !self.is_editable() || self.cursor_pos == 0 {
            return false;
        }
        let start = self.prev_grapheme_boundary(self.cursor_pos);
        let candidate = self.removed(start, self.cursor_pos);
        self.try_edit(candidate, start)
    }

    /// Delete the grapheme after the cursor.
    ///
    /// Returns `true` if the text changed.
    pub fn delete(&mut self) -> bool {
        if !self.is_editable() || self.cursor_pos >= self.input.len() {
            return false;
        }
        let end = self.next_grapheme_boundary(self.cursor_pos);
        let candidate = self.removed(self.cursor_pos, end);
        self.try_edit(candidate, self.cursor_pos)
    }

    /// Input with `start..end` removed, re-fitted to the mask if any.
    fn removed(&self, start: usize, end: usize) -> String {
        let mut candidate = self.input.clone();
        candidate.replace_range(start..end, "");
        match &self.mask {
            Some(mask) => mask.conform(&candidate),
            None => candidate,
        }
    }

    /// Apply a user edit unless the validator rejects it.
    fn try_edit(&mut self, candidate: String, cursor: usize) -> bool {
        if let Some(validator) = &self.validator {
            let value = self.value_of(&candidate);
            if validator.validate(&value) == ValidationState::Invalid {
                tracing::trace!(target: LOG_TARGET, %value, "edit rejected by validator");
                return false;
            }
        }
        self.commit(candidate, cursor)
    }

    fn value_of(&self, input: &str) -> String {
        match &self.mask {
            Some(mask) => mask.value_text(input),
            None => input.to_string(),
        }
    }

    /// Store new input, then emit `text_changed` and `validation_changed` as
    /// needed. Returns whether the input changed.
    fn commit(&mut self, input: String, cursor: usize) -> bool {
        let input_changed = self.input != input;
        let text = self.value_of(&input);
        let text_changed = self.text != text;

        self.input = input;
        self.cursor_pos = cursor.min(self.input.len());
        self.text = text;

        if text_changed {
            self.text_changed.emit(self.text.clone());
        }
        self.refresh_validation();
        input_changed
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give the widget focus. Disabled widgets don't take focus.
    pub fn focus_in(&mut self) -> bool {
        self.base.set_focused(true)
    }

    /// Take focus away, finishing the edit.
    ///
    /// Applies the validator's fixup to unacceptable input, then emits
    /// `editing_finished` if the input is acceptable.
    pub fn focus_out(&mut self) {
        if self.base.set_focused(false) {
            self.finish_editing();
        }
    }

    /// Handle the Return key.
    pub fn press_return(&mut self) {
        if !self.base.is_enabled() {
            return;
        }
        self.apply_fixup();
        if self.has_acceptable_input() {
            self.return_pressed.emit(());
            self.editing_finished.emit(());
        }
    }

    fn finish_editing(&mut self) {
        self.apply_fixup();
        if self.has_acceptable_input() {
            self.editing_finished.emit(());
        }
    }
}

/// Byte offset of the `chars`-th character of `s`, or its length.
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(offset, _)| offset)
}

impl Default for LineEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEdit")
            .field("object_id", &self.object_id())
            .field("text", &self.text)
            .field("echo_mode", &self.echo_mode)
            .field("alignment", &self.alignment)
            .field("input_mask", &self.input_mask())
            .field("has_validator", &self.has_validator())
            .field("read_only", &self.read_only)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Object for LineEdit {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for LineEdit {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
