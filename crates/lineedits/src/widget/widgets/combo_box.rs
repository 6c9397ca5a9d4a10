//! Option selector.
//!
//! The panel's selectors are combo boxes: a list of labels and a current
//! index, with a signal fired whenever the index moves.
//!
//! ```
//! use lineedits::widget::widgets::ComboBox;
//!
//! let mut echo = ComboBox::new().with_items(["Normal", "No Echo", "Password"]);
//! assert_eq!(echo.current_index(), 0);
//!
//! echo.current_index_changed.connect(|&index| println!("echo option {index}"));
//! echo.set_current_index(2);
//! assert_eq!(echo.current_text(), "Password");
//! ```

use lineedits_core::{Object, ObjectId, Signal};

use crate::widget::{Widget, WidgetBase};

/// A selector over a list of text items.
///
/// The current index is `-1` when nothing is selected. Adding the first item
/// to an empty combo box selects it.
///
pub struct ComboBox {
    base: WidgetBase,
    items: Vec<String>,
    current_index: i32,

    /// New index, `-1` when the selection is cleared.
    pub current_index_changed: Signal<i32>,

    /// Label of the new selection, empty when cleared.
    pub current_text_changed: Signal<String>,
}

impl ComboBox {
    /// A selector with no items and no selection.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            items: Vec::new(),
            current_index: -1,
            current_index_changed: Signal::new(),
            current_text_changed: Signal::new(),
        }
    }

    /// Builder form of [`add_items`](Self::add_items).
    pub fn with_items(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.add_items(items);
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Label at `index`.
    pub fn item_text(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    /// Position of the first item labelled `text`.
    pub fn find_text(&self, text: &str) -> Option<usize> {
        self.items.iter().position(|item| item == text)
    }

    /// Append an item.
    pub fn add_item(&mut self, text: impl Into<String>) {
        self.items.push(text.into());
        if self.current_index < 0 {
            self.set_current_index(0);
        }
    }

    /// Append several items.
    pub fn add_items(&mut self, texts: impl IntoIterator<Item = impl Into<String>>) {
        for text in texts {
            self.add_item(text);
        }
    }

    /// Remove every item, clearing the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.set_current_index(-1);
    }

    // =========================================================================
    // Current Selection
    // =========================================================================

    /// Selected position, or `-1`.
    pub fn current_index(&self) -> i32 {
        self.current_index
    }

    /// Select `index`. Anything outside the item list clears the selection.
    pub fn set_current_index(&mut self, index: i32) {
        let new_index = match usize::try_from(index) {
            Ok(i) if i < self.items.len() => index,
            _ => -1,
        };

        if self.current_index != new_index {
            self.current_index = new_index;
            self.current_index_changed.emit(new_index);
            self.current_text_changed.emit(self.current_text().to_string());
        }
    }

    /// Label of the selection, or `""`.
    pub fn current_text(&self) -> &str {
        usize::try_from(self.current_index)
            .ok()
            .and_then(|index| self.item_text(index))
            .unwrap_or("")
    }
}

impl Default for ComboBox {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComboBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboBox")
            .field("object_id", &self.object_id())
            .field("items", &self.items)
            .field("current_index", &self.current_index)
            .finish()
    }
}

impl Object for ComboBox {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for ComboBox {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
