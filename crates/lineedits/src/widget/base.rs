//! Shared widget state.
//!
//! `WidgetBase` is the state every widget in this crate shares: its place in
//! the object tree, the enabled flag and focus. Widgets hold one as a field
//! and delegate to it.

use lineedits_core::{Object, ObjectBase, ObjectId, ObjectResult, Signal};

/// Shared widget state.
///
/// Dropping a `WidgetBase` destroys its object and, through the registry,
/// every object parented to it.
///
/// # Example
///
/// ```
/// use lineedits::widget::{Widget, WidgetBase};
/// use lineedits_core::{Object, ObjectId};
///
/// struct Badge {
///     base: WidgetBase,
/// }
///
/// impl Object for Badge {
///     fn object_id(&self) -> ObjectId {
///         self.base.object_id()
///     }
/// }
///
/// impl Widget for Badge {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
/// }
///
/// let badge = Badge { base: WidgetBase::new::<Badge>() };
/// assert!(badge.is_enabled());
/// ```
pub struct WidgetBase {
    object_base: ObjectBase,
    enabled: bool,
    focused: bool,

    /// Emitted with the new value when the enabled state flips.
    pub enabled_changed: Signal<bool>,
}

impl WidgetBase {
    /// Register a widget of type `T` and return its base, enabled and unfocused.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            enabled: true,
            focused: false,
            enabled_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Object tree
    // =========================================================================

    /// Registry handle for this widget.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// Object name, empty if never set.
    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Rename the widget.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// Owner of this widget, if parented.
    pub fn parent_id(&self) -> Option<ObjectId> {
        self.object_base.parent()
    }

    /// Reparent under `parent`, or detach with `None`.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object_base.set_parent(parent)
    }

    /// Owned children, in parenting order.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object_base.children()
    }

    /// Direct child named `name`.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_base.find_child_by_name(name)
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Whether the widget accepts input.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enabled flag. Disabling also drops focus.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            if !enabled {
                self.focused = false;
            }
            self.enabled_changed.emit(enabled);
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether the widget holds keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Update the focus flag. Disabled widgets never take focus.
    ///
    /// Returns whether the flag changed.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        let focused = focused && self.enabled;
        if self.focused == focused {
            return false;
        }
        self.focused = focused;
        true
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("object_id", &self.object_id())
            .field("enabled", &self.enabled)
            .field("focused", &self.focused)
            .finish()
    }
}

/// Common interface for widgets built on [`WidgetBase`].
pub trait Widget: Object {
    /// Access the shared widget state.
    fn widget_base(&self) -> &WidgetBase;

    /// Mutable access to the shared widget state.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Check if the widget is enabled.
    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Check if the widget currently has focus.
    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }
}
