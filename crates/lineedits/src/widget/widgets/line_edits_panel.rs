//! The line edits demonstration panel.
//!
//! [`LineEditsPanel`] owns five [`LineEdit`] controls, each showing off one
//! property: echo mode, validator, alignment, input mask and access. Five
//! slots take the index chosen in a companion selector and update one
//! property of one control.
//!
//! # Option Indices
//!
//! | Slot | Index → value |
//! |------|---------------|
//! | [`set_echo`](LineEditsPanel::set_echo) | 0 Normal, 1 NoEcho, 2 Password, 3 PasswordEchoOnEdit |
//! | [`set_validator`](LineEditsPanel::set_validator) | 0 None, 1 Integer, 2 Double, 3 HexColor, 4 Pattern |
//! | [`set_alignment`](LineEditsPanel::set_alignment) | 0 Left, 1 Center, 2 Right |
//! | [`set_input_mask`](LineEditsPanel::set_input_mask) | 0 IP address, 1 Phone, 2 ISO date, 3 License key, 4 No mask |
//! | [`set_access`](LineEditsPanel::set_access) | 0 Enabled, 1 ReadOnly, 2 Disabled |
//!
//! An index outside these ranges, including a selector's `-1`, changes
//! nothing and logs a warning.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use lineedits::widget::widgets::{EchoMode, LineEditsPanel, PanelControl, PanelSelectors};
//!
//! let panel = Arc::new(Mutex::new(LineEditsPanel::new()));
//! let mut selectors = PanelSelectors::new();
//! selectors.connect_all(&panel);
//!
//! selectors.selector_mut(PanelControl::Echo).set_current_index(2);
//! assert_eq!(panel.lock().echo().echo_mode(), EchoMode::Password);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use lineedits_core::{
    ConnectionId, Object, ObjectId, ObjectResult, ObjectTreeDebug, TreeFormatOptions, TreeStyle,
};

use crate::config::PanelConfig;
use crate::widget::validator::HexColorValidator;
use crate::widget::widgets::{ComboBox, EchoMode, HorizontalAlignment, LineEdit};
use crate::widget::{Widget, WidgetBase};

const LOG_TARGET: &str = "lineedits::panel";

// ============================================================================
// Options
// ============================================================================

/// A fixed, ordered set of values a selector offers.
pub trait PanelOption: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Every value, in selector order.
    const OPTIONS: &'static [Self];

    /// Label shown in the selector.
    fn label(self) -> &'static str;

    /// Value at a selector index.
    fn from_index(index: i32) -> Option<Self> {
        let index = usize::try_from(index).ok()?;
        Self::OPTIONS.get(index).copied()
    }

    /// Selector index of this value.
    fn index(self) -> i32 {
        Self::OPTIONS
            .iter()
            .position(|&option| option == self)
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Labels of every value, in selector order.
    fn labels() -> Vec<&'static str> {
        Self::OPTIONS.iter().map(|option| option.label()).collect()
    }
}

impl PanelOption for EchoMode {
    const OPTIONS: &'static [Self] = &[
        EchoMode::Normal,
        EchoMode::NoEcho,
        EchoMode::Password,
        EchoMode::PasswordEchoOnEdit,
    ];

    fn label(self) -> &'static str {
        match self {
            EchoMode::Normal => "Normal",
            EchoMode::NoEcho => "No Echo",
            EchoMode::Password => "Password",
            EchoMode::PasswordEchoOnEdit => "PasswordEchoOnEdit",
        }
    }
}

impl PanelOption for HorizontalAlignment {
    const OPTIONS: &'static [Self] = &[
        HorizontalAlignment::Left,
        HorizontalAlignment::Center,
        HorizontalAlignment::Right,
    ];

    fn label(self) -> &'static str {
        match self {
            HorizontalAlignment::Left => "Left",
            HorizontalAlignment::Center => "Centered",
            HorizontalAlignment::Right => "Right",
        }
    }
}

/// The validator installed on the `validator` control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidatorKind {
    /// No validator.
    #[default]
    None,
    /// Integers within the configured range.
    Integer,
    /// Decimals within the configured range and precision.
    Double,
    /// A `#RRGGBB` color.
    HexColor,
    /// Text matching the configured regular expression.
    Pattern,
}

impl PanelOption for ValidatorKind {
    const OPTIONS: &'static [Self] = &[
        ValidatorKind::None,
        ValidatorKind::Integer,
        ValidatorKind::Double,
        ValidatorKind::HexColor,
        ValidatorKind::Pattern,
    ];

    fn label(self) -> &'static str {
        match self {
            ValidatorKind::None => "No validator",
            ValidatorKind::Integer => "Integer validator",
            ValidatorKind::Double => "Double validator",
            ValidatorKind::HexColor => "Hex color validator",
            ValidatorKind::Pattern => "Pattern validator",
        }
    }
}

/// Input mask presets for the `inputMask` control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaskPreset {
    /// Four optional three-digit groups, blanks shown as `_`.
    IpAddress,
    /// A `+` and five required two-digit groups.
    PhoneNumber,
    /// `YYYY-MM-DD`, every digit optional.
    IsoDate,
    /// Five groups of five required letters, uppercased.
    LicenseKey,
    /// No mask; the control starts this way.
    #[default]
    NoMask,
}

impl MaskPreset {
    /// The mask pattern; empty for [`MaskPreset::NoMask`].
    pub fn pattern(self) -> &'static str {
        match self {
            MaskPreset::IpAddress => "000.000.000.000;_",
            MaskPreset::PhoneNumber => "+99 99 99 99 99;_",
            MaskPreset::IsoDate => "0000-00-00",
            MaskPreset::LicenseKey => ">AAAAA-AAAAA-AAAAA-AAAAA-AAAAA;#",
            MaskPreset::NoMask => "",
        }
    }

    /// The preset whose pattern is `pattern`.
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        Self::OPTIONS
            .iter()
            .copied()
            .find(|preset| preset.pattern() == pattern)
    }
}

impl PanelOption for MaskPreset {
    const OPTIONS: &'static [Self] = &[
        MaskPreset::IpAddress,
        MaskPreset::PhoneNumber,
        MaskPreset::IsoDate,
        MaskPreset::LicenseKey,
        MaskPreset::NoMask,
    ];

    fn label(self) -> &'static str {
        match self {
            MaskPreset::IpAddress => "IP address",
            MaskPreset::PhoneNumber => "Phone number",
            MaskPreset::IsoDate => "ISO date",
            MaskPreset::LicenseKey => "License key",
            MaskPreset::NoMask => "No mask",
        }
    }
}

/// Whether the `access` control can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessLevel {
    /// Enabled and editable.
    #[default]
    Enabled,
    /// Enabled, but edits are ignored.
    ReadOnly,
    /// Disabled.
    Disabled,
}

impl AccessLevel {
    /// The access level a control's flags describe. Disabled wins over
    /// read-only.
    pub fn of(edit: &LineEdit) -> Self {
        if !edit.is_enabled() {
            AccessLevel::Disabled
        } else if edit.is_read_only() {
            AccessLevel::ReadOnly
        } else {
            AccessLevel::Enabled
        }
    }
}

impl PanelOption for AccessLevel {
    const OPTIONS: &'static [Self] = &[
        AccessLevel::Enabled,
        AccessLevel::ReadOnly,
        AccessLevel::Disabled,
    ];

    fn label(self) -> &'static str {
        match self {
            AccessLevel::Enabled => "Enabled",
            AccessLevel::ReadOnly => "Read-only",
            AccessLevel::Disabled => "Disabled",
        }
    }
}

/// One of the panel's five controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelControl {
    /// Demonstrates [`EchoMode`].
    Echo,
    /// Demonstrates [`ValidatorKind`].
    Validator,
    /// Demonstrates [`HorizontalAlignment`].
    Alignment,
    /// Demonstrates [`MaskPreset`].
    InputMask,
    /// Demonstrates [`AccessLevel`].
    Access,
}

impl PanelControl {
    /// All controls in panel order.
    pub const ALL: [PanelControl; 5] = [
        PanelControl::Echo,
        PanelControl::Validator,
        PanelControl::Alignment,
        PanelControl::InputMask,
        PanelControl::Access,
    ];

    /// Object name of the control's line edit.
    pub fn object_name(self) -> &'static str {
        match self {
            PanelControl::Echo => "echo",
            PanelControl::Validator => "validator",
            PanelControl::Alignment => "alignment",
            PanelControl::InputMask => "inputMask",
            PanelControl::Access => "access",
        }
    }

    /// Caption of the control's group.
    pub fn title(self) -> &'static str {
        match self {
            PanelControl::Echo => "Echo",
            PanelControl::Validator => "Validator",
            PanelControl::Alignment => "Alignment",
            PanelControl::InputMask => "Input mask",
            PanelControl::Access => "Access",
        }
    }

    /// Labels of the options a selector for this control offers.
    pub fn option_labels(self) -> Vec<&'static str> {
        match self {
            PanelControl::Echo => EchoMode::labels(),
            PanelControl::Validator => ValidatorKind::labels(),
            PanelControl::Alignment => HorizontalAlignment::labels(),
            PanelControl::InputMask => MaskPreset::labels(),
            PanelControl::Access => AccessLevel::labels(),
        }
    }

    /// Selector index of the option a freshly built panel shows.
    pub fn default_index(self) -> i32 {
        match self {
            PanelControl::Echo => EchoMode::default().index(),
            PanelControl::Validator => ValidatorKind::default().index(),
            PanelControl::Alignment => HorizontalAlignment::default().index(),
            PanelControl::InputMask => MaskPreset::default().index(),
            PanelControl::Access => AccessLevel::default().index(),
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

/// Snapshot of the property each control demonstrates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub echo_mode: EchoMode,
    pub validator: ValidatorKind,
    pub alignment: HorizontalAlignment,
    pub input_mask: String,
    pub access: AccessLevel,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            echo_mode: EchoMode::Normal,
            validator: ValidatorKind::None,
            alignment: HorizontalAlignment::Left,
            input_mask: MaskPreset::default().pattern().to_string(),
            access: AccessLevel::Enabled,
        }
    }
}

// ============================================================================
// LineEditsPanel
// ============================================================================

/// A panel of five line edits, each demonstrating one property.
///
/// The controls are children of the panel in the object tree and live
/// exactly as long as it does.
pub struct LineEditsPanel {
    base: WidgetBase,
    config: PanelConfig,
    echo: LineEdit,
    validator: LineEdit,
    alignment: LineEdit,
    input_mask: LineEdit,
    access: LineEdit,

    /// Kind of the validator last installed by this panel.
    validator_kind: ValidatorKind,
}

impl LineEditsPanel {
    /// Create a panel with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PanelConfig::default())
    }

    /// Create a panel with `config`.
    ///
    /// The configuration isn't checked here; a pattern that fails to compile
    /// is reported when the pattern validator is selected.
    pub fn with_config(config: PanelConfig) -> Self {
        let base = WidgetBase::new::<Self>();
        base.set_name("lineEditsPanel");

        let panel = Self {
            echo: Self::create_control(&base, PanelControl::Echo, &config),
            validator: Self::create_control(&base, PanelControl::Validator, &config),
            alignment: Self::create_control(&base, PanelControl::Alignment, &config),
            input_mask: Self::create_control(&base, PanelControl::InputMask, &config),
            access: Self::create_control(&base, PanelControl::Access, &config),
            base,
            config,
            validator_kind: ValidatorKind::None,
        };

        tracing::debug!(target: LOG_TARGET, id = ?panel.object_id(), "line edits panel created");
        panel
    }

    fn create_control(parent: &WidgetBase, control: PanelControl, config: &PanelConfig) -> LineEdit {
        let edit = LineEdit::new().with_placeholder(config.placeholder.as_str());
        let base = edit.widget_base();
        base.set_name(control.object_name());
        if let Err(err) = base.set_parent(Some(parent.object_id())) {
            tracing::error!(target: LOG_TARGET, %err, control = control.object_name(), "failed to parent control");
        }
        edit
    }

    /// The configuration this panel was built with.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// The control demonstrating echo modes.
    pub fn echo(&self) -> &LineEdit {
        &self.echo
    }

    /// The control demonstrating validators.
    pub fn validator(&self) -> &LineEdit {
        &self.validator
    }

    /// The control demonstrating alignment.
    pub fn alignment(&self) -> &LineEdit {
        &self.alignment
    }

    /// The control demonstrating input masks.
    pub fn input_mask(&self) -> &LineEdit {
        &self.input_mask
    }

    /// The control demonstrating access levels.
    pub fn access(&self) -> &LineEdit {
        &self.access
    }

    /// A control by role.
    pub fn control(&self, control: PanelControl) -> &LineEdit {
        match control {
            PanelControl::Echo => &self.echo,
            PanelControl::Validator => &self.validator,
            PanelControl::Alignment => &self.alignment,
            PanelControl::InputMask => &self.input_mask,
            PanelControl::Access => &self.access,
        }
    }

    /// Mutable access to a control, for typing into it.
    pub fn control_mut(&mut self, control: PanelControl) -> &mut LineEdit {
        match control {
            PanelControl::Echo => &mut self.echo,
            PanelControl::Validator => &mut self.validator,
            PanelControl::Alignment => &mut self.alignment,
            PanelControl::InputMask => &mut self.input_mask,
            PanelControl::Access => &mut self.access,
        }
    }

    /// The demonstrated property of every control.
    pub fn state(&self) -> PanelState {
        PanelState {
            echo_mode: self.echo.echo_mode(),
            validator: self.validator_kind,
            alignment: self.alignment.alignment(),
            input_mask: self.input_mask.input_mask().to_string(),
            access: AccessLevel::of(&self.access),
        }
    }

    /// Render the panel's object tree, for debugging.
    pub fn dump_tree(&self) -> ObjectResult<String> {
        ObjectTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            show_types: true,
            ..TreeFormatOptions::minimal()
        })
        .format_subtree(self.object_id())
    }

    // =========================================================================
    // Slots
    // =========================================================================

    /// Set the echo mode of the `echo` control from a selector index.
    pub fn set_echo(&mut self, index: i32) {
        if let Some(mode) = option_at(PanelControl::Echo, index) {
            self.apply_echo_mode(mode);
        }
    }

    /// Install the validator kind at `index` on the `validator` control.
    pub fn set_validator(&mut self, index: i32) {
        if let Some(kind) = option_at(PanelControl::Validator, index) {
            self.apply_validator_kind(kind);
        }
    }

    /// Set the alignment of the `alignment` control from a selector index.
    pub fn set_alignment(&mut self, index: i32) {
        if let Some(alignment) = option_at(PanelControl::Alignment, index) {
            self.apply_alignment(alignment);
        }
    }

    /// Set the mask preset at `index` on the `inputMask` control.
    pub fn set_input_mask(&mut self, index: i32) {
        if let Some(preset) = option_at(PanelControl::InputMask, index) {
            self.apply_input_mask(preset);
        }
    }

    /// Set the access level of the `access` control from a selector index.
    pub fn set_access(&mut self, index: i32) {
        if let Some(level) = option_at(PanelControl::Access, index) {
            self.apply_access(level);
        }
    }

    /// Route a selector index to the slot for `control`.
    pub fn dispatch(&mut self, control: PanelControl, index: i32) {
        match control {
            PanelControl::Echo => self.set_echo(index),
            PanelControl::Validator => self.set_validator(index),
            PanelControl::Alignment => self.set_alignment(index),
            PanelControl::InputMask => self.set_input_mask(index),
            PanelControl::Access => self.set_access(index),
        }
    }

    // =========================================================================
    // Typed Setters
    // =========================================================================

    /// Set the `echo` control's echo mode.
    pub fn apply_echo_mode(&mut self, mode: EchoMode) {
        tracing::debug!(target: LOG_TARGET, ?mode, "set echo mode");
        self.echo.set_echo_mode(mode);
    }

    /// Install a validator of `kind`, built from the panel's configuration.
    ///
    /// If the configured pattern doesn't compile, the control is left
    /// without a validator.
    pub fn apply_validator_kind(&mut self, kind: ValidatorKind) {
        tracing::debug!(target: LOG_TARGET, ?kind, "set validator");
        let edit = &mut self.validator;
        self.validator_kind = match kind {
            ValidatorKind::None => {
                edit.clear_validator();
                kind
            }
            ValidatorKind::Integer => {
                edit.set_validator(self.config.int_validator());
                kind
            }
            ValidatorKind::Double => {
                edit.set_validator(self.config.double_validator());
                kind
            }
            ValidatorKind::HexColor => {
                edit.set_validator(HexColorValidator::new());
                kind
            }
            ValidatorKind::Pattern => match self.config.pattern_validator() {
                Ok(validator) => {
                    tracing::trace!(target: LOG_TARGET, pattern = validator.pattern(), "pattern validator built");
                    edit.set_validator(validator);
                    kind
                }
                Err(err) => {
                    tracing::error!(target: LOG_TARGET, %err, "pattern validator unavailable");
                    edit.clear_validator();
                    ValidatorKind::None
                }
            },
        };
    }

    /// Set the `alignment` control's text alignment.
    pub fn apply_alignment(&mut self, alignment: HorizontalAlignment) {
        tracing::debug!(target: LOG_TARGET, ?alignment, "set alignment");
        self.alignment.set_alignment(alignment);
    }

    /// Set the `inputMask` control's mask. The current text is re-fitted.
    pub fn apply_input_mask(&mut self, preset: MaskPreset) {
        tracing::debug!(target: LOG_TARGET, ?preset, "set input mask");
        self.input_mask.set_input_mask(preset.pattern());
    }

    /// Set the `access` control's enabled and read-only flags.
    pub fn apply_access(&mut self, level: AccessLevel) {
        tracing::debug!(target: LOG_TARGET, ?level, "set access");
        let (enabled, read_only) = match level {
            AccessLevel::Enabled => (true, false),
            AccessLevel::ReadOnly => (true, true),
            AccessLevel::Disabled => (false, false),
        };
        self.access.set_enabled(enabled);
        self.access.set_read_only(read_only);
    }

    // =========================================================================
    // Selector Wiring
    // =========================================================================

    /// Drive `control`'s slot from `selector`'s index changes.
    ///
    /// The connection holds a weak reference, so it doesn't keep the panel
    /// alive; once the panel is dropped, changes are ignored. The selector
    /// must not change while the panel's lock is held on the same thread.
    pub fn connect_selector(
        panel: &Arc<Mutex<Self>>,
        control: PanelControl,
        selector: &ComboBox,
    ) -> ConnectionId {
        let weak = Arc::downgrade(panel);
        selector.current_index_changed.connect(move |&index| {
            if let Some(panel) = weak.upgrade() {
                panel.lock().dispatch(control, index);
            }
        })
    }
}

/// The option at `index`, or a warning if there is none.
fn option_at<T: PanelOption>(control: PanelControl, index: i32) -> Option<T> {
    let option = T::from_index(index);
    if option.is_none() {
        tracing::warn!(
            target: LOG_TARGET,
            control = control.object_name(),
            index,
            options = T::OPTIONS.len(),
            "option index out of range, ignored"
        );
    }
    option
}

impl Default for LineEditsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineEditsPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditsPanel")
            .field("object_id", &self.object_id())
            .field("state", &self.state())
            .finish()
    }
}

impl Object for LineEditsPanel {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for LineEditsPanel {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

// ============================================================================
// PanelSelectors
// ============================================================================

/// The five selectors a host window pairs with a [`LineEditsPanel`], each
/// pre-filled with its control's option labels.
pub struct PanelSelectors {
    selectors: [ComboBox; 5],
}

impl PanelSelectors {
    /// Create the selectors, each showing the option a new panel starts
    /// with, so that picking any other option emits a change.
    pub fn new() -> Self {
        let selectors = PanelControl::ALL.map(|control| {
            let mut combo = ComboBox::new().with_items(control.option_labels());
            combo.set_current_index(control.default_index());
            combo
                .widget_base()
                .set_name(format!("{}Selector", control.object_name()));
            combo
        });
        Self { selectors }
    }

    /// The selector for `control`.
    pub fn selector(&self, control: PanelControl) -> &ComboBox {
        &self.selectors[control.position()]
    }

    /// Mutable access to the selector for `control`.
    pub fn selector_mut(&mut self, control: PanelControl) -> &mut ComboBox {
        &mut self.selectors[control.position()]
    }

    /// Connect every selector to its slot on `panel`.
    pub fn connect_all(&self, panel: &Arc<Mutex<LineEditsPanel>>) -> [ConnectionId; 5] {
        PanelControl::ALL.map(|control| {
            LineEditsPanel::connect_selector(panel, control, self.selector(control))
        })
    }
}

impl Default for PanelSelectors {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PanelSelectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.selectors.iter()).finish()
    }
}
