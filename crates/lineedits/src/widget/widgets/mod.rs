//! Concrete widgets.

mod combo_box;
mod line_edit;
mod line_edits_panel;

pub use combo_box::ComboBox;
pub use line_edit::{EchoMode, HorizontalAlignment, LineEdit};
pub use line_edits_panel::{
    AccessLevel, LineEditsPanel, MaskPreset, PanelControl, PanelOption, PanelSelectors, PanelState,
    ValidatorKind,
};
