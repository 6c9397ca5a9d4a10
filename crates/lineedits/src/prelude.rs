//! Commonly used types, for glob import.
//!
//! ```
//! use lineedits::prelude::*;
//!
//! let mut panel = LineEditsPanel::new();
//! panel.set_echo(2);
//! assert_eq!(panel.state().echo_mode, EchoMode::Password);
//! ```

pub use crate::config::{ConfigError, ConfigResult, PanelConfig};
pub use crate::widget::widgets::{
    AccessLevel, ComboBox, EchoMode, HorizontalAlignment, LineEdit, LineEditsPanel, MaskPreset,
    PanelControl, PanelOption, PanelSelectors, PanelState, ValidatorKind,
};
pub use crate::widget::{ValidationState, Validator, Widget};
pub use lineedits_core::{ConnectionId, Object, ObjectId, Signal};
