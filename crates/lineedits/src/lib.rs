//! Line edits demonstration panel.
//!
//! A [`LineEditsPanel`](widget::widgets::LineEditsPanel) holds five line
//! edits, each demonstrating one property of a single-line text field: echo
//! mode, validator, alignment, input mask and access level. Its five slots
//! take a selector index and update that one property.
//!
//! The widgets are headless models built on the object tree and signals of
//! [`lineedits_core`]: they track state and emit change signals, and leave
//! drawing to the host.
//!
//! # Example
//!
//! ```
//! use lineedits::prelude::*;
//!
//! let mut panel = LineEditsPanel::new();
//! panel.set_input_mask(0);
//! assert_eq!(panel.input_mask().input_mask(), "000.000.000.000;_");
//!
//! panel.set_access(1);
//! assert!(panel.access().is_read_only());
//! ```
//!
//! # Configuration
//!
//! Validator ranges, the pattern validator's regex and the placeholder text
//! come from a [`PanelConfig`](config::PanelConfig), loadable from TOML.
//!
//! # Logging
//!
//! Events are emitted with `tracing` under the `lineedits::panel`,
//! `lineedits::line_edit` and `lineedits::config` targets.

pub mod config;
pub mod prelude;
pub mod widget;

static_assertions::assert_impl_all!(widget::widgets::LineEdit: Send, Sync);
static_assertions::assert_impl_all!(widget::widgets::LineEditsPanel: Send, Sync);
static_assertions::assert_impl_all!(widget::widgets::ComboBox: Send, Sync);
