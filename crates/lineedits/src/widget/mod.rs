//! Widget system.
//!
//! This module provides the shared widget state ([`WidgetBase`] and the
//! [`Widget`] trait), the validation and input-mask engines used by text
//! widgets, and the concrete widgets in [`widgets`].

mod base;
pub mod input_mask;
pub mod validator;
pub mod widgets;

pub use base::{Widget, WidgetBase};
pub use input_mask::InputMask;
pub use validator::{
    DoubleValidator, HexColorValidator, IntValidator, RegexValidator, ValidationState, Validator,
};
