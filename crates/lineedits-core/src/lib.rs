//! Core systems for the line-edits panel.
//!
//! This crate provides the small widget runtime the panel is built on:
//!
//! - **Object Model**: Arena-backed object IDs with parent-owns-children
//!   lifetime and cascade destruction
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Logging**: `tracing` targets and object-tree debug dumps
//!
//! # Signal/Slot Example
//!
//! ```
//! use lineedits_core::Signal;
//!
//! let index_changed = Signal::<i32>::new();
//!
//! let conn_id = index_changed.connect(|index| {
//!     println!("Selected option {}", index);
//! });
//!
//! index_changed.emit(2);
//! index_changed.disconnect(conn_id);
//! ```
//!
//! # Object Tree Example
//!
//! ```
//! use lineedits_core::{Object, ObjectBase, ObjectId, global_registry};
//!
//! struct Node {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Node {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let parent = Node { base: ObjectBase::new::<Node>() };
//! let child = Node { base: ObjectBase::new::<Node>() };
//! child.base.set_parent(Some(parent.object_id())).unwrap();
//!
//! let child_id = child.object_id();
//! drop(parent);
//! assert!(!global_registry().contains(child_id));
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use logging::{ObjectTreeDebug, TreeFormatOptions, TreeStyle};
pub use object::{
    global_registry, Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult,
    SharedObjectRegistry,
};
pub use signal::{ConnectionId, Signal};

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(SharedObjectRegistry: Send, Sync);
