//! Log targets and object-tree dumps.
//!
//! Library code only emits `tracing` events and never installs a subscriber;
//! the host application or test does that, filtering on the [`targets`]:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lineedits=debug,lineedits_core=trace")
//!     .init();
//! ```
//!
//! [`ObjectTreeDebug`] renders the subtree under an object, one line per
//! object, which is handy when checking what a container owns.

use std::fmt::Write as FmtWrite;

use crate::object::{global_registry, ObjectId, ObjectResult};

/// `tracing` targets emitted by this crate.
pub mod targets {
    /// Connections and emissions.
    pub const SIGNAL: &str = "lineedits_core::signal";
    /// Registration, parenting and destruction.
    pub const OBJECT: &str = "lineedits_core::object";
}

/// Style options for object tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Default::default()
        }
    }
}

/// Renders an object subtree as indented text.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Unicode branches, with IDs and type names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render with `options`.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Render `root` and everything below it.
    pub fn format_subtree(&self, root: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.format_subtree_into(root, 0, &mut Vec::new(), &mut output)?;
        Ok(output)
    }

    /// Format one node and recurse. `last_flags[d]` is whether the ancestor at
    /// depth `d + 1` was the last of its siblings.
    fn format_subtree_into(
        &self,
        id: ObjectId,
        depth: usize,
        last_flags: &mut Vec<bool>,
        output: &mut String,
    ) -> ObjectResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        let registry = global_registry();
        let name = registry.object_name(id)?;
        let type_name = registry.type_name(id)?;
        let children = registry.children(id)?;

        output.push_str(&self.build_prefix(last_flags));
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }

        if self.options.show_types {
            let short_type = type_name.rsplit("::").next().unwrap_or(type_name);
            let _ = write!(output, " ({})", short_type);
        }

        output.push('\n');

        let child_count = children.len();
        for (i, child_id) in children.into_iter().enumerate() {
            last_flags.push(i + 1 == child_count);
            self.format_subtree_into(child_id, depth + 1, last_flags, output)?;
            last_flags.pop();
        }

        Ok(())
    }

    fn build_prefix(&self, last_flags: &[bool]) -> String {
        let Some((&is_last, ancestors)) = last_flags.split_last() else {
            return String::new();
        };

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        };

        let mut prefix = String::new();
        for &ancestor_last in ancestors {
            prefix.push_str(if ancestor_last { "    " } else { branch });
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}
