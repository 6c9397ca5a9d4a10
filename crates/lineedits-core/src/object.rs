//! The object tree.
//!
//! Every widget registers itself in a process-wide [`SharedObjectRegistry`]
//! and gets back an [`ObjectId`]. Objects can be named and parented to one
//! another; the registry keeps the parent/child links and answers lookups.
//!
//! A widget that owns child widgets parents them to itself. When the owning
//! widget's [`ObjectBase`] is dropped, its whole subtree is removed from the
//! registry, so no child ID outlives its parent.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle to an object in the registry. Stale once the object is destroyed.
    pub struct ObjectId;
}

/// Failures of registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// No live object has this ID.
    InvalidObjectId,
    /// The requested parent is the object itself or one of its descendants.
    CircularParentage,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => f.write_str("no live object with this id"),
            Self::CircularParentage => f.write_str("parenting would create a cycle"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Shorthand for registry results.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Per-object record kept by the registry.
struct ObjectData {
    name: String,
    /// Concrete type, used when dumping the tree.
    type_name: &'static str,
    parent: Option<ObjectId>,
    /// Owned children, in insertion order.
    children: Vec<ObjectId>,
}

impl ObjectData {
    fn new(type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_name,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena of object records keyed by [`ObjectId`].
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// An empty arena.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Add a record for a `T` and hand back its handle.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let data = ObjectData::new(std::any::type_name::<T>());
        let id = self.objects.insert(data);
        tracing::trace!(target: targets::OBJECT, ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Remove an object and all its descendants from the registry.
    #[tracing::instrument(skip(self), target = "lineedits_core::object", level = "trace")]
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: targets::OBJECT, ?id, descendant_count = descendants.len(), "destroying object tree");

        if let Some(parent_id) = self.objects.get(id).and_then(|d| d.parent)
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        for child_id in descendants {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);

        Ok(())
    }

    /// Collect all descendant IDs, children before parents.
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Whether `id` still names a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Move `id` under `new_parent`, appending it to that parent's children.
    /// `None` detaches it.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.objects.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.push(id);
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Owner of `id`.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object, in insertion order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Name of `id`.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Rename `id`.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.objects
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Full type path `id` was registered as.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        let children = self.children(id)?;
        Ok(children.iter().copied().find(|&child_id| {
            self.objects
                .get(child_id)
                .is_some_and(|data| data.name == name)
        }))
    }

    /// Total number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// [`ObjectRegistry`] behind a read/write lock. Accessors return owned data
/// so no guard escapes.
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// See [`ObjectRegistry::register`].
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object and its descendants.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// See [`ObjectRegistry::contains`].
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set an object's parent.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get an object's parent.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get an object's children (cloned).
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get an object's name (cloned).
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(String::from)
    }

    /// Set an object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get an object's type name.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().find_child_by_name(id, name)
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Get the process-wide object registry, creating it on first use.
pub fn global_registry() -> &'static SharedObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new)
}

/// Anything with a place in the object tree.
pub trait Object: Any + Send + Sync {
    /// Registry handle.
    fn object_id(&self) -> ObjectId;
}

/// Owning registry handle, embedded in every [`Object`] implementor.
///
/// Registers the object with the [`global_registry`] on construction and
/// destroys it, together with every descendant, when dropped.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a `T` in the global registry.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            id: global_registry().register::<T>(),
        }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Current name, empty if unset or destroyed.
    pub fn name(&self) -> String {
        global_registry().object_name(self.id).unwrap_or_default()
    }

    /// Rename this object.
    pub fn set_name(&self, name: impl Into<String>) {
        let _ = global_registry().set_object_name(self.id, name.into());
    }

    /// Owner, if any.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry().parent(self.id).ok().flatten()
    }

    /// Reparent, or detach with `None`.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry().set_parent(self.id, parent)
    }

    /// Get child object IDs.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry().children(self.id).unwrap_or_default()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry()
            .find_child_by_name(self.id, name)
            .ok()
            .flatten()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        let registry = global_registry();
        // Already gone if an ancestor was destroyed first.
        if registry.contains(self.id) {
            let _ = registry.destroy(self.id);
        }
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestObject {
        base: ObjectBase,
    }

    impl TestObject {
        fn new() -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
            }
        }
    }

    impl Object for TestObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    struct OtherObject;

    impl Object for OtherObject {
        fn object_id(&self) -> ObjectId {
            ObjectId::default()
        }
    }

    #[test]
    fn test_register_and_destroy() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register::<TestObject>();
        assert!(registry.contains(id));
        assert!(registry.type_name(id).unwrap().ends_with("TestObject"));

        registry.destroy(id).unwrap();
        assert!(!registry.contains(id));
        assert_eq!(registry.destroy(id), Err(ObjectError::InvalidObjectId));
    }

    #[test]
    fn test_cascade_destroy() {
        let mut registry = ObjectRegistry::new();
        let root = registry.register::<TestObject>();
        let child = registry.register::<TestObject>();
        let grandchild = registry.register::<TestObject>();
        registry.set_parent(child, Some(root)).unwrap();
        registry.set_parent(grandchild, Some(child)).unwrap();

        registry.destroy(root).unwrap();
        assert!(!registry.contains(child));
        assert!(!registry.contains(grandchild));
        assert_eq!(registry.object_count(), 0);
    }

    #[test]
    fn test_destroy_child_detaches_from_parent() {
        let mut registry = ObjectRegistry::new();
        let root = registry.register::<TestObject>();
        let child = registry.register::<TestObject>();
        registry.set_parent(child, Some(root)).unwrap();

        registry.destroy(child).unwrap();
        assert!(registry.children(root).unwrap().is_empty());
    }

    #[test]
    fn test_reparent() {
        let mut registry = ObjectRegistry::new();
        let a = registry.register::<TestObject>();
        let b = registry.register::<TestObject>();
        let child = registry.register::<TestObject>();

        registry.set_parent(child, Some(a)).unwrap();
        registry.set_parent(child, Some(b)).unwrap();

        assert!(registry.children(a).unwrap().is_empty());
        assert_eq!(registry.children(b).unwrap(), &[child]);
        assert_eq!(registry.parent(child).unwrap(), Some(b));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let mut registry = ObjectRegistry::new();
        let a = registry.register::<TestObject>();
        let b = registry.register::<TestObject>();
        registry.set_parent(b, Some(a)).unwrap();

        assert_eq!(
            registry.set_parent(a, Some(b)),
            Err(ObjectError::CircularParentage)
        );
        assert_eq!(
            registry.set_parent(a, Some(a)),
            Err(ObjectError::CircularParentage)
        );
    }

    #[test]
    fn test_find_children() {
        let mut registry = ObjectRegistry::new();
        let root = registry.register::<TestObject>();
        let named = registry.register::<TestObject>();
        let other = registry.register::<OtherObject>();
        registry.set_parent(named, Some(root)).unwrap();
        registry.set_parent(other, Some(root)).unwrap();
        registry.set_object_name(named, "echo".into()).unwrap();

        assert_eq!(registry.find_child_by_name(root, "echo").unwrap(), Some(named));
        assert_eq!(registry.find_child_by_name(root, "missing").unwrap(), None);
        assert_eq!(registry.type_name(other).unwrap(), std::any::type_name::<OtherObject>());
    }

    #[test]
    fn test_object_base_drop_releases_subtree() {
        let parent = TestObject::new();
        let child = TestObject::new();
        child.base.set_parent(Some(parent.object_id())).unwrap();
        child.base.set_name("child");

        let parent_id = parent.object_id();
        let child_id = child.object_id();
        assert_eq!(parent.base.find_child_by_name("child"), Some(child_id));
        assert_eq!(child.base.parent(), Some(parent_id));

        drop(parent);
        assert!(!global_registry().contains(parent_id));
        assert!(!global_registry().contains(child_id));

        // Dropping the orphaned handle afterwards is a no-op.
        drop(child);
    }
}
