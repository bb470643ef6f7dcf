//! Collection objects and their handles.
//!
//! Every entry in a collection is an *object*: a named, typed array whose
//! declared metadata lives in `objects/<object_name>/object.json`. The
//! registry only ever reads this metadata; element data is owned by whatever
//! writes the arrays themselves.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::dtype::DataType;

/// Stable reference to an object within a single collection.
///
/// A reference is the object's directory name under `objects/`. It stays
/// valid for the lifetime of the collection and is never resolved across
/// collection instances.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectRef(CompactString);

impl ObjectRef {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(CompactString::new(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Declared metadata stored in `object.json`.
///
/// `shape` holds the extents per dimension; the rank of the object is
/// `shape.len()`. Shape is fixed at creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectMeta {
    pub name: CompactString,
    pub data_type: DataType,
    pub shape: SmallVec<[usize; 4]>,
}

/// An open handle to a collection object.
///
/// Handles are value snapshots of the object's declared metadata, obtained
/// from [`crate::collection::Collection::open_object`] or
/// [`crate::collection::Collection::create_object`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: ObjectRef,
    meta: ObjectMeta,
}

impl Dataset {
    pub(crate) fn new(name: ObjectRef, meta: ObjectMeta) -> Self {
        Self { name, meta }
    }

    pub fn name(&self) -> &ObjectRef {
        &self.name
    }

    pub fn meta(&self) -> &ObjectMeta {
        &self.meta
    }

    pub fn rank(&self) -> usize {
        self.meta.shape.len()
    }

    /// Extent along `dim`, or `None` when `dim` is out of range.
    pub fn extent(&self, dim: usize) -> Option<usize> {
        self.meta.shape.get(dim).copied()
    }
}
