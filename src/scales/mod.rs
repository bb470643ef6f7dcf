//! Dimension-scale associations.
//!
//! A *scale* is a dataset designated to provide coordinate values for one
//! dimension of another dataset (a `longitude` object for dimension 1 of a
//! `temperature` grid). Associations live entirely in reserved attributes on
//! the participating objects:
//!
//! ```text
//! objects/temperature/attributes/
//!     DIMENSION_LIST.json        (per-dimension lists of attached scale refs)
//!     DIMENSION_LABELS.json      (optional text label per dimension)
//! objects/longitude/attributes/
//!     DIMENSION_SCALE_CLASS.json (scale marker plus human-readable name)
//!     REFERENCE_LIST.json        (inverse index of (target, dim) pairs)
//! ```
//!
//! The dimension list and the reference list mirror each other: a scale
//! appears in a target's dimension list at dim `d` exactly when the
//! `(target, d)` pair appears in the scale's reference list. One registry
//! call updates both sides, target side first. The two writes are not
//! transactional in the store, so concurrent writers touching the same
//! objects must be serialized by the caller.

pub mod attach;
pub mod error;
pub mod identity;
pub mod iter;
pub mod labels;

pub use error::ScaleError;
pub use iter::ScaleWalk;

use compact_str::CompactString;
use object_store::ObjectStore;

use crate::{
    attributes, collection, consts,
    object::{Dataset, ObjectRef},
};

/// Payload of the `DIMENSION_SCALE_CLASS` marker attribute.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct ScaleClass {
    pub class: CompactString,
    pub name: CompactString,
}

/// Payload of `DIMENSION_LIST`: one entry per dimension of the target, each
/// holding the scales attached to that dimension in attachment order.
pub(crate) type DimensionList = Vec<Vec<ObjectRef>>;

/// One entry of `REFERENCE_LIST` on a scale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct ReferenceEntry {
    pub target: ObjectRef,
    pub dim: usize,
}

pub(crate) type ReferenceList = Vec<ReferenceEntry>;

/// Payload of `DIMENSION_LABELS`: one optional label slot per dimension.
pub(crate) type DimensionLabels = Vec<Option<CompactString>>;

/// The dimension-scale registry of one collection.
///
/// Every operation is a direct read-modify-write of object attributes;
/// nothing runs in the background. See the module docs for the requirement
/// to serialize concurrent writers.
pub struct ScaleRegistry<S: ObjectStore> {
    store: S,
    root: object_store::path::Path,
}

impl<S: ObjectStore> ScaleRegistry<S> {
    /// Create a registry over the collection rooted at `root`.
    pub fn new(store: S, root: object_store::path::Path) -> Self {
        Self { store, root }
    }

    fn object_dir(&self, name: &ObjectRef) -> object_store::path::Path {
        collection::object_dir(&self.root, name)
    }

    /// Resolve a stored reference back to an open handle.
    async fn open_ref(&self, name: &ObjectRef) -> Result<Dataset, ScaleError> {
        let meta = collection::read_object_meta(&self.store, &self.root, name)
            .await
            .map_err(|err| ScaleError::attribute_read(consts::OBJECT_META_FILE, err))?
            .ok_or_else(|| ScaleError::ObjectUnavailable { name: name.clone() })?;
        Ok(Dataset::new(name.clone(), meta))
    }

    async fn read_scale_class(&self, object: &Dataset) -> Result<Option<ScaleClass>, ScaleError> {
        let marker: Option<ScaleClass> = attributes::read_attribute(
            &self.store,
            &self.object_dir(object.name()),
            consts::DIMENSION_SCALE_CLASS,
        )
        .await
        .map_err(|err| ScaleError::attribute_read(consts::DIMENSION_SCALE_CLASS, err))?;

        if let Some(marker) = &marker {
            if marker.class != consts::DIMENSION_SCALE_CLASS_VALUE {
                return Err(ScaleError::AttributeCorrupt {
                    attribute: consts::DIMENSION_SCALE_CLASS,
                    reason: format!("unexpected class value {:?}", marker.class),
                });
            }
        }
        Ok(marker)
    }

    async fn read_dimension_list(
        &self,
        target: &Dataset,
    ) -> Result<Option<DimensionList>, ScaleError> {
        let list: Option<DimensionList> = attributes::read_attribute(
            &self.store,
            &self.object_dir(target.name()),
            consts::DIMENSION_LIST,
        )
        .await
        .map_err(|err| ScaleError::attribute_read(consts::DIMENSION_LIST, err))?;

        if let Some(list) = &list {
            if list.len() != target.rank() {
                return Err(ScaleError::AttributeCorrupt {
                    attribute: consts::DIMENSION_LIST,
                    reason: format!(
                        "{} dimension entries for rank {}",
                        list.len(),
                        target.rank()
                    ),
                });
            }
        }
        Ok(list)
    }

    async fn read_reference_list(
        &self,
        scale: &Dataset,
    ) -> Result<Option<ReferenceList>, ScaleError> {
        attributes::read_attribute(
            &self.store,
            &self.object_dir(scale.name()),
            consts::REFERENCE_LIST,
        )
        .await
        .map_err(|err| ScaleError::attribute_read(consts::REFERENCE_LIST, err))
    }

    async fn read_labels(&self, target: &Dataset) -> Result<Option<DimensionLabels>, ScaleError> {
        let labels: Option<DimensionLabels> = attributes::read_attribute(
            &self.store,
            &self.object_dir(target.name()),
            consts::DIMENSION_LABELS,
        )
        .await
        .map_err(|err| ScaleError::attribute_read(consts::DIMENSION_LABELS, err))?;

        if let Some(labels) = &labels {
            if labels.len() > target.rank() {
                return Err(ScaleError::AttributeCorrupt {
                    attribute: consts::DIMENSION_LABELS,
                    reason: format!("{} label slots for rank {}", labels.len(), target.rank()),
                });
            }
        }
        Ok(labels)
    }

    async fn write_object_attribute<T: serde::Serialize>(
        &self,
        name: &ObjectRef,
        attribute: &'static str,
        value: &T,
    ) -> Result<(), ScaleError> {
        attributes::write_attribute(&self.store, &self.object_dir(name), attribute, value)
            .await
            .map_err(ScaleError::attribute_write)
    }

    async fn delete_object_attribute(
        &self,
        name: &ObjectRef,
        attribute: &'static str,
    ) -> Result<(), ScaleError> {
        attributes::delete_attribute(&self.store, &self.object_dir(name), attribute)
            .await
            .map_err(ScaleError::attribute_write)
    }
}

/// Validate `dim` against the declared rank of `dataset`, returning the
/// extent along `dim`.
fn check_dim(dataset: &Dataset, dim: usize) -> Result<usize, ScaleError> {
    match dataset.extent(dim) {
        Some(extent) => Ok(extent),
        None => Err(ScaleError::InvalidDimensionIndex {
            dim,
            rank: dataset.rank(),
        }),
    }
}
