//! Scale identity: marking objects as scales and naming them.

use compact_str::CompactString;
use object_store::ObjectStore;
use tracing::debug;

use crate::{consts, object::Dataset};

use super::{ScaleClass, ScaleError, ScaleRegistry};

impl<S: ObjectStore> ScaleRegistry<S> {
    /// Mark `object` as a dimension scale named `name`.
    ///
    /// `name` may be empty. Calling again overwrites the name; the marker
    /// itself is never cleared. Whether the object is attached anywhere is
    /// orthogonal to the marker.
    pub async fn set_scale(&self, object: &Dataset, name: &str) -> Result<(), ScaleError> {
        let marker = ScaleClass {
            class: consts::DIMENSION_SCALE_CLASS_VALUE.into(),
            name: name.into(),
        };
        self.write_object_attribute(object.name(), consts::DIMENSION_SCALE_CLASS, &marker)
            .await?;
        debug!(object = %object.name(), name, "marked object as dimension scale");
        Ok(())
    }

    /// Whether `object` carries the scale marker.
    pub async fn is_scale(&self, object: &Dataset) -> Result<bool, ScaleError> {
        Ok(self.read_scale_class(object).await?.is_some())
    }

    /// The stored scale name, or `None` when `object` is not a scale.
    pub async fn scale_name(&self, object: &Dataset) -> Result<Option<CompactString>, ScaleError> {
        Ok(self.read_scale_class(object).await?.map(|marker| marker.name))
    }
}
