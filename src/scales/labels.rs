//! Per-dimension text labels.
//!
//! Labels are independent of scale attachment: a dimension can carry a label
//! without any scale and the other way around.

use compact_str::CompactString;
use object_store::ObjectStore;
use tracing::debug;

use crate::{consts, object::Dataset};

use super::{check_dim, ScaleError, ScaleRegistry};

impl<S: ObjectStore> ScaleRegistry<S> {
    /// Store `text` as the label of dimension `dim` of `target`.
    ///
    /// Never-set slots below `dim` are grown with empty placeholders; a
    /// prior label at the slot is overwritten.
    pub async fn set_label(
        &self,
        target: &Dataset,
        dim: usize,
        text: &str,
    ) -> Result<(), ScaleError> {
        check_dim(target, dim)?;

        let mut labels = self.read_labels(target).await?.unwrap_or_default();
        if labels.len() <= dim {
            labels.resize(dim + 1, None);
        }
        labels[dim] = Some(text.into());
        self.write_object_attribute(target.name(), consts::DIMENSION_LABELS, &labels)
            .await?;

        debug!(dataset = %target.name(), dim, label = text, "labeled dimension");
        Ok(())
    }

    /// The label of dimension `dim`, or `None` when the slot was never set.
    pub async fn label(
        &self,
        target: &Dataset,
        dim: usize,
    ) -> Result<Option<CompactString>, ScaleError> {
        check_dim(target, dim)?;
        Ok(self
            .read_labels(target)
            .await?
            .and_then(|labels| labels.get(dim).cloned().flatten()))
    }
}
