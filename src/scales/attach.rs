//! Attaching and detaching scales.

use object_store::ObjectStore;
use tracing::{debug, trace};

use crate::{
    consts,
    object::{Dataset, ObjectRef},
};

use super::{check_dim, ReferenceEntry, ScaleError, ScaleRegistry};

impl<S: ObjectStore> ScaleRegistry<S> {
    /// Attach `scale` to dimension `dim` of `target`.
    ///
    /// `scale` must have been marked with [`ScaleRegistry::set_scale`], must
    /// not be `target` itself, and its length along its first dimension must
    /// equal the target's extent along `dim`. Attaching an already-attached
    /// pair is a no-op. All preconditions are checked before anything is
    /// written.
    pub async fn attach_scale(
        &self,
        target: &Dataset,
        scale: &Dataset,
        dim: usize,
    ) -> Result<(), ScaleError> {
        let extent = check_dim(target, dim)?;
        if scale.name() == target.name() {
            return Err(ScaleError::SelfReferenceNotAllowed {
                name: scale.name().clone(),
            });
        }
        if !self.is_scale(scale).await? {
            return Err(ScaleError::NotAScale {
                name: scale.name().clone(),
            });
        }
        match scale.extent(0) {
            Some(scale_len) if scale_len == extent => {}
            scale_len => {
                return Err(ScaleError::IncompatibleExtent {
                    scale_len: scale_len.unwrap_or(0),
                    extent,
                });
            }
        }

        let mut dimension_list = self
            .read_dimension_list(target)
            .await?
            .unwrap_or_else(|| vec![Vec::new(); target.rank()]);
        if dimension_list[dim].contains(scale.name()) {
            trace!(dataset = %target.name(), scale = %scale.name(), dim, "scale already attached");
            return Ok(());
        }
        dimension_list[dim].push(scale.name().clone());
        self.write_object_attribute(target.name(), consts::DIMENSION_LIST, &dimension_list)
            .await?;

        let mut reference_list = self.read_reference_list(scale).await?.unwrap_or_default();
        let entry = ReferenceEntry {
            target: target.name().clone(),
            dim,
        };
        if !reference_list.contains(&entry) {
            reference_list.push(entry);
            self.write_object_attribute(scale.name(), consts::REFERENCE_LIST, &reference_list)
                .await?;
        }

        debug!(dataset = %target.name(), scale = %scale.name(), dim, "attached scale");
        Ok(())
    }

    /// Detach `scale` from dimension `dim` of `target`.
    ///
    /// Other attachments on the same or other dimensions are left alone.
    /// Attributes that become entirely empty are removed.
    pub async fn detach_scale(
        &self,
        target: &Dataset,
        scale: &Dataset,
        dim: usize,
    ) -> Result<(), ScaleError> {
        check_dim(target, dim)?;

        let not_attached = || ScaleError::AssociationNotFound {
            target: target.name().clone(),
            scale: scale.name().clone(),
            dim,
        };

        let mut dimension_list = self
            .read_dimension_list(target)
            .await?
            .ok_or_else(not_attached)?;
        let position = dimension_list[dim]
            .iter()
            .position(|reference| reference == scale.name())
            .ok_or_else(not_attached)?;
        dimension_list[dim].remove(position);

        if dimension_list.iter().all(|scales| scales.is_empty()) {
            self.delete_object_attribute(target.name(), consts::DIMENSION_LIST)
                .await?;
        } else {
            self.write_object_attribute(target.name(), consts::DIMENSION_LIST, &dimension_list)
                .await?;
        }

        let mut reference_list = self.read_reference_list(scale).await?.unwrap_or_default();
        let entry = ReferenceEntry {
            target: target.name().clone(),
            dim,
        };
        if let Some(position) = reference_list.iter().position(|existing| *existing == entry) {
            reference_list.remove(position);
            if reference_list.is_empty() {
                self.delete_object_attribute(scale.name(), consts::REFERENCE_LIST)
                    .await?;
            } else {
                self.write_object_attribute(scale.name(), consts::REFERENCE_LIST, &reference_list)
                    .await?;
            }
        }

        debug!(dataset = %target.name(), scale = %scale.name(), dim, "detached scale");
        Ok(())
    }

    /// Number of scales currently attached to dimension `dim` of `target`.
    pub async fn num_scales(&self, target: &Dataset, dim: usize) -> Result<usize, ScaleError> {
        check_dim(target, dim)?;
        Ok(self
            .read_dimension_list(target)
            .await?
            .map(|list| list[dim].len())
            .unwrap_or(0))
    }

    /// Whether `scale` is attached to dimension `dim` of `target`.
    pub async fn is_attached(
        &self,
        target: &Dataset,
        scale: &Dataset,
        dim: usize,
    ) -> Result<bool, ScaleError> {
        check_dim(target, dim)?;
        Ok(self
            .read_dimension_list(target)
            .await?
            .map(|list| list[dim].contains(scale.name()))
            .unwrap_or(false))
    }

    /// The `(target, dim)` pairs currently referencing `scale`.
    pub async fn scale_references(
        &self,
        scale: &Dataset,
    ) -> Result<Vec<(ObjectRef, usize)>, ScaleError> {
        Ok(self
            .read_reference_list(scale)
            .await?
            .unwrap_or_default()
            .into_iter()
            .map(|entry| (entry.target, entry.dim))
            .collect())
    }
}
