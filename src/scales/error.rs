use crate::{attributes::AttributeError, object::ObjectRef};

/// Errors returned by [`crate::scales::ScaleRegistry`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),

    /// Serializing an attribute payload failed.
    #[error(transparent)]
    Json(simd_json::Error),

    #[error("dimension index {dim} out of range for rank {rank}")]
    InvalidDimensionIndex { dim: usize, rank: usize },

    #[error("dataset {name} cannot be attached as a scale of itself")]
    SelfReferenceNotAllowed { name: ObjectRef },

    #[error("object {name} is not marked as a dimension scale")]
    NotAScale { name: ObjectRef },

    #[error("scale {scale} is not attached to dimension {dim} of {target}")]
    AssociationNotFound {
        target: ObjectRef,
        scale: ObjectRef,
        dim: usize,
    },

    #[error("scale of length {scale_len} does not fit extent {extent}")]
    IncompatibleExtent { scale_len: usize, extent: usize },

    #[error("object {name} does not exist in this collection")]
    ObjectUnavailable { name: ObjectRef },

    #[error("corrupt {attribute}: {reason}")]
    AttributeCorrupt {
        attribute: &'static str,
        reason: String,
    },
}

impl ScaleError {
    /// A failure while reading stored metadata: store errors pass through,
    /// an undecodable payload means the stored attribute is corrupt.
    pub(crate) fn attribute_read(attribute: &'static str, err: AttributeError) -> Self {
        match err {
            AttributeError::ObjectStore(err) => Self::ObjectStore(err),
            AttributeError::Json(err) => Self::AttributeCorrupt {
                attribute,
                reason: err.to_string(),
            },
        }
    }

    /// A failure while writing or deleting a stored attribute.
    pub(crate) fn attribute_write(err: AttributeError) -> Self {
        match err {
            AttributeError::ObjectStore(err) => Self::ObjectStore(err),
            AttributeError::Json(err) => Self::Json(err),
        }
    }
}
