//! Object attribute plumbing.
//!
//! An attribute is a named, typed piece of metadata attached to a collection
//! object. Each attribute is one JSON object in the store:
//!
//! ```text
//! <collection root>/
//!   └── objects/
//!       └── longitude/
//!           ├── object.json
//!           └── attributes/
//!               ├── DIMENSION_SCALE_CLASS.json
//!               └── REFERENCE_LIST.json
//! ```
//!
//! Writes replace the whole payload, so read-modify-write of a single
//! attribute stays well defined as long as writers to the same object are
//! serialized by the caller.

use object_store::{ObjectStore, PutPayload};

use crate::consts;

#[derive(Debug, thiserror::Error)]
pub(crate) enum AttributeError {
    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),

    #[error(transparent)]
    Json(#[from] simd_json::Error),
}

pub(crate) fn attribute_path(
    object_dir: &object_store::path::Path,
    name: &str,
) -> object_store::path::Path {
    object_dir
        .child(consts::OBJECT_ATTRIBUTES_DIR)
        .child(format!("{name}.json"))
}

/// Read the attribute `name` of the object at `object_dir`.
///
/// Returns `Ok(None)` when the attribute was never written.
pub(crate) async fn read_attribute<S, T>(
    store: &S,
    object_dir: &object_store::path::Path,
    name: &str,
) -> Result<Option<T>, AttributeError>
where
    S: ObjectStore,
    T: serde::de::DeserializeOwned,
{
    match store.get(&attribute_path(object_dir, name)).await {
        Ok(get_result) => {
            let bytes = get_result.bytes().await?;
            let mut buf = bytes.to_vec();
            Ok(Some(simd_json::from_slice(&mut buf)?))
        }
        Err(object_store::Error::NotFound { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Write (or overwrite) the attribute `name` of the object at `object_dir`.
pub(crate) async fn write_attribute<S, T>(
    store: &S,
    object_dir: &object_store::path::Path,
    name: &str,
    value: &T,
) -> Result<(), AttributeError>
where
    S: ObjectStore,
    T: serde::Serialize,
{
    let json_bytes = simd_json::to_vec(value)?;
    store
        .put(
            &attribute_path(object_dir, name),
            PutPayload::from_bytes(json_bytes.into()),
        )
        .await?;
    Ok(())
}

/// Remove the attribute `name`. Removing an absent attribute is a no-op.
pub(crate) async fn delete_attribute<S: ObjectStore>(
    store: &S,
    object_dir: &object_store::path::Path,
    name: &str,
) -> Result<(), AttributeError> {
    match store.delete(&attribute_path(object_dir, name)).await {
        Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
        Err(err) => Err(err.into()),
    }
}
