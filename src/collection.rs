//! Array collections.
//!
//! A collection is a directory tree in an [`ObjectStore`] holding named
//! array objects and their metadata:
//!
//! ```text
//! <collection root>/
//!   └── objects/
//!       ├── temperature/
//!       │   ├── object.json
//!       │   └── attributes/
//!       └── longitude/
//!           ├── object.json
//!           └── attributes/
//! ```
//!
//! [`Collection`] only manages object metadata; element data and the
//! dimension-scale attributes are written by other layers against the same
//! store.

use futures::TryStreamExt;
use object_store::{ObjectStore, PutPayload};

use crate::{
    attributes::AttributeError,
    consts,
    object::{Dataset, ObjectMeta, ObjectRef},
};

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),

    #[error(transparent)]
    Json(#[from] simd_json::Error),

    #[error("object {name} does not exist in this collection")]
    ObjectUnavailable { name: ObjectRef },

    #[error("object {name} already exists in this collection")]
    ObjectExists { name: ObjectRef },
}

impl From<AttributeError> for CollectionError {
    fn from(err: AttributeError) -> Self {
        match err {
            AttributeError::ObjectStore(err) => Self::ObjectStore(err),
            AttributeError::Json(err) => Self::Json(err),
        }
    }
}

/// Directory of the object `name` under the collection at `root`.
pub(crate) fn object_dir(
    root: &object_store::path::Path,
    name: &ObjectRef,
) -> object_store::path::Path {
    root.child(consts::OBJECTS_DIR).child(name.as_str())
}

/// Read `object.json` for `name`. Returns `Ok(None)` when the object does
/// not exist.
pub(crate) async fn read_object_meta<S: ObjectStore>(
    store: &S,
    root: &object_store::path::Path,
    name: &ObjectRef,
) -> Result<Option<ObjectMeta>, AttributeError> {
    let meta_path = object_dir(root, name).child(consts::OBJECT_META_FILE);
    match store.get(&meta_path).await {
        Ok(get_result) => {
            let bytes = get_result.bytes().await?;
            let mut buf = bytes.to_vec();
            Ok(Some(simd_json::from_slice(&mut buf)?))
        }
        Err(object_store::Error::NotFound { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub struct Collection<S: ObjectStore> {
    store: S,
    root: object_store::path::Path,
}

impl<S: ObjectStore> Collection<S> {
    pub fn new(store: S, root: object_store::path::Path) -> Self {
        Self { store, root }
    }

    pub fn root(&self) -> &object_store::path::Path {
        &self.root
    }

    /// Create a new object from its declared metadata and return an open
    /// handle to it.
    pub async fn create_object(&self, meta: ObjectMeta) -> Result<Dataset, CollectionError> {
        let name = ObjectRef::new(&meta.name);
        let meta_path = object_dir(&self.root, &name).child(consts::OBJECT_META_FILE);

        match self.store.head(&meta_path).await {
            Ok(_) => return Err(CollectionError::ObjectExists { name }),
            Err(object_store::Error::NotFound { .. }) => {}
            Err(err) => return Err(err.into()),
        }

        let json_bytes = simd_json::to_vec(&meta)?;
        self.store
            .put(&meta_path, PutPayload::from_bytes(json_bytes.into()))
            .await?;

        tracing::debug!(object = %name, shape = ?meta.shape, "created collection object");
        Ok(Dataset::new(name, meta))
    }

    /// Open an existing object by name.
    pub async fn open_object(&self, name: impl Into<ObjectRef>) -> Result<Dataset, CollectionError> {
        let name = name.into();
        let meta = read_object_meta(&self.store, &self.root, &name)
            .await?
            .ok_or_else(|| CollectionError::ObjectUnavailable { name: name.clone() })?;
        Ok(Dataset::new(name, meta))
    }

    /// List the names of all objects in the collection, sorted.
    pub async fn object_names(&self) -> Result<Vec<ObjectRef>, CollectionError> {
        let objects_dir = self.root.child(consts::OBJECTS_DIR);
        let mut entries = self.store.list(Some(&objects_dir));

        let mut names = Vec::new();
        while let Some(entry) = entries.try_next().await? {
            if entry.location.filename() != Some(consts::OBJECT_META_FILE) {
                continue;
            }
            let mut parts: Vec<_> = entry.location.parts().collect();
            parts.pop();
            if let Some(dir) = parts.pop() {
                names.push(ObjectRef::new(dir.as_ref()));
            }
        }

        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(names)
    }
}
