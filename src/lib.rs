//! Dimension-scale registry for object-store backed array collections.
//!
//! meridian records which datasets serve as coordinate *scales* for the
//! dimensions of other datasets in a collection, plus optional per-dimension
//! text labels. Everything the registry knows is stored as reserved
//! attributes on the participating objects, so associations persist with the
//! collection and need no side tables:
//!
//! ```text
//! <collection root>/
//!   └── objects/
//!       ├── temperature/
//!       │   ├── object.json
//!       │   └── attributes/
//!       │       ├── DIMENSION_LIST.json
//!       │       └── DIMENSION_LABELS.json
//!       └── longitude/
//!           ├── object.json
//!           └── attributes/
//!               ├── DIMENSION_SCALE_CLASS.json
//!               └── REFERENCE_LIST.json
//! ```
//!
//! Operations are plain read-modify-write calls against the store; there is
//! no background processing. An attach or detach updates two attributes on
//! two objects (target side first) and those writes are not transactional,
//! so concurrent writers touching the same objects must be serialized by the
//! caller.
//!
//! ```no_run
//! use std::ops::ControlFlow;
//! use std::sync::Arc;
//!
//! use meridian::{Collection, DataType, ObjectMeta, ScaleRegistry};
//! use object_store::{memory::InMemory, ObjectStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
//! let root = object_store::path::Path::from("collection");
//! let collection = Collection::new(store.clone(), root.clone());
//! let registry = ScaleRegistry::new(store, root);
//!
//! let grid = collection
//!     .create_object(ObjectMeta {
//!         name: "temperature".into(),
//!         data_type: DataType::F64,
//!         shape: [180, 360].into_iter().collect(),
//!     })
//!     .await?;
//! let lon = collection
//!     .create_object(ObjectMeta {
//!         name: "longitude".into(),
//!         data_type: DataType::F64,
//!         shape: [360].into_iter().collect(),
//!     })
//!     .await?;
//!
//! registry.set_scale(&lon, "longitude").await?;
//! registry.attach_scale(&grid, &lon, 1).await?;
//!
//! registry
//!     .iterate_scales(&grid, 1, 0, |_, _, scale| {
//!         println!("{}", scale.name());
//!         ControlFlow::<()>::Continue(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod consts;
pub mod dtype;
pub mod object;
pub mod scales;

pub(crate) mod attributes;

pub use collection::{Collection, CollectionError};
pub use dtype::DataType;
pub use object::{Dataset, ObjectMeta, ObjectRef};
pub use scales::{ScaleError, ScaleRegistry, ScaleWalk};
