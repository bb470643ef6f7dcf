//! Cross-module registry behavior: bidirectional consistency of the stored
//! association attributes, idempotence at the byte level, and attribute
//! lifecycle across full detach / re-attach cycles.

use std::ops::ControlFlow;
use std::sync::Arc;

use meridian::{Collection, DataType, Dataset, ObjectMeta, ScaleRegistry, ScaleWalk};
use object_store::{memory::InMemory, ObjectStore};

type SharedStore = Arc<dyn ObjectStore>;

fn root() -> object_store::path::Path {
    object_store::path::Path::from("collection")
}

fn harness() -> (SharedStore, Collection<SharedStore>, ScaleRegistry<SharedStore>) {
    let store: SharedStore = Arc::new(InMemory::new());
    let collection = Collection::new(store.clone(), root());
    let registry = ScaleRegistry::new(store.clone(), root());
    (store, collection, registry)
}

async fn create(collection: &Collection<SharedStore>, name: &str, shape: &[usize]) -> Dataset {
    collection
        .create_object(ObjectMeta {
            name: name.into(),
            data_type: DataType::F64,
            shape: shape.iter().copied().collect(),
        })
        .await
        .unwrap()
}

async fn create_scale(
    collection: &Collection<SharedStore>,
    registry: &ScaleRegistry<SharedStore>,
    name: &str,
    len: usize,
) -> Dataset {
    let dataset = create(collection, name, &[len]).await;
    registry.set_scale(&dataset, name).await.unwrap();
    dataset
}

/// Every attachment recorded on a target must have a matching entry in the
/// scale's reference list, and the other way around.
async fn assert_bidirectionally_consistent(
    registry: &ScaleRegistry<SharedStore>,
    targets: &[&Dataset],
    scales: &[&Dataset],
) {
    for scale in scales {
        let references = registry.scale_references(scale).await.unwrap();
        for target in targets {
            for dim in 0..target.rank() {
                let attached = registry.is_attached(target, scale, dim).await.unwrap();
                let referenced = references.contains(&(target.name().clone(), dim));
                assert_eq!(
                    attached,
                    referenced,
                    "scale {} / target {} / dim {dim} out of sync",
                    scale.name(),
                    target.name()
                );
            }
        }
    }
}

#[tokio::test]
async fn attach_detach_sequences_stay_bidirectionally_consistent() {
    let (_store, collection, registry) = harness();

    let temperature = create(&collection, "temperature", &[180, 360]).await;
    let pressure = create(&collection, "pressure", &[180, 360]).await;
    let lat = create_scale(&collection, &registry, "latitude", 180).await;
    let lon = create_scale(&collection, &registry, "longitude", 360).await;

    let targets = [&temperature, &pressure];
    let scales = [&lat, &lon];

    registry.attach_scale(&temperature, &lat, 0).await.unwrap();
    registry.attach_scale(&temperature, &lon, 1).await.unwrap();
    registry.attach_scale(&pressure, &lat, 0).await.unwrap();
    registry.attach_scale(&pressure, &lon, 1).await.unwrap();
    assert_bidirectionally_consistent(&registry, &targets, &scales).await;

    registry.detach_scale(&temperature, &lat, 0).await.unwrap();
    assert_bidirectionally_consistent(&registry, &targets, &scales).await;

    registry.attach_scale(&temperature, &lat, 0).await.unwrap();
    registry.detach_scale(&pressure, &lon, 1).await.unwrap();
    registry.detach_scale(&pressure, &lat, 0).await.unwrap();
    assert_bidirectionally_consistent(&registry, &targets, &scales).await;

    // The shared scale is still attached where it should be.
    assert!(registry.is_attached(&temperature, &lat, 0).await.unwrap());
    assert!(!registry.is_attached(&pressure, &lat, 0).await.unwrap());
}

#[tokio::test]
async fn second_attach_leaves_attributes_byte_identical() {
    let (store, collection, registry) = harness();

    let temperature = create(&collection, "temperature", &[180, 360]).await;
    let lon = create_scale(&collection, &registry, "longitude", 360).await;
    registry.attach_scale(&temperature, &lon, 1).await.unwrap();

    let dimension_list_path = object_store::path::Path::from(
        "collection/objects/temperature/attributes/DIMENSION_LIST.json",
    );
    let reference_list_path = object_store::path::Path::from(
        "collection/objects/longitude/attributes/REFERENCE_LIST.json",
    );

    let dims_before = store
        .get(&dimension_list_path)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let refs_before = store
        .get(&reference_list_path)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    registry.attach_scale(&temperature, &lon, 1).await.unwrap();

    let dims_after = store
        .get(&dimension_list_path)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let refs_after = store
        .get(&reference_list_path)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    assert_eq!(dims_before, dims_after);
    assert_eq!(refs_before, refs_after);
}

#[tokio::test]
async fn full_detach_removes_attributes_and_reattach_recreates_them() {
    let (store, collection, registry) = harness();

    let temperature = create(&collection, "temperature", &[180, 360]).await;
    let lon = create_scale(&collection, &registry, "longitude", 360).await;
    registry.attach_scale(&temperature, &lon, 1).await.unwrap();
    registry.detach_scale(&temperature, &lon, 1).await.unwrap();

    let dimension_list_path = object_store::path::Path::from(
        "collection/objects/temperature/attributes/DIMENSION_LIST.json",
    );
    let reference_list_path = object_store::path::Path::from(
        "collection/objects/longitude/attributes/REFERENCE_LIST.json",
    );
    assert!(matches!(
        store.get(&dimension_list_path).await.unwrap_err(),
        object_store::Error::NotFound { .. }
    ));
    assert!(matches!(
        store.get(&reference_list_path).await.unwrap_err(),
        object_store::Error::NotFound { .. }
    ));

    registry.attach_scale(&temperature, &lon, 1).await.unwrap();
    assert!(registry.is_attached(&temperature, &lon, 1).await.unwrap());
    assert_eq!(registry.num_scales(&temperature, 1).await.unwrap(), 1);
}

#[tokio::test]
async fn one_scale_serves_multiple_targets_and_dimensions() {
    let (_store, collection, registry) = harness();

    // A square grid where the same coordinate scale fits both dimensions.
    let field = create(&collection, "field", &[128, 128]).await;
    let window = create(&collection, "window", &[128]).await;
    let axis = create_scale(&collection, &registry, "axis", 128).await;

    registry.attach_scale(&field, &axis, 0).await.unwrap();
    registry.attach_scale(&field, &axis, 1).await.unwrap();
    registry.attach_scale(&window, &axis, 0).await.unwrap();

    let mut references = registry.scale_references(&axis).await.unwrap();
    references.sort();
    assert_eq!(
        references,
        vec![
            (field.name().clone(), 0),
            (field.name().clone(), 1),
            (window.name().clone(), 0),
        ]
    );

    registry.detach_scale(&field, &axis, 0).await.unwrap();
    assert!(!registry.is_attached(&field, &axis, 0).await.unwrap());
    assert!(registry.is_attached(&field, &axis, 1).await.unwrap());
    assert!(registry.is_attached(&window, &axis, 0).await.unwrap());
}

#[tokio::test]
async fn iteration_sees_live_attachment_state() {
    let (_store, collection, registry) = harness();

    let series = create(&collection, "series", &[32]).await;
    let ticks = create_scale(&collection, &registry, "ticks", 32).await;
    let stamps = create_scale(&collection, &registry, "stamps", 32).await;

    registry.attach_scale(&series, &ticks, 0).await.unwrap();
    registry.attach_scale(&series, &stamps, 0).await.unwrap();
    registry.detach_scale(&series, &ticks, 0).await.unwrap();

    let mut seen = Vec::new();
    let walk = registry
        .iterate_scales(&series, 0, 0, |_, _, scale| {
            seen.push(scale.name().as_str().to_string());
            ControlFlow::<()>::Continue(())
        })
        .await
        .unwrap();

    assert_eq!(walk, ScaleWalk::Completed { visited: 1 });
    assert_eq!(seen, vec!["stamps"]);
}
