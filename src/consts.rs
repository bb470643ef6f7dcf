pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved attribute names used by the dimension-scale registry.
///
/// Callers storing their own attributes under these exact names on objects
/// that also participate in scale associations get undefined behavior.
pub const DIMENSION_SCALE_CLASS: &str = "DIMENSION_SCALE_CLASS";
pub const DIMENSION_LIST: &str = "DIMENSION_LIST";
pub const REFERENCE_LIST: &str = "REFERENCE_LIST";
pub const DIMENSION_LABELS: &str = "DIMENSION_LABELS";

/// Value the `class` field of the scale marker must hold.
pub const DIMENSION_SCALE_CLASS_VALUE: &str = "DIMENSION_SCALE";

/// Layout of a collection object:
///     objects/<object_name>/object.json
///     objects/<object_name>/attributes/<ATTRIBUTE>.json
///
pub const OBJECTS_DIR: &str = "objects";
pub const OBJECT_META_FILE: &str = "object.json";
pub const OBJECT_ATTRIBUTES_DIR: &str = "attributes";
