/// Element types a collection object may declare in its metadata.
///
/// The registry never touches element data; the type travels with
/// [`crate::object::ObjectMeta`] so handles describe real datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DataType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Utf8,
}
