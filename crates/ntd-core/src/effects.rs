/// Write to the local key/value storage, applied before the paired mutation
/// commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Persist { key: &'static str, value: String },
    Remove { key: &'static str },
}
