//! Flattened managed type descriptions.

use facet::Facet;
use snapfold_types::TypeDescription;

/// Some runtimes report nested or global types with a leading `.`.
const NAME_SEPARATOR: char = '.';

#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct ManagedTypeRecord {
    pub is_value_type: bool,
    pub is_array: bool,
    pub array_rank: i32,
    pub name: String,
    pub size: i32,
}

impl From<&TypeDescription> for ManagedTypeRecord {
    fn from(source: &TypeDescription) -> Self {
        let name = source
            .name
            .strip_prefix(NAME_SEPARATOR)
            .unwrap_or(source.name.as_str())
            .to_owned();
        Self {
            is_value_type: source.is_value_type,
            is_array: source.is_array,
            array_rank: source.array_rank,
            name,
            size: source.size,
        }
    }
}

/// One record per description, same order.
pub fn flatten(descriptions: &[TypeDescription]) -> Vec<ManagedTypeRecord> {
    descriptions.iter().map(ManagedTypeRecord::from).collect()
}
