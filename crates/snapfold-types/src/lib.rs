//! Raw snapshot shapes for snapfold.
//!
//! A [`RawSnapshot`] is the unprocessed point-in-time dump handed over by a
//! snapshot source: a flat list of native objects, the type-name table those
//! objects index into, and the managed type descriptions. Nothing in here is
//! aggregated or sorted; see `snapfold-aggregate` for that.

use facet::Facet;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    TypeIndexOutOfRange {
        object_index: usize,
        type_index: u32,
        type_count: usize,
    },
    EmptyTypeName {
        type_index: usize,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeIndexOutOfRange {
                object_index,
                type_index,
                type_count,
            } => write!(
                f,
                "native object #{object_index} has type_index {type_index}, but the type table has {type_count} entries"
            ),
            Self::EmptyTypeName { type_index } => {
                write!(f, "native type #{type_index} has an empty name")
            }
        }
    }
}

impl Error for InvariantError {}

/// An engine-level object entry in a raw snapshot.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct RawNativeObject {
    /// Index into [`RawSnapshot::native_types`].
    pub type_index: u32,
    /// Size in bytes.
    pub size: u64,
    /// Engine instance identity.
    pub instance_id: i32,
    /// Object name; engines leave this empty for many internal objects.
    #[facet(default)]
    pub name: String,
}

impl RawNativeObject {
    pub fn new(type_index: u32, size: u64, instance_id: i32, name: impl Into<String>) -> Self {
        Self {
            type_index,
            size,
            instance_id,
            name: name.into(),
        }
    }
}

/// A managed (script-level) type description.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct TypeDescription {
    pub is_value_type: bool,
    pub is_array: bool,
    /// Number of array dimensions; zero for non-array types.
    #[facet(default)]
    pub array_rank: i32,
    pub name: String,
    pub size: i32,
}

/// A point-in-time dump of the objects known to the engine.
#[derive(Facet, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSnapshot {
    /// Flat list of native objects.
    pub native_objects: Vec<RawNativeObject>,
    /// Native type names, indexed by [`RawNativeObject::type_index`].
    pub native_types: Vec<String>,
    /// Managed type descriptions.
    #[facet(default)]
    pub type_descriptions: Vec<TypeDescription>,
}

impl RawSnapshot {
    /// Resolves the type name of a native object, if its index is in range.
    pub fn type_name_of(&self, object: &RawNativeObject) -> Option<&str> {
        self.native_types
            .get(object.type_index as usize)
            .map(String::as_str)
    }

    /// Checks that every native object points at a named entry of the type table.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if let Some(type_index) = self.native_types.iter().position(String::is_empty) {
            return Err(InvariantError::EmptyTypeName { type_index });
        }
        for (object_index, object) in self.native_objects.iter().enumerate() {
            if object.type_index as usize >= self.native_types.len() {
                return Err(InvariantError::TypeIndexOutOfRange {
                    object_index,
                    type_index: object.type_index,
                    type_count: self.native_types.len(),
                });
            }
        }
        Ok(())
    }

    /// Sum of `size` over all native objects.
    pub fn native_bytes(&self) -> u64 {
        self.native_objects.iter().map(|object| object.size).sum()
    }
}
