use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use snapfold_types::{RawNativeObject, RawSnapshot};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    TypeIndexOutOfRange {
        object_index: usize,
        type_index: u32,
        type_count: usize,
    },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeIndexOutOfRange {
                object_index,
                type_index,
                type_count,
            } => write!(
                f,
                "snapshot integrity violated: native object #{object_index} references type #{type_index}, \
                 but only {type_count} native types were reported"
            ),
        }
    }
}

impl Error for AggregateError {}

/// All native objects sharing one resolved type name.
#[derive(Debug, Clone, Default)]
pub struct TypeGroup {
    objects: Vec<RawNativeObject>,
    total_bytes: u64,
    expanded: bool,
}

impl TypeGroup {
    pub fn objects(&self) -> &[RawNativeObject] {
        &self.objects
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

/// Aggregated view of one snapshot.
///
/// Groups live in an unordered map keyed by type name; `order` is the
/// separately owned index that iteration follows. Before [`sort`](Self::sort)
/// it holds first-seen order, after it descending byte totals.
#[derive(Debug, Clone, Default)]
pub struct SnapshotInfo {
    groups: HashMap<String, TypeGroup>,
    order: Vec<String>,
    total_bytes: u64,
    total_object_count: u64,
}

impl SnapshotInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates a raw object list against its type-name table, then sorts.
    ///
    /// An object whose `type_index` falls outside `native_types` means the
    /// snapshot is corrupt; the whole build fails rather than guessing.
    pub fn build(
        native_objects: &[RawNativeObject],
        native_types: &[String],
    ) -> Result<Self, AggregateError> {
        let mut info = Self::new();
        for (object_index, object) in native_objects.iter().enumerate() {
            let Some(type_name) = native_types.get(object.type_index as usize) else {
                return Err(AggregateError::TypeIndexOutOfRange {
                    object_index,
                    type_index: object.type_index,
                    type_count: native_types.len(),
                });
            };
            info.add_object(type_name, object.clone());
        }
        info.sort();
        info!(
            types = info.type_count(),
            objects = info.total_object_count,
            bytes = info.total_bytes,
            "aggregated native objects"
        );
        Ok(info)
    }

    pub fn from_snapshot(snapshot: &RawSnapshot) -> Result<Self, AggregateError> {
        Self::build(&snapshot.native_objects, &snapshot.native_types)
    }

    /// Appends `object` to the group for `type_name`, creating it collapsed
    /// when this is the first object of that type.
    pub fn add_object(&mut self, type_name: &str, object: RawNativeObject) {
        let size = object.size;
        match self.groups.get_mut(type_name) {
            Some(group) => {
                group.total_bytes += size;
                group.objects.push(object);
            }
            None => {
                self.order.push(type_name.to_owned());
                self.groups.insert(
                    type_name.to_owned(),
                    TypeGroup {
                        objects: vec![object],
                        total_bytes: size,
                        expanded: false,
                    },
                );
            }
        }
        self.total_bytes += size;
        self.total_object_count += 1;
    }

    /// Orders groups by descending byte total and each group's members by
    /// descending size. Both sorts are stable, so ties keep their prior order
    /// and sorting twice is the same as sorting once.
    pub fn sort(&mut self) {
        let groups = &self.groups;
        self.order
            .sort_by(|a, b| groups[b].total_bytes.cmp(&groups[a].total_bytes));
        for group in self.groups.values_mut() {
            group.objects.sort_by(|a, b| b.size.cmp(&a.size));
        }
        debug!(types = self.order.len(), "sorted type groups");
    }

    pub fn type_count(&self) -> usize {
        self.groups.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn total_object_count(&self) -> u64 {
        self.total_object_count
    }

    /// Byte total for `type_name`, or 0 if this snapshot never saw it.
    pub fn type_byte_total(&self, type_name: &str) -> u64 {
        self.groups
            .get(type_name)
            .map_or(0, |group| group.total_bytes)
    }

    pub fn object_count(&self, type_name: &str) -> Option<usize> {
        self.groups.get(type_name).map(|group| group.objects.len())
    }

    pub fn group(&self, type_name: &str) -> Option<&TypeGroup> {
        self.groups.get(type_name)
    }

    /// Groups in index order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &TypeGroup)> + '_ {
        self.order
            .iter()
            .map(|name| (name.as_str(), &self.groups[name]))
    }

    pub fn type_names(&self) -> &[String] {
        &self.order
    }

    pub fn is_expanded(&self, type_name: &str) -> bool {
        self.groups
            .get(type_name)
            .is_some_and(|group| group.expanded)
    }

    /// Unknown names are ignored.
    pub fn set_expanded(&mut self, type_name: &str, expanded: bool) {
        if let Some(group) = self.groups.get_mut(type_name) {
            group.expanded = expanded;
        }
    }

    /// Carries expansion over from an earlier capture for every type name that
    /// reappears here.
    pub fn inherit_expanded(&mut self, previous: &SnapshotInfo) {
        for (name, group) in &mut self.groups {
            if let Some(old) = previous.groups.get(name) {
                group.expanded = old.expanded;
            }
        }
    }
}
