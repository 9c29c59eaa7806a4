//! # Parameter Tree
//!
//! A nested, JSON-serializable tree of typed entries. Leaves carry a field
//! descriptor together with its current value; branches group leaves by
//! semantic area (`extrusion`, `footprint`, `heights`, ...).
//!
//! Leaves are addressed by [`FieldPath`], never by bare name, so the same
//! leaf name may appear in several branches.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::pattern::DataPattern;
use crate::range::{DataValue, FieldDescriptor};

// =============================================================================
// FIELD PATH
// =============================================================================

/// Keys from the root of a tree down to one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Creates a path from its keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Keys from root to leaf.
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// The last key, if any.
    pub fn leaf_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns a new path with `key` appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        Self(keys)
    }
}

impl From<&str> for FieldPath {
    /// Splits a dotted path such as `"footprint.xCount"`.
    fn from(path: &str) -> Self {
        Self(
            path.split('.')
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

// =============================================================================
// TREE
// =============================================================================

/// A leaf: descriptor plus current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    /// Field descriptor
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
    /// Current value
    pub value: DataValue,
}

impl DataEntry {
    /// Creates an entry.
    pub fn new(descriptor: FieldDescriptor, value: DataValue) -> Self {
        Self { descriptor, value }
    }
}

/// A nested parameter tree.
///
/// # Example
///
/// ```rust
/// use lamp_codec::range::{DataRange, DataValue, FieldDescriptor};
/// use lamp_codec::tree::{DataEntry, DataTree, FieldPath};
///
/// let mut tree = DataTree::default();
/// let entry = DataEntry::new(
///     FieldDescriptor::new("xCount", 0, DataRange::int(1.0, 12.0).unwrap()),
///     DataValue::Int(3),
/// );
/// tree.insert(&FieldPath::from("footprint.xCount"), entry).unwrap();
/// assert_eq!(
///     tree.leaf(&FieldPath::from("footprint.xCount")).map(|e| &e.value),
///     Some(&DataValue::Int(3))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataTree {
    /// A typed value
    Leaf(DataEntry),
    /// Named children
    Branch(BTreeMap<String, DataTree>),
}

impl Default for DataTree {
    fn default() -> Self {
        DataTree::Branch(BTreeMap::new())
    }
}

impl DataTree {
    /// Inserts `entry` at `path`, creating branches on the way.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::PathNotFound`] if the path is empty or crosses
    /// an existing leaf.
    pub fn insert(&mut self, path: &FieldPath, entry: DataEntry) -> CodecResult<()> {
        let not_found = || CodecError::PathNotFound(path.to_string());
        let (last, parents) = path.keys().split_last().ok_or_else(not_found)?;

        let mut node = self;
        for key in parents {
            let DataTree::Branch(children) = node else {
                return Err(not_found());
            };
            node = children.entry(key.clone()).or_default();
        }
        match node {
            DataTree::Branch(children) => {
                children.insert(last.clone(), DataTree::Leaf(entry));
                Ok(())
            }
            DataTree::Leaf(_) => Err(not_found()),
        }
    }

    /// Returns the node at `path`.
    pub fn get(&self, path: &FieldPath) -> Option<&DataTree> {
        path.keys().iter().try_fold(self, |node, key| match node {
            DataTree::Branch(children) => children.get(key),
            DataTree::Leaf(_) => None,
        })
    }

    fn get_mut(&mut self, path: &FieldPath) -> Option<&mut DataTree> {
        path.keys().iter().try_fold(self, |node, key| match node {
            DataTree::Branch(children) => children.get_mut(key),
            DataTree::Leaf(_) => None,
        })
    }

    /// Returns the leaf at `path`.
    pub fn leaf(&self, path: &FieldPath) -> Option<&DataEntry> {
        match self.get(path)? {
            DataTree::Leaf(entry) => Some(entry),
            DataTree::Branch(_) => None,
        }
    }

    /// Returns the leaf at `path` mutably.
    pub fn leaf_mut(&mut self, path: &FieldPath) -> Option<&mut DataEntry> {
        match self.get_mut(path)? {
            DataTree::Leaf(entry) => Some(entry),
            DataTree::Branch(_) => None,
        }
    }

    /// Returns the value at `path`.
    pub fn value(&self, path: &FieldPath) -> Option<&DataValue> {
        self.leaf(path).map(|entry| &entry.value)
    }

    /// Replaces the value at `path`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::PathNotFound`] if no leaf lives at `path`
    /// - [`CodecError::ValueMismatch`] if the value variant does not fit
    pub fn set_value(&mut self, path: &FieldPath, value: DataValue) -> CodecResult<()> {
        let entry = self
            .leaf_mut(path)
            .ok_or_else(|| CodecError::PathNotFound(path.to_string()))?;
        if !entry.descriptor.range.accepts(&value) {
            return Err(CodecError::ValueMismatch {
                field: path.to_string(),
            });
        }
        entry.value = value;
        Ok(())
    }

    /// All leaves with their paths, ordered by field index.
    pub fn flatten(&self) -> Vec<(FieldPath, &DataEntry)> {
        let mut leaves = Vec::new();
        self.collect_leaves(FieldPath::default(), &mut leaves);
        leaves.sort_by_key(|(_, entry)| entry.descriptor.index);
        leaves
    }

    fn collect_leaves<'a>(&'a self, path: FieldPath, out: &mut Vec<(FieldPath, &'a DataEntry)>) {
        match self {
            DataTree::Leaf(entry) => out.push((path, entry)),
            DataTree::Branch(children) => {
                for (key, child) in children {
                    child.collect_leaves(path.child(key.as_str()), out);
                }
            }
        }
    }

    /// The pattern described by the leaves, in index order.
    pub fn pattern(&self) -> DataPattern {
        DataPattern::new(
            self.flatten()
                .into_iter()
                .map(|(_, entry)| entry.descriptor.clone())
                .collect(),
        )
    }

    /// Leaf values in index order.
    pub fn values(&self) -> Vec<DataValue> {
        self.flatten()
            .into_iter()
            .map(|(_, entry)| entry.value.clone())
            .collect()
    }

    /// Writes `values` into the leaves in index order.
    ///
    /// # Errors
    ///
    /// Fails on a count mismatch or a value that does not fit its field.
    pub fn assign(&mut self, values: &[DataValue]) -> CodecResult<()> {
        let paths: Vec<FieldPath> = self.flatten().into_iter().map(|(path, _)| path).collect();
        if paths.len() != values.len() {
            return Err(CodecError::ValueCountMismatch {
                expected: paths.len(),
                actual: values.len(),
            });
        }
        for (path, value) in paths.iter().zip(values) {
            self.set_value(path, value.clone())?;
        }
        Ok(())
    }
}
