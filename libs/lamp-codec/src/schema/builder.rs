//! Sequential schema construction. Every call appends one leaf and assigns
//! the next field index, so insertion order is encoding order.

use config::constants::VERSION_BITS;

use super::selectors::{code_for, Category};
use super::VERSION_PATH;
use crate::error::CodecResult;
use crate::range::{DataRange, DataValue, FieldDescriptor};
use crate::tree::{DataEntry, DataTree, FieldPath};

pub(crate) struct SchemaBuilder {
    tree: DataTree,
    next_index: u32,
}

impl SchemaBuilder {
    pub(crate) fn new() -> Self {
        Self {
            tree: DataTree::default(),
            next_index: 0,
        }
    }

    fn push(&mut self, path: &str, range: DataRange, value: DataValue) -> CodecResult<&mut Self> {
        let path = FieldPath::from(path);
        let name = path.leaf_name().unwrap_or_default().to_string();
        let descriptor = FieldDescriptor::new(name, self.next_index, range);
        self.tree.insert(&path, DataEntry::new(descriptor, value))?;
        self.next_index += 1;
        Ok(self)
    }

    pub(crate) fn version(&mut self, version: u32) -> CodecResult<&mut Self> {
        self.push(
            VERSION_PATH,
            DataRange::version(VERSION_BITS)?,
            DataValue::Version(version),
        )
    }

    /// Integer selector spanning every category of `version`.
    pub(crate) fn selector<C: Category>(
        &mut self,
        path: &'static str,
        category: C,
        version: u32,
    ) -> CodecResult<&mut Self> {
        let code = code_for(category, path, version)?;
        let last = C::available(version).len().saturating_sub(1);
        self.push(path, DataRange::int(0.0, last as f64)?, DataValue::Int(code))
    }

    pub(crate) fn int(&mut self, path: &str, min: i64, max: i64, default: i64) -> CodecResult<&mut Self> {
        self.push(
            path,
            DataRange::int(min as f64, max as f64)?,
            DataValue::Int(default),
        )
    }

    pub(crate) fn float(
        &mut self,
        path: &str,
        min: f64,
        max: f64,
        precision: u32,
        default: f64,
    ) -> CodecResult<&mut Self> {
        self.push(
            path,
            DataRange::float(min, max, precision)?,
            DataValue::Float(default),
        )
    }

    pub(crate) fn boolean(&mut self, path: &str, default: bool) -> CodecResult<&mut Self> {
        self.push(path, DataRange::Boolean, DataValue::Boolean(default))
    }

    pub(crate) fn finish(self) -> DataTree {
        self.tree
    }
}
