//! Struct-to-column mapping.
//!
//! A model describes its fields through [`Tagged`] (usually generated with
//! `#[derive(Tagged)]`): every field lists `(tag key, column)` pairs, much like
//! struct tags. A [`Mapper`] reads one tag key, and a [`MapperRegistry`] hands
//! out one shared mapper per tag key.
//!
//! # Example
//! ```ignore
//! use daox::Tagged;
//!
//! #[derive(Tagged)]
//! struct User {
//!     #[daox(db = "id", json = "id")]
//!     id: i64,
//!     #[daox(db = "nickname", json = "name")]
//!     name: String,
//!     #[daox(db = "ctime")]
//!     ctime: i64,
//! }
//!
//! let cols = daox::mapper::columns_for_struct::<User>("db", &["ctime"]);
//! assert_eq!(cols, ["id", "nickname"]);
//! ```

use crate::value::Value;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Tag metadata of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedField {
    /// Rust field name.
    pub name: &'static str,
    /// `(tag key, tag value)` pairs in attribute order.
    pub tags: &'static [(&'static str, &'static str)],
}

impl TaggedField {
    /// The value recorded for `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Schema description of a model type.
pub trait Tagged: 'static {
    /// Fields in declaration order.
    fn tagged_fields() -> &'static [TaggedField];

    /// Current value of the field named `field`.
    fn field_value(&self, field: &str) -> Option<Value>;
}

/// Field → column table of one type under one tag key.
#[derive(Debug)]
struct FieldMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl FieldMap {
    fn compile<T: Tagged>(tag: &str) -> Self {
        let entries = T::tagged_fields()
            .iter()
            .filter_map(|field| match field.tag(tag) {
                Some(column) if !column.is_empty() && column != "-" => Some((field.name, column)),
                _ => None,
            })
            .collect();
        Self { entries }
    }

    fn visible<'a>(&'a self, omit: &'a [&str]) -> impl Iterator<Item = (&'static str, &'static str)> + 'a {
        self.entries
            .iter()
            .copied()
            .filter(move |(_, column)| !omit.contains(column))
    }
}

/// Column mapper for a single tag key, caching compiled field maps per type.
#[derive(Debug)]
pub struct Mapper {
    tag: String,
    types: RwLock<HashMap<TypeId, Arc<FieldMap>>>,
}

impl Mapper {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            types: RwLock::new(HashMap::new()),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn field_map<T: Tagged>(&self) -> Arc<FieldMap> {
        let id = TypeId::of::<T>();
        {
            let types = self.types.read().unwrap_or_else(|e| e.into_inner());
            if let Some(map) = types.get(&id) {
                return map.clone();
            }
        }

        let mut types = self.types.write().unwrap_or_else(|e| e.into_inner());
        types
            .entry(id)
            .or_insert_with(|| {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    target: "daox.mapper",
                    tag = %self.tag,
                    model = std::any::type_name::<T>(),
                    "compiled field map"
                );
                Arc::new(FieldMap::compile::<T>(&self.tag))
            })
            .clone()
    }

    /// Column names of `T` in declaration order, minus `omit`.
    pub fn columns<T: Tagged>(&self, omit: &[&str]) -> Vec<String> {
        self.field_map::<T>()
            .visible(omit)
            .map(|(_, column)| column.to_string())
            .collect()
    }

    /// `(column, value)` pairs of `model`, in the same order as [`Mapper::columns`].
    pub fn values<T: Tagged>(&self, model: &T, omit: &[&str]) -> Vec<(String, Value)> {
        self.field_map::<T>()
            .visible(omit)
            .filter_map(|(field, column)| {
                model
                    .field_value(field)
                    .map(|value| (column.to_string(), value))
            })
            .collect()
    }
}

/// Tag key → [`Mapper`] registry.
///
/// Lookups take a read lock; a missing mapper is created under the write lock
/// with a second check, so racing callers all end up with the same instance.
#[derive(Debug, Default)]
pub struct MapperRegistry {
    mappers: RwLock<HashMap<String, Arc<Mapper>>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapper for `tag`, created on first use.
    pub fn mapper(&self, tag: &str) -> Arc<Mapper> {
        {
            let mappers = self.mappers.read().unwrap_or_else(|e| e.into_inner());
            if let Some(mapper) = mappers.get(tag) {
                return mapper.clone();
            }
        }

        let mut mappers = self.mappers.write().unwrap_or_else(|e| e.into_inner());
        mappers
            .entry(tag.to_string())
            .or_insert_with(|| {
                #[cfg(feature = "tracing")]
                tracing::trace!(target: "daox.mapper", tag, "created mapper");
                Arc::new(Mapper::new(tag))
            })
            .clone()
    }

    /// Number of tag keys with a mapper.
    pub fn len(&self) -> usize {
        self.mappers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shortcut for `self.mapper(tag).columns::<T>(omit)`.
    pub fn columns<T: Tagged>(&self, tag: &str, omit: &[&str]) -> Vec<String> {
        self.mapper(tag).columns::<T>(omit)
    }
}

static DEFAULT_REGISTRY: OnceLock<MapperRegistry> = OnceLock::new();

/// The process-wide registry used by the builders' `struct_columns` methods.
pub fn default_registry() -> &'static MapperRegistry {
    DEFAULT_REGISTRY.get_or_init(MapperRegistry::new)
}

/// Column names of `T` under `tag` through the default registry.
pub fn columns_for_struct<T: Tagged>(tag: &str, omit: &[&str]) -> Vec<String> {
    default_registry().columns::<T>(tag, omit)
}
