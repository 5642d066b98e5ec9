use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::listing::MetaField;

/// Properties of the archive as reported by the last listing.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<MetaField, String>,
}

impl Metadata {
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: MetaField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: MetaField, value: String) -> Option<String> {
        self.fields.insert(field, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetaField, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Archive type, e.g. `7z`.
    pub fn archive_type(&self) -> Option<&str> {
        self.get(MetaField::Type)
    }

    pub fn is_solid(&self) -> Option<bool> {
        self.get(MetaField::Solid).map(|value| value == "+")
    }

    pub fn physical_size(&self) -> Option<u64> {
        self.get(MetaField::PhysicalSize)?.parse().ok()
    }
}

impl FromIterator<(MetaField, String)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (MetaField, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
