use std::collections::BTreeMap;

use crate::utils::constants::{EPERSONS_PATH, GROUPS_PATH, ITEMS_PATH};

/// Generic repository object: identifier plus a flat multi-valued attribute
/// map. The nested wire metadata shape never leaves `resource::codec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub display_name: String,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Resource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append one value; multi-valued attributes keep insertion order.
    pub fn push_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .entry(name.to_owned())
            .or_default()
            .push(value.into());
    }

    pub fn set_attribute(&mut self, name: &str, values: Vec<String>) {
        self.attributes.insert(name.to_owned(), values);
    }

    /// Single-valued view for callers: the value when exactly one is present.
    pub fn single(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(values) if values.len() == 1 => values.first().map(String::as_str),
            _ => None,
        }
    }
}

/// One page of a collection response.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Resource>,
    pub has_more: bool,
}

/// The provisioned object classes and their endpoint shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    EPerson,
    Group,
    Item,
}

impl ResourceKind {
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::EPerson => EPERSONS_PATH,
            ResourceKind::Group => GROUPS_PATH,
            ResourceKind::Item => ITEMS_PATH,
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    /// Key under `_embedded` in collection envelopes.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::EPerson => "epersons",
            ResourceKind::Group => "groups",
            ResourceKind::Item => "items",
        }
    }
}
