use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Derives the canonical record id from the owning container and item name.
///
/// Pure and total; every mutation that touches `container` or `name` must
/// re-derive the id through this function.
pub fn derive_id(container: &str, name: &str) -> String {
    format!("{container}-{name}")
}

/// One row of the grid: an item, its owning container, and its single
/// outgoing link.
///
/// Serde names follow the external tabular/delta contract (`linkTargetId`,
/// `containerInfo`, ...). The `id` field is derived state: it is serialized
/// for consumers but re-derived rather than trusted on the way in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Record {
    pub container: String,
    pub name: String,
    pub id: String,
    #[serde(rename = "linkTargetId")]
    pub link_target: String,
    #[serde(rename = "linkLabel")]
    pub link_label: String,
    #[serde(rename = "linkVisible")]
    pub link_visible: bool,
    #[serde(rename = "nodeVisible")]
    pub node_visible: bool,
    #[serde(rename = "containerInfo")]
    pub container_note: String,
    #[serde(rename = "itemInfo")]
    pub item_note: String,
    #[serde(rename = "linkInfo")]
    pub link_note: String,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            container: String::new(),
            name: String::new(),
            id: String::new(),
            link_target: String::new(),
            link_label: String::new(),
            link_visible: true,
            node_visible: true,
            container_note: String::new(),
            item_note: String::new(),
            link_note: String::new(),
        }
    }
}

impl Record {
    /// New record with derived id and default visibility flags.
    pub fn new(
        container: impl Into<String>,
        name: impl Into<String>,
        link_target: impl Into<String>,
        link_label: impl Into<String>,
    ) -> Self {
        let container = container.into();
        let name = name.into();
        let id = derive_id(&container, &name);
        Self {
            container,
            name,
            id,
            link_target: link_target.into(),
            link_label: link_label.into(),
            ..Self::default()
        }
    }

    /// Recomputes `id` from the current `container` and `name`.
    pub fn refresh_id(&mut self) {
        self.id = derive_id(&self.container, &self.name);
    }

    pub fn has_link(&self) -> bool {
        !self.link_target.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_id_concatenates_with_dash() {
        assert_eq!(derive_id("Region", "Box"), "Region-Box");
        assert_eq!(derive_id("", ""), "-");
    }

    #[test]
    fn new_record_derives_id_and_defaults_flags() {
        let record = Record::new("R", "A", "", "");
        assert_eq!(record.id, "R-A");
        assert!(record.link_visible);
        assert!(record.node_visible);
        assert!(!record.has_link());
    }

    #[test]
    fn refresh_id_tracks_field_edits() {
        let mut record = Record::new("R", "A", "", "");
        record.name = "B".into();
        record.refresh_id();
        assert_eq!(record.id, "R-B");
    }
}
