//! Output field names
//!
//! Every key the document serializes under can be renamed. The shape mirrors
//! the `keyNames` block of the converter's settings file, so existing settings
//! deserialize unchanged; any key left out keeps its default name.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::classify::Category;

/// Field names for one category's records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordKeys {
    pub id: String,
    pub x: String,
    pub y: String,
    pub prop: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tile: String,
    #[serde(rename = "use")]
    pub label: String,
}

impl Default for RecordKeys {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            x: "x".to_string(),
            y: "y".to_string(),
            prop: "prop".to_string(),
            kind: "type".to_string(),
            tile: "tile".to_string(),
            label: "use".to_string(),
        }
    }
}

impl RecordKeys {
    /// Names written for a record of `category`
    fn names(&self, category: Category) -> Vec<&str> {
        let mut names = vec![
            self.id.as_str(),
            self.x.as_str(),
            self.y.as_str(),
            self.prop.as_str(),
            self.kind.as_str(),
        ];
        if category.has_tile() {
            names.push(&self.tile);
        }
        if category.has_label() {
            names.push(&self.label);
        }
        names
    }
}

/// Top-level and per-category field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyNames {
    pub width: String,
    pub height: String,
    pub depth: String,
    pub tiles: String,
    pub tileset: String,

    pub objects: String,
    pub object_list: RecordKeys,
    pub units: String,
    pub unit_list: RecordKeys,
    pub doors: String,
    pub doors_list: RecordKeys,
    pub traps: String,
    pub traps_list: RecordKeys,
    pub stairs: String,
    pub stairs_list: RecordKeys,
    pub medals: String,
    pub medals_list: RecordKeys,
    pub interactables: String,
    pub interactables_list: RecordKeys,
}

impl Default for KeyNames {
    fn default() -> Self {
        Self {
            width: "width".to_string(),
            height: "height".to_string(),
            depth: "depth".to_string(),
            tiles: "tiles".to_string(),
            tileset: "tileset".to_string(),
            objects: Category::Object.name().to_string(),
            object_list: RecordKeys::default(),
            units: Category::Unit.name().to_string(),
            unit_list: RecordKeys::default(),
            doors: Category::Door.name().to_string(),
            doors_list: RecordKeys::default(),
            traps: Category::Trap.name().to_string(),
            traps_list: RecordKeys::default(),
            stairs: Category::Stairs.name().to_string(),
            stairs_list: RecordKeys::default(),
            medals: Category::Medal.name().to_string(),
            medals_list: RecordKeys::default(),
            interactables: Category::Interactable.name().to_string(),
            interactables_list: RecordKeys::default(),
        }
    }
}

impl KeyNames {
    /// Name of a category's list in the document
    pub fn list(&self, category: Category) -> &str {
        match category {
            Category::Object => &self.objects,
            Category::Unit => &self.units,
            Category::Door => &self.doors,
            Category::Trap => &self.traps,
            Category::Stairs => &self.stairs,
            Category::Medal => &self.medals,
            Category::Interactable => &self.interactables,
        }
    }

    /// Field names for a category's records
    pub fn record(&self, category: Category) -> &RecordKeys {
        match category {
            Category::Object => &self.object_list,
            Category::Unit => &self.unit_list,
            Category::Door => &self.doors_list,
            Category::Trap => &self.traps_list,
            Category::Stairs => &self.stairs_list,
            Category::Medal => &self.medals_list,
            Category::Interactable => &self.interactables_list,
        }
    }

    /// Names used more than once within the same object
    ///
    /// Only fields a category actually writes are compared, so doors may reuse
    /// the `use` name and plain objects both `tile` and `use`. Duplicates would
    /// make the serialized document lose fields, so callers should reject a
    /// configuration where this is non-empty.
    pub fn conflicts(&self) -> Vec<String> {
        let mut conflicts = Vec::new();

        let top = [
            self.width.as_str(),
            self.height.as_str(),
            self.depth.as_str(),
            self.tiles.as_str(),
            self.tileset.as_str(),
        ]
        .into_iter()
        .chain(Category::ALL.iter().map(|c| self.list(*c)));
        collect_duplicates(top, &mut conflicts);

        for category in Category::ALL {
            collect_duplicates(self.record(category).names(category), &mut conflicts);
        }

        conflicts
    }
}

fn collect_duplicates<'a>(names: impl IntoIterator<Item = &'a str>, out: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
}
