//! Map document assembly and serialization
//!
//! [`MapDocument`] keeps a fixed, typed shape. Field names are only applied
//! when serializing, through [`MapDocument::keyed`].

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::classify::{Categories, Category, ClassifiedRecord};
use crate::index::Dimensions;
use crate::keys::{KeyNames, RecordKeys};

/// One decoded map
///
/// `tileset` is supplied by the caller: the binary files carry no tileset
/// identifier, so it cannot be recovered from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDocument {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    /// First layer tile ids, row-major, `width * height` long
    pub tiles: Vec<i32>,
    pub tileset: String,
    pub objects: Vec<ClassifiedRecord>,
    pub units: Vec<ClassifiedRecord>,
    pub doors: Vec<ClassifiedRecord>,
    pub traps: Vec<ClassifiedRecord>,
    pub stairs: Vec<ClassifiedRecord>,
    pub medals: Vec<ClassifiedRecord>,
    pub interactables: Vec<ClassifiedRecord>,
}

/// Merge decoded parts into a document
///
/// Unrecognized records in `categories` are not part of the document and are
/// discarded here; report them before assembling.
pub fn assemble(
    dims: Dimensions,
    tiles: Vec<i32>,
    categories: Categories,
    tileset: impl Into<String>,
) -> MapDocument {
    let Categories {
        objects,
        units,
        doors,
        traps,
        stairs,
        medals,
        interactables,
        unrecognized: _,
    } = categories;

    MapDocument {
        width: dims.width,
        height: dims.height,
        depth: dims.depth,
        tiles,
        tileset: tileset.into(),
        objects,
        units,
        doors,
        traps,
        stairs,
        medals,
        interactables,
    }
}

impl MapDocument {
    /// Records in one category
    pub fn category(&self, category: Category) -> &[ClassifiedRecord] {
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

    /// View that serializes with the given field names
    pub fn keyed<'a>(&'a self, keys: &'a KeyNames) -> KeyedDocument<'a> {
        KeyedDocument {
            document: self,
            keys,
        }
    }
}

/// A [`MapDocument`] paired with its output field names
#[derive(Debug, Clone, Copy)]
pub struct KeyedDocument<'a> {
    document: &'a MapDocument,
    keys: &'a KeyNames,
}

impl Serialize for KeyedDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let doc = self.document;
        let keys = self.keys;

        let mut map = serializer.serialize_map(Some(5 + Category::ALL.len()))?;
        map.serialize_entry(&keys.width, &doc.width)?;
        map.serialize_entry(&keys.height, &doc.height)?;
        map.serialize_entry(&keys.depth, &doc.depth)?;
        map.serialize_entry(&keys.tiles, &doc.tiles)?;
        for category in Category::ALL {
            let list = KeyedList {
                records: doc.category(category),
                keys: keys.record(category),
            };
            map.serialize_entry(keys.list(category), &list)?;
        }
        map.serialize_entry(&keys.tileset, &doc.tileset)?;
        map.end()
    }
}

struct KeyedList<'a> {
    records: &'a [ClassifiedRecord],
    keys: &'a RecordKeys,
}

impl Serialize for KeyedList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in self.records {
            seq.serialize_element(&KeyedRecord {
                record,
                keys: self.keys,
            })?;
        }
        seq.end()
    }
}

struct KeyedRecord<'a> {
    record: &'a ClassifiedRecord,
    keys: &'a RecordKeys,
}

impl Serialize for KeyedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (record, keys) = (self.record, self.keys);
        let len = 5 + usize::from(record.tile.is_some()) + usize::from(record.label.is_some());

        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(&keys.id, &record.id)?;
        map.serialize_entry(&keys.x, &record.x)?;
        map.serialize_entry(&keys.y, &record.y)?;
        map.serialize_entry(&keys.prop, &record.prop)?;
        map.serialize_entry(&keys.kind, &record.kind)?;
        if let Some(tile) = record.tile {
            map.serialize_entry(&keys.tile, &tile)?;
        }
        if let Some(label) = record.label {
            map.serialize_entry(&keys.label, label)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::objects::RawRecord;
    use serde_json::{json, Value};

    fn sample() -> MapDocument {
        let records = [
            RawRecord {
                id: 9,
                x: 3,
                y: 4,
                prop: 0,
                kind: 2,
            },
            RawRecord {
                id: 12,
                x: 1,
                y: 1,
                prop: 5,
                kind: 1,
            },
            RawRecord {
                id: 50,
                x: 0,
                y: 0,
                prop: 0,
                kind: 2,
            },
        ];
        let dims = Dimensions {
            width: 2,
            height: 1,
            depth: 1,
        };
        assemble(dims, vec![7, 8], classify(records), "tilemap1")
    }

    #[test]
    fn test_assemble_drops_unrecognized() {
        let doc = sample();
        assert_eq!(doc.interactables.len(), 1);
        assert_eq!(doc.units.len(), 1);
        let total: usize = Category::ALL.iter().map(|c| doc.category(*c).len()).sum();
        assert_eq!(total, 2);
        assert_eq!(doc.tileset, "tilemap1");
    }

    #[test]
    fn test_serialize_default_keys() {
        let doc = sample();
        let keys = KeyNames::default();
        let value = serde_json::to_value(doc.keyed(&keys)).unwrap();

        assert_eq!(
            value,
            json!({
                "width": 2,
                "height": 1,
                "depth": 1,
                "tiles": [7, 8],
                "objects": [],
                "doors": [],
                "interactables": [
                    { "id": 9, "x": 3, "y": 4, "prop": 0, "type": 2, "tile": 729, "use": "Ballot Box" }
                ],
                "medals": [],
                "stairs": [],
                "traps": [],
                "units": [
                    { "id": 12, "x": 1, "y": 1, "prop": 5, "type": 1 }
                ],
                "tileset": "tilemap1"
            })
        );
    }

    #[test]
    fn test_serialize_remapped_keys() {
        let doc = sample();
        let mut keys = KeyNames::default();
        keys.tiles = "data".to_string();
        keys.tileset = "atlas".to_string();
        keys.interactables = "usables".to_string();
        keys.interactables_list.label = "kind".to_string();
        keys.interactables_list.kind = "category".to_string();

        let value = serde_json::to_value(doc.keyed(&keys)).unwrap();
        assert_eq!(value["data"], json!([7, 8]));
        assert_eq!(value["atlas"], json!("tilemap1"));
        assert!(value.get("tiles").is_none());
        assert!(value.get("interactables").is_none());

        let usable = &value["usables"][0];
        assert_eq!(usable["kind"], json!("Ballot Box"));
        assert_eq!(usable["category"], json!(2));
        assert!(usable.get("use").is_none());

        // Other categories keep their own key maps
        assert_eq!(value["units"][0]["type"], json!(1));
    }

    #[test]
    fn test_serialize_key_order() {
        let doc = sample();
        let keys = KeyNames::default();
        let text = serde_json::to_string(&doc.keyed(&keys)).unwrap();
        let order: Vec<usize> = [
            "\"width\"",
            "\"height\"",
            "\"depth\"",
            "\"tiles\"",
            "\"objects\"",
            "\"doors\"",
            "\"interactables\"",
            "\"medals\"",
            "\"stairs\"",
            "\"traps\"",
            "\"units\"",
            "\"tileset\"",
        ]
        .iter()
        .map(|k| text.find(k).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{text}");

        let _: Value = serde_json::from_str(&text).unwrap();
    }
}
