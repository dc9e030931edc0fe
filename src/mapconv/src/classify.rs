//! Object classification
//!
//! Records are routed by their `type` field:
//! - `0` - plain object, copied as-is
//! - `1` - unit, copied as-is
//! - `2` - special object, further split by `id` using [`SPECIAL_RULES`]
//!
//! Special objects that render as a fixed atlas tile carry that tile index,
//! and stairs/interactables also carry a short label. Anything outside these
//! rules is [`Classification::Unrecognized`].

use crate::objects::RawRecord;

/// Record `type` for plain objects
pub const TYPE_OBJECT: i32 = 0;
/// Record `type` for units
pub const TYPE_UNIT: i32 = 1;
/// Record `type` for special objects (doors, stairs, ...)
pub const TYPE_SPECIAL: i32 = 2;

/// Document category of a classified record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Object,
    Unit,
    Door,
    Trap,
    Stairs,
    Medal,
    Interactable,
}

impl Category {
    /// All categories in document order
    pub const ALL: [Category; 7] = [
        Category::Object,
        Category::Door,
        Category::Interactable,
        Category::Medal,
        Category::Stairs,
        Category::Trap,
        Category::Unit,
    ];

    /// Default list name in the output document
    pub fn name(self) -> &'static str {
        match self {
            Category::Object => "objects",
            Category::Unit => "units",
            Category::Door => "doors",
            Category::Trap => "traps",
            Category::Stairs => "stairs",
            Category::Medal => "medals",
            Category::Interactable => "interactables",
        }
    }

    /// Whether records in this category carry an atlas `tile`
    pub fn has_tile(self) -> bool {
        matches!(self, Category::Door | Category::Stairs | Category::Interactable)
    }

    /// Whether records in this category carry a `use` label
    pub fn has_label(self) -> bool {
        matches!(self, Category::Stairs | Category::Interactable)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule for one group of special object ids
#[derive(Debug)]
pub struct SpecialRule {
    pub ids: &'static [i32],
    pub category: Category,
    pub tile: Option<i32>,
    pub label: Option<&'static str>,
}

const fn rule(
    ids: &'static [i32],
    category: Category,
    tile: Option<i32>,
    label: Option<&'static str>,
) -> SpecialRule {
    SpecialRule {
        ids,
        category,
        tile,
        label,
    }
}

/// Closed rule table for `type == 2` records
pub static SPECIAL_RULES: [SpecialRule; 11] = [
    rule(&[0, 1, 2], Category::Door, Some(726), None),
    rule(&[7], Category::Door, Some(728), None),
    rule(&[11], Category::Door, Some(730), None),
    rule(&[13], Category::Door, Some(733), None),
    rule(&[3, 4], Category::Trap, None, None),
    rule(&[5], Category::Stairs, Some(232), Some("up")),
    rule(&[6], Category::Stairs, Some(231), Some("down")),
    rule(&[10], Category::Medal, None, None),
    rule(&[8], Category::Interactable, Some(727), Some("Bulletin Board")),
    rule(&[9], Category::Interactable, Some(729), Some("Ballot Box")),
    rule(&[12], Category::Interactable, Some(732), Some("City Board")),
];

/// Look up the rule for a special object id
pub fn special_rule(id: i32) -> Option<&'static SpecialRule> {
    SPECIAL_RULES.iter().find(|rule| rule.ids.contains(&id))
}

/// A record placed in a document category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub prop: i32,
    pub kind: i32,
    /// Atlas tile the object renders as
    pub tile: Option<i32>,
    /// Display label (serialized as `use`)
    pub label: Option<&'static str>,
}

impl ClassifiedRecord {
    fn plain(raw: RawRecord) -> Self {
        Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            prop: raw.prop,
            kind: raw.kind,
            tile: None,
            label: None,
        }
    }

    fn special(raw: RawRecord, rule: &SpecialRule) -> Self {
        Self {
            tile: rule.tile,
            label: rule.label,
            ..Self::plain(raw)
        }
    }
}

/// Outcome of classifying a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Classified(Category, ClassifiedRecord),
    Unrecognized(RawRecord),
}

/// Classify one record against the type and special-id rules
pub fn classify_record(raw: RawRecord) -> Classification {
    match raw.kind {
        TYPE_OBJECT => Classification::Classified(Category::Object, ClassifiedRecord::plain(raw)),
        TYPE_UNIT => Classification::Classified(Category::Unit, ClassifiedRecord::plain(raw)),
        TYPE_SPECIAL => match special_rule(raw.id) {
            Some(rule) => {
                Classification::Classified(rule.category, ClassifiedRecord::special(raw, rule))
            }
            None => Classification::Unrecognized(raw),
        },
        _ => Classification::Unrecognized(raw),
    }
}

/// Records sorted into the seven document categories
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Categories {
    pub objects: Vec<ClassifiedRecord>,
    pub units: Vec<ClassifiedRecord>,
    pub doors: Vec<ClassifiedRecord>,
    pub traps: Vec<ClassifiedRecord>,
    pub stairs: Vec<ClassifiedRecord>,
    pub medals: Vec<ClassifiedRecord>,
    pub interactables: Vec<ClassifiedRecord>,
    /// Records matching no rule, in source order
    pub unrecognized: Vec<RawRecord>,
}

impl Categories {
    /// Records in one category
    pub fn get(&self, category: Category) -> &[ClassifiedRecord] {
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

    fn list_mut(&mut self, category: Category) -> &mut Vec<ClassifiedRecord> {
        match category {
            Category::Object => &mut self.objects,
            Category::Unit => &mut self.units,
            Category::Door => &mut self.doors,
            Category::Trap => &mut self.traps,
            Category::Stairs => &mut self.stairs,
            Category::Medal => &mut self.medals,
            Category::Interactable => &mut self.interactables,
        }
    }

    /// Add a classification result, keeping arrival order per list
    pub fn push(&mut self, classification: Classification) {
        match classification {
            Classification::Classified(category, record) => self.list_mut(category).push(record),
            Classification::Unrecognized(raw) => self.unrecognized.push(raw),
        }
    }

    /// Total records across the seven categories
    pub fn classified_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

/// Classify records in order
pub fn classify<I>(records: I) -> Categories
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut categories = Categories::default();
    for raw in records {
        categories.push(classify_record(raw));
    }
    categories
}
