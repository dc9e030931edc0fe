//! Object stream decoding (`.obj`)
//!
//! The stream is a flat run of 5-word groups `(id, x, y, prop, type)`. A group
//! whose id is 0 marks an empty slot and is skipped.

/// Words per object record
pub const RECORD_WORDS: usize = 5;

/// One placed object exactly as stored in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub prop: i32,
    /// Stored `type` field (0 = object, 1 = unit, 2 = special)
    pub kind: i32,
}

impl RawRecord {
    fn from_group(group: &[i32]) -> Option<Self> {
        match *group {
            [0, ..] => None,
            [id, x, y, prop, kind] => Some(Self {
                id,
                x,
                y,
                prop,
                kind,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for RawRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id={} x={} y={} prop={} type={}",
            self.id, self.x, self.y, self.prop, self.kind
        )
    }
}

/// Decoded object stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObjectStream {
    /// Non-sentinel records in source order
    pub records: Vec<RawRecord>,
    /// Words left over after the last whole group
    pub trailing_words: usize,
}

/// Split object words into records, dropping sentinel groups
///
/// A trailing partial group never becomes a record; its length is reported in
/// [`ObjectStream::trailing_words`] so the caller can surface it.
pub fn decode(words: &[i32]) -> ObjectStream {
    let groups = words.chunks_exact(RECORD_WORDS);
    let trailing_words = groups.remainder().len();
    let records: Vec<RawRecord> = groups.filter_map(RawRecord::from_group).collect();

    tracing::debug!(
        "Decoded {} object records from {} groups",
        records.len(),
        words.len() / RECORD_WORDS
    );

    ObjectStream {
        records,
        trailing_words,
    }
}
