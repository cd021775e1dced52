use std::fmt::{Display, Formatter};

use super::Record;

/// A generic `{ key, fields }` record.
///
/// The payload is opaque to the index and never takes part in comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyedRecord<K, V> {
    key: K,
    fields: V,
}

impl<K: Ord, V> KeyedRecord<K, V> {
    pub fn new(key: K, fields: V) -> Self {
        KeyedRecord { key, fields }
    }

    pub fn fields(&self) -> &V {
        &self.fields
    }

    /// Splits the record back into its key and payload.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.fields)
    }
}

impl<K: Ord, V> Record for KeyedRecord<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Display, V: Display> Display for KeyedRecord<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.key, self.fields)
    }
}
