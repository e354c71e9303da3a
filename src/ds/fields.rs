use super::Value;
use std::fmt;

/// An insertion-ordered field map: the decoded form of a JSON object.
///
/// Field order is a public contract of the wire format (a mapped object writes its fields in
/// declaration order with the type tag last), so `Fields` preserves insertion order rather than
/// sorting keys. It is backed by a plain vector: mapped objects have a handful of fields and
/// linear lookup beats hashing at that size.
///
/// [`insert`] on an existing key replaces the value _in place_, keeping the original position.
/// [`remove`] keeps the relative order of the remaining fields.
///
/// # Example
/// ```rust
/// # use tagson::*;
/// let mut fields = Fields::new();
/// fields.insert("a", 1);
/// fields.insert("b", "two");
/// fields.insert("a", 10); // replaces, stays first
///
/// assert_eq!(fields.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(fields.get("a"), Some(&Value::from(10)));
/// ```
///
/// [`insert`]: Fields::insert
/// [`remove`]: Fields::remove
#[derive(Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    /// An empty field map.
    pub const fn new() -> Self {
        Fields(Vec::new())
    }

    /// An empty field map with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Fields(Vec::with_capacity(capacity))
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a field, converting the value with [`IntoValue`](crate::IntoValue).
    ///
    /// If `key` is already present the value is replaced and the field keeps its position,
    /// otherwise the field is appended.
    pub fn insert<K: Into<String>, V: crate::IntoValue>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into_value();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    /// A reference to the value under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// A mutable reference to the value under `key`, if present.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Remove and return the value under `key`. The remaining fields keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Value)>,
        fn(&'a (String, Value)) -> (&'a String, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v); // duplicate keys: last one wins
        }
        fields
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
