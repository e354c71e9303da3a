use super::{ConstructionError, Mapped};
use crate::ds::Fields;
use crate::fmt::EncodeError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The encode half of a mapper entry: flatten a mapped object into its wire fields.
pub type EncodeFn = Box<dyn Fn(&dyn Mapped) -> Result<Fields, EncodeError> + Send + Sync>;

/// The decode half of a mapper entry: rebuild a mapped object from its wire fields.
pub type DecodeFn = Box<dyn Fn(Fields) -> Result<Box<dyn Mapped>, ConstructionError> + Send + Sync>;

struct MapperEntry {
    encode: EncodeFn,
    decode: DecodeFn,
}

/// The mapper store consulted during encoding and decoding, keyed by type identifier.
///
/// Registries are plain values passed explicitly to [`to_json`] and [`from_json`]; there is no
/// global registry. Registration is first-wins and entries are never removed, so decode behavior
/// for an identifier cannot change underneath concurrent readers of a [`SharedRegistry`].
///
/// [`to_json`]: crate::fmt::to_json
/// [`from_json`]: crate::parse::from_json
#[derive(Default)]
pub struct MapperRegistry {
    mappers: HashMap<String, MapperEntry>,
}

impl MapperRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapper under `ident`.
    ///
    /// Returns `true` if the mapper was installed. If a mapper already exists for `ident` the
    /// call is a silent no-op and returns `false`; the first registration wins.
    pub fn register<I: Into<String>>(&mut self, ident: I, encode: EncodeFn, decode: DecodeFn) -> bool {
        match self.mappers.entry(ident.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(MapperEntry { encode, decode });
                true
            }
        }
    }

    /// Whether a mapper is registered for `ident`.
    pub fn contains(&self, ident: &str) -> bool {
        self.mappers.contains_key(ident)
    }

    /// The encode function registered for `ident`, if any.
    pub fn encoder(&self, ident: &str) -> Option<&EncodeFn> {
        self.mappers.get(ident).map(|e| &e.encode)
    }

    /// The decode function registered for `ident`, if any.
    pub fn decoder(&self, ident: &str) -> Option<&DecodeFn> {
        self.mappers.get(ident).map(|e| &e.decode)
    }

    /// The number of registered mappers.
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Whether no mappers are registered.
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Iterate over the registered type identifiers, in no particular order.
    pub fn idents(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(|k| k.as_str())
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.idents()).finish()
    }
}

/// A clonable, thread-shared [`MapperRegistry`].
///
/// Clones share the same underlying registry. Lock poisoning is recovered from rather than
/// propagated: registry state is a monotonically growing map, so a panic mid-write cannot leave
/// an entry half-installed in a way readers could observe.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    internal: Arc<RwLock<MapperRegistry>>,
}

impl SharedRegistry {
    /// A new shared registry wrapping an empty [`MapperRegistry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the registry for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, MapperRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the registry for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, MapperRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<MapperRegistry> for SharedRegistry {
    fn from(registry: MapperRegistry) -> Self {
        SharedRegistry {
            internal: Arc::new(RwLock::new(registry)),
        }
    }
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRegistry").field(&*self.read()).finish()
    }
}
