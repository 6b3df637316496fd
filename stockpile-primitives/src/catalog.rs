//! Catalog types and the registries that resolve them.
//!
//! Catalog values are plain `const`s grouped under a holder type
//! (`ItemTypes::STONE`, `ContainerTypes::FURNACE`, ...). Each holder also
//! exposes a [`Registry`] built once on first use, mapping the textual id
//! of every constant back to its value.

use std::{
    borrow::Cow,
    fmt::{Debug, Display},
    str::FromStr,
};

use ahash::AHashMap;
use thiserror::Error;

/// A namespaced identifier, e.g. `minecraft:stone`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    namespace: Cow<'static, str>,
    value: Cow<'static, str>,
}

impl ResourceKey {
    pub const MINECRAFT_NAMESPACE: &'static str = "minecraft";
    pub const STOCKPILE_NAMESPACE: &'static str = "stockpile";

    /// Creates a key from static parts.
    pub const fn new_static(namespace: &'static str, value: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            value: Cow::Borrowed(value),
        }
    }

    /// A key in the `minecraft` namespace.
    pub const fn minecraft(value: &'static str) -> Self {
        Self::new_static(Self::MINECRAFT_NAMESPACE, value)
    }

    /// A key in the `stockpile` namespace.
    pub const fn stockpile(value: &'static str) -> Self {
        Self::new_static(Self::STOCKPILE_NAMESPACE, value)
    }

    pub fn new(namespace: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            value: Cow::Owned(value.into()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for ResourceKey {
    type Err = RegistryError;

    /// Parses `namespace:value`. A missing namespace means `minecraft`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, value) = match s.split_once(':') {
            Some((namespace, value)) => (namespace, value),
            None => (Self::MINECRAFT_NAMESPACE, s),
        };
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
        };
        if !valid(namespace) || !valid(value) {
            return Err(RegistryError::MalformedKey(s.to_string()));
        }
        Ok(Self::new(namespace, value))
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

impl Debug for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// A named, interned value used as an identifier.
pub trait CatalogType {
    fn key(&self) -> &ResourceKey;
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("malformed resource key {0:?}")]
    MalformedKey(String),
    #[error("{0} is already registered")]
    Duplicate(ResourceKey),
}
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Maps resource keys to catalog values. Iteration follows registration order.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: AHashMap<ResourceKey, usize>,
    values: Vec<T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Default::default(),
            values: Default::default(),
        }
    }
}

impl<T: CatalogType> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value, failing if its key is taken.
    pub fn register(&mut self, value: T) -> RegistryResult<()> {
        if self.entries.contains_key(value.key()) {
            return Err(RegistryError::Duplicate(value.key().clone()));
        }
        self.insert(value);
        Ok(())
    }

    /// Inserts a value, replacing and returning any previous value with the same key.
    pub fn insert(&mut self, value: T) -> Option<T> {
        match self.entries.get(value.key()) {
            Some(&idx) => Some(std::mem::replace(&mut self.values[idx], value)),
            None => {
                self.entries.insert(value.key().clone(), self.values.len());
                self.values.push(value);
                None
            }
        }
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&T> {
        self.entries.get(key).map(|&idx| &self.values[idx])
    }

    /// Looks up a value by its textual id.
    pub fn lookup(&self, id: &str) -> Option<&T> {
        let key = id.parse::<ResourceKey>().ok()?;
        self.get(&key)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Declares a catalog holder: a set of constants plus a lazily built registry.
macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $holder:ident : $ty:ty {
            $(
                $(#[$doc:meta])*
                $name:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $holder;

        impl $holder {
            $(
                $(#[$doc])*
                pub const $name: $ty = $value;
            )*

            /// Registry of every constant in this catalog.
            pub fn registry() -> &'static $crate::catalog::Registry<$ty> {
                static REGISTRY: std::sync::OnceLock<$crate::catalog::Registry<$ty>> =
                    std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    let mut registry = $crate::catalog::Registry::new();
                    $(
                        registry.insert(Self::$name);
                    )*
                    registry
                })
            }
        }
    };
}
pub(crate) use catalog;
