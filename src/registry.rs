//! The variant registry: identities, keys, and ordered variant storage.
//!
//! Each identity owns an ordered collection of variants, iterated in first
//! registration order. Re-registering an existing key replaces that variant
//! in place without moving it; `IndexMap` gives exactly those semantics.
//!
//! Reads take a snapshot under a read lock, so dispatch never observes a
//! half-mutated collection and never holds the lock while matching or
//! running a variant body.

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::signature::Signature;
use crate::value::Value;

/// The namespace-qualified name variants are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub namespace: String,
    pub name: String,
}

impl Identity {
    /// Creates an identity from a namespace and a shared name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Registration key for one variant. Preserves insertion order and detects
/// redefinition; re-registering an existing key replaces in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantKey(pub u64);

/// A variant body: called with the bound argument vector, one value per
/// parameter, defaults filled.
pub type VariantBody = Arc<dyn Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync>;

/// One registered callable variant.
#[derive(Clone)]
pub struct Variant {
    pub identity: Identity,
    pub key: VariantKey,
    pub signature: Signature,
    pub body: VariantBody,
}

impl Variant {
    /// Creates a variant from its identity, key, signature, and body.
    pub fn new(
        identity: Identity,
        key: VariantKey,
        signature: Signature,
        body: impl Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            identity,
            key,
            signature,
            body: Arc::new(body),
        }
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("identity", &self.identity)
            .field("key", &self.key)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Process-wide (or explicitly threaded) store of overload variants.
///
/// Cheaply cloneable handle; clones share the same underlying table. Readers
/// run concurrently; writers serialize on the write lock.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<FxHashMap<Identity, IndexMap<u64, Arc<Variant>>>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry backing the decorator-style entry
    /// points.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Registers a variant under its identity.
    ///
    /// A new key appends to the identity's collection; an existing key
    /// replaces the stored variant at its original position.
    pub fn register(&self, variant: Variant) {
        let identity = variant.identity.clone();
        let key = variant.key;
        let mut table = self.inner.write().expect("registry lock poisoned");
        let replaced = table
            .entry(identity.clone())
            .or_default()
            .insert(key.0, Arc::new(variant))
            .is_some();
        debug!(%identity, key = key.0, replaced, "registered overload variant");
    }

    /// Returns the variants for an identity, in first registration order.
    ///
    /// Unknown identities yield an empty vector, never an error.
    pub fn lookup_all(&self, identity: &Identity) -> Vec<Arc<Variant>> {
        let table = self.inner.read().expect("registry lock poisoned");
        table
            .get(identity)
            .map(|variants| variants.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Param;

    fn constant(identity: &Identity, key: u64, result: i64) -> Variant {
        Variant::new(
            identity.clone(),
            VariantKey(key),
            Signature::new().param(Param::new("x")),
            move |_| Ok(Value::Int(result)),
        )
    }

    #[test]
    fn unknown_identity_is_empty() {
        let registry = Registry::new();
        assert!(registry.lookup_all(&Identity::new("m", "f")).is_empty());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let registry = Registry::new();
        let identity = Identity::new("m", "f");
        registry.register(constant(&identity, 30, 1));
        registry.register(constant(&identity, 10, 2));
        registry.register(constant(&identity, 20, 3));
        let keys: Vec<u64> = registry
            .lookup_all(&identity)
            .iter()
            .map(|v| v.key.0)
            .collect();
        assert_eq!(keys, vec![30, 10, 20]);
    }

    #[test]
    fn reregistering_a_key_replaces_in_place() {
        let registry = Registry::new();
        let identity = Identity::new("m", "f");
        registry.register(constant(&identity, 1, 10));
        registry.register(constant(&identity, 2, 20));
        registry.register(constant(&identity, 3, 30));
        registry.register(constant(&identity, 2, 99));

        let variants = registry.lookup_all(&identity);
        let keys: Vec<u64> = variants.iter().map(|v| v.key.0).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        let replaced = (variants[1].body)(vec![]).unwrap();
        assert_eq!(replaced, Value::Int(99));
    }

    #[test]
    fn identities_are_isolated() {
        let registry = Registry::new();
        let f = Identity::new("m", "f");
        let g = Identity::new("m", "g");
        registry.register(constant(&f, 1, 10));
        assert_eq!(registry.lookup_all(&f).len(), 1);
        assert!(registry.lookup_all(&g).is_empty());
    }
}
