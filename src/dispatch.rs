//! First-match dispatch over the registered variants of an identity.
//!
//! The dispatcher is a single linear scan in registration order: the first
//! variant the matcher accepts is invoked with its bound arguments and its
//! result (or its own error) is returned verbatim. Only total exhaustion is
//! an error of this subsystem.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::matcher;
use crate::registry::{Identity, Registry, Variant};
use crate::signature::CallArgs;
use crate::value::Value;

/// A dispatch failure.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered variant accepted the arguments.
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),
    /// The matched variant's body failed; passed through unchanged.
    #[error(transparent)]
    Body(#[from] anyhow::Error),
}

/// Raised only after every candidate was tried and none matched.
///
/// Carries the literal supplied arguments and the printable signature of
/// every candidate in registration order.
#[derive(Debug)]
pub struct NoMatchError {
    pub identity: Identity,
    pub args: CallArgs,
    pub signatures: Vec<String>,
}

impl std::error::Error for NoMatchError {}

impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the arguments ({}) match none of the overloads of `{}`:",
            self.args, self.identity
        )?;
        for (i, signature) in self.signatures.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, signature)?;
        }
        Ok(())
    }
}

/// Returns the candidate variants for an identity, in registration order.
pub fn candidates(registry: &Registry, identity: &Identity) -> Vec<Arc<Variant>> {
    registry.lookup_all(identity)
}

/// Dispatches a call: scans the candidates in order and invokes the first
/// one whose parameters accept the arguments.
///
/// The matched body's result is returned verbatim; its error propagates
/// unchanged through [`DispatchError::Body`]. If no candidate matches, the
/// single user-visible [`NoMatchError`] is returned.
pub fn invoke(
    registry: &Registry,
    identity: &Identity,
    args: CallArgs,
) -> Result<Value, DispatchError> {
    let variants = candidates(registry, identity);
    for variant in &variants {
        if let Some(binding) = matcher::matches(&variant.signature, &args) {
            debug!(%identity, key = variant.key.0, "dispatching to overload variant");
            return (variant.body)(binding.values).map_err(DispatchError::Body);
        }
    }
    debug!(%identity, candidates = variants.len(), "no overload variant matched");
    Err(DispatchError::NoMatch(NoMatchError {
        identity: identity.clone(),
        args,
        signatures: variants.iter().map(|v| v.signature.to_string()).collect(),
    }))
}

/// The dispatching wrapper returned by registration.
///
/// Holds a registry handle plus an identity and performs the full scan on
/// every call, so variants registered after the wrapper was created are
/// still candidates.
#[derive(Clone)]
pub struct Overload {
    registry: Registry,
    identity: Identity,
}

impl Overload {
    /// Registers a variant and returns the dispatching wrapper for its
    /// identity.
    pub fn register(registry: &Registry, variant: Variant) -> Overload {
        let identity = variant.identity.clone();
        registry.register(variant);
        Overload {
            registry: registry.clone(),
            identity,
        }
    }

    /// The identity this wrapper dispatches on.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Dispatches a call against the current registry state.
    pub fn call(&self, args: CallArgs) -> Result<Value, DispatchError> {
        invoke(&self.registry, &self.identity, args)
    }
}
