//! Runtime ad hoc overload dispatch.
//!
//! Several callables share one name but differ in parameter shape; each is
//! registered as a *variant* under a common identity. Calling the identity
//! scans the variants in registration order and runs the first one whose
//! parameters accept the supplied arguments in count/keyword and whose
//! declared parameter types are satisfied by the runtime values. If none
//! accepts, the call fails with a diagnostic listing every candidate
//! signature.
//!
//! Dispatch is deterministic first-match-wins over a stable order: ties go
//! to the earliest-registered variant, and re-registering an existing key
//! replaces that variant in place without reordering.
//!
//! ```
//! use polycall::{CallArgs, Identity, Param, Registry, Signature, TypeExpr, Value, Variant, VariantKey};
//!
//! let registry = Registry::new();
//! let identity = Identity::new("demo", "describe");
//! registry.register(Variant::new(
//!     identity.clone(),
//!     VariantKey(1),
//!     Signature::new().param(Param::typed("n", TypeExpr::Int)),
//!     |args| Ok(Value::from(format!("int {}", args[0]))),
//! ));
//! registry.register(Variant::new(
//!     identity.clone(),
//!     VariantKey(2),
//!     Signature::new().param(Param::typed("s", TypeExpr::Str)),
//!     |args| Ok(Value::from(format!("str {}", args[0]))),
//! ));
//!
//! let out = polycall::invoke(&registry, &identity, CallArgs::new().pos("hi")).unwrap();
//! assert_eq!(out, Value::from("str 'hi'"));
//! ```

pub mod dispatch;
pub mod matcher;
pub mod registry;
pub mod signature;
pub mod types;
pub mod value;

use std::sync::Arc;

pub use dispatch::{candidates, invoke, DispatchError, NoMatchError, Overload};
pub use registry::{Identity, Registry, Variant, VariantBody, VariantKey};
pub use signature::{CallArgs, Param, Signature};
pub use types::{is_compatible, TypeExpr};
pub use value::{Record, Value};

/// Registers a variant in the process-wide registry and returns the
/// dispatching wrapper for its identity.
pub fn register_overload(variant: Variant) -> Overload {
    Overload::register(Registry::global(), variant)
}

/// Returns the variants registered for an identity in the process-wide
/// registry, in registration order. Empty for an unknown identity.
pub fn get_overloads(identity: &Identity) -> Vec<Arc<Variant>> {
    Registry::global().lookup_all(identity)
}
