//! Argument binding and type compatibility for one candidate variant.
//!
//! The matcher is pure: given a signature and the actual arguments it either
//! produces a complete `Binding` or reports that the variant does not apply.
//! Every internal failure (binding or type check) is absorbed at this
//! boundary and surfaced only as a trace-level event; callers never see more
//! than "no".

use std::fmt;

use tracing::trace;

use crate::signature::{CallArgs, Signature};
use crate::types::{is_compatible, TypeExpr};
use crate::value::Value;

/// The result of successfully binding arguments to a signature: one value
/// per parameter, in declaration order, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub values: Vec<Value>,
    /// Whether each parameter was explicitly supplied by the caller.
    /// Parameters filled from their default are exempt from type checking.
    pub explicit: Vec<bool>,
}

/// Why one variant did not apply. Internal taxonomy only: converted to a
/// plain non-match at the matcher boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MatchFailure {
    TooManyPositional { supplied: usize, declared: usize },
    UnknownKeyword(String),
    DuplicateParam(String),
    MissingParam(String),
    TypeMismatch { param: String, value: Value, declared: TypeExpr },
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchFailure::TooManyPositional { supplied, declared } => {
                write!(f, "{supplied} positional arguments for {declared} parameters")
            }
            MatchFailure::UnknownKeyword(name) => write!(f, "no parameter named '{name}'"),
            MatchFailure::DuplicateParam(name) => {
                write!(f, "parameter '{name}' assigned more than once")
            }
            MatchFailure::MissingParam(name) => {
                write!(f, "required parameter '{name}' not supplied")
            }
            MatchFailure::TypeMismatch { param, value, declared } => {
                write!(f, "value {value} for parameter '{param}' is not {declared}")
            }
        }
    }
}

/// Binds the arguments and checks declared types.
///
/// Positional values fill parameters left to right; keyword values fill by
/// name. An unfilled parameter is satisfied only by its default. A parameter
/// that carries a declared type is checked only when it was explicitly
/// supplied.
pub(crate) fn try_match(sig: &Signature, args: &CallArgs) -> Result<Binding, MatchFailure> {
    let declared = sig.params.len();
    if args.positional.len() > declared {
        return Err(MatchFailure::TooManyPositional {
            supplied: args.positional.len(),
            declared,
        });
    }

    let mut slots: Vec<Option<Value>> = vec![None; declared];
    for (i, value) in args.positional.iter().enumerate() {
        slots[i] = Some(value.clone());
    }
    for (name, value) in &args.keyword {
        let index = sig
            .params
            .iter()
            .position(|p| p.name == *name)
            .ok_or_else(|| MatchFailure::UnknownKeyword(name.clone()))?;
        if slots[index].is_some() {
            return Err(MatchFailure::DuplicateParam(name.clone()));
        }
        slots[index] = Some(value.clone());
    }

    let mut values = Vec::with_capacity(declared);
    let mut explicit = Vec::with_capacity(declared);
    for (slot, param) in slots.into_iter().zip(&sig.params) {
        match slot {
            Some(value) => {
                values.push(value);
                explicit.push(true);
            }
            None => match &param.default {
                Some(default) => {
                    values.push(default.clone());
                    explicit.push(false);
                }
                None => return Err(MatchFailure::MissingParam(param.name.clone())),
            },
        }
    }

    for ((param, value), supplied) in sig.params.iter().zip(&values).zip(&explicit) {
        if !supplied {
            continue;
        }
        if let Some(ty) = &param.ty {
            if !is_compatible(value, ty) {
                return Err(MatchFailure::TypeMismatch {
                    param: param.name.clone(),
                    value: value.clone(),
                    declared: ty.clone(),
                });
            }
        }
    }

    Ok(Binding { values, explicit })
}

/// Returns the binding if the variant applies to the arguments.
///
/// This is the absorbing boundary: any binding or type-check failure becomes
/// `None`.
pub fn matches(sig: &Signature, args: &CallArgs) -> Option<Binding> {
    match try_match(sig, args) {
        Ok(binding) => Some(binding),
        Err(reason) => {
            trace!(%reason, signature = %sig, "variant does not apply");
            None
        }
    }
}

/// Boolean applicability verdict.
pub fn applies(sig: &Signature, args: &CallArgs) -> bool {
    matches(sig, args).is_some()
}
