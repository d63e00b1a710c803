//! Declared parameter types and the runtime compatibility checker.
//!
//! A `TypeExpr` is a tagged description of what a parameter accepts: a scalar
//! tag, a parameterized container, or a user-defined record shape. The
//! checker is a recursive structural walk over (value, type) pairs. It only
//! ever answers yes or no; nothing here is a general type system, and return
//! types are never consulted anywhere in the crate.

use std::fmt;

use crate::value::Value;

/// A declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Accepts any value.
    Any,
    Bool,
    Int,
    Float,
    Str,
    /// An ordered sequence whose every element must satisfy the inner type.
    List(Box<TypeExpr>),
    /// A user-defined composite, matched by record type name.
    Record(String),
}

impl TypeExpr {
    /// Shorthand for `List` of the given element type.
    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List(Box::new(element))
    }

    /// Shorthand for a named record type.
    pub fn record(name: impl Into<String>) -> Self {
        TypeExpr::Record(name.into())
    }
}

/// Checks whether a runtime value satisfies a declared type.
///
/// Scalars match by tag, with one widening rule: an `Int` value satisfies a
/// declared `Float`, as in the original numeric tower. Lists are checked
/// elementwise (an empty list satisfies any element type). Records match by
/// type name.
pub fn is_compatible(value: &Value, ty: &TypeExpr) -> bool {
    match (value, ty) {
        (_, TypeExpr::Any) => true,
        (Value::Bool(_), TypeExpr::Bool) => true,
        (Value::Int(_), TypeExpr::Int) => true,
        (Value::Float(_), TypeExpr::Float) => true,
        // Numeric widening: int is acceptable where float is declared.
        (Value::Int(_), TypeExpr::Float) => true,
        (Value::Str(_), TypeExpr::Str) => true,
        (Value::List(items), TypeExpr::List(element)) => {
            items.iter().all(|item| is_compatible(item, element))
        }
        (Value::Record(r), TypeExpr::Record(name)) => r.type_name == *name,
        _ => false,
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Any => write!(f, "any"),
            TypeExpr::Bool => write!(f, "bool"),
            TypeExpr::Int => write!(f, "int"),
            TypeExpr::Float => write!(f, "float"),
            TypeExpr::Str => write!(f, "str"),
            TypeExpr::List(element) => write!(f, "list[{element}]"),
            TypeExpr::Record(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    #[test]
    fn scalars_match_by_tag() {
        assert!(is_compatible(&Value::Int(1), &TypeExpr::Int));
        assert!(is_compatible(&Value::Float(1.5), &TypeExpr::Float));
        assert!(is_compatible(&Value::Str("x".into()), &TypeExpr::Str));
        assert!(!is_compatible(&Value::Str("x".into()), &TypeExpr::Int));
        assert!(!is_compatible(&Value::Float(1.5), &TypeExpr::Int));
    }

    #[test]
    fn int_widens_to_float_but_not_back() {
        assert!(is_compatible(&Value::Int(1), &TypeExpr::Float));
        assert!(!is_compatible(&Value::Float(1.0), &TypeExpr::Int));
    }

    #[test]
    fn any_accepts_everything() {
        assert!(is_compatible(&Value::Bool(true), &TypeExpr::Any));
        assert!(is_compatible(&Value::List(vec![]), &TypeExpr::Any));
    }

    #[test]
    fn lists_check_every_element() {
        let ints = Value::List(vec![Value::Int(1), Value::Int(2)]);
        let mixed = Value::List(vec![Value::Int(1), Value::Str("x".into())]);
        assert!(is_compatible(&ints, &TypeExpr::list(TypeExpr::Int)));
        assert!(!is_compatible(&mixed, &TypeExpr::list(TypeExpr::Int)));
        // Empty list satisfies any element type.
        assert!(is_compatible(&Value::List(vec![]), &TypeExpr::list(TypeExpr::Str)));
    }

    #[test]
    fn nested_lists_recurse() {
        let grid = Value::List(vec![
            Value::List(vec![Value::Int(1)]),
            Value::List(vec![Value::Int(2), Value::Int(3)]),
        ]);
        assert!(is_compatible(&grid, &TypeExpr::list(TypeExpr::list(TypeExpr::Int))));
        assert!(!is_compatible(&grid, &TypeExpr::list(TypeExpr::list(TypeExpr::Str))));
    }

    #[test]
    fn records_match_by_type_name() {
        let point = Value::Record(Record::new("Point", vec![("x".to_string(), Value::Int(1))]));
        assert!(is_compatible(&point, &TypeExpr::record("Point")));
        assert!(!is_compatible(&point, &TypeExpr::record("Circle")));
        assert!(!is_compatible(&Value::Int(1), &TypeExpr::record("Point")));
    }

    #[test]
    fn display_renders_type_expressions() {
        assert_eq!(TypeExpr::list(TypeExpr::Int).to_string(), "list[int]");
        assert_eq!(TypeExpr::record("Point").to_string(), "Point");
        assert_eq!(TypeExpr::Any.to_string(), "any");
    }
}
