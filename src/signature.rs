//! Parameter descriptors, signatures, and call arguments.
//!
//! A `Signature` is built once, at registration, and is the only thing the
//! matcher ever reads about a variant. Every parameter is
//! positional-or-keyword. The declared return type is informational: it
//! appears in printed signatures and is never checked.

use std::fmt;

use crate::types::TypeExpr;
use crate::value::Value;

/// One formal parameter of a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// Declared type; `None` means unconstrained.
    pub ty: Option<TypeExpr>,
    /// Default value; `None` means the parameter is required.
    pub default: Option<Value>,
}

impl Param {
    /// Creates a required, unconstrained parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    /// Creates a required parameter with a declared type.
    pub fn typed(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: None,
        }
    }

    /// Attaches a default value, making the parameter optional.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The dispatch-relevant shape of one variant: ordered parameters plus an
/// optional (never checked) return type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub return_ty: Option<TypeExpr>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Declares the return type shown in printed signatures.
    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.return_ty = Some(ty);
        self
    }
}

impl fmt::Display for Signature {
    /// Renders `(a: int, b: int, c: int = 0) -> int`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name)?;
            if let Some(ty) = &param.ty {
                write!(f, ": {ty}")?;
            }
            if let Some(default) = &param.default {
                write!(f, " = {default}")?;
            }
        }
        write!(f, ")")?;
        if let Some(ret) = &self.return_ty {
            write!(f, " -> {ret}")?;
        }
        Ok(())
    }
}

/// The actual arguments of one call: positional values in order plus keyword
/// pairs in the order supplied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keyword: Vec<(String, Value)>,
}

impl CallArgs {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates purely positional arguments.
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyword: Vec::new(),
        }
    }

    /// Appends a positional argument.
    pub fn pos(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyword argument.
    pub fn kw(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }
}

impl fmt::Display for CallArgs {
    /// Renders the literal argument list, e.g. `1, 2, c=3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.positional {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        for (name, value) in &self.keyword {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn signature_display_matches_declaration_shape() {
        let sig = Signature::new()
            .param(Param::typed("a", TypeExpr::Int))
            .param(Param::typed("b", TypeExpr::Int))
            .param(Param::typed("c", TypeExpr::Int).with_default(0))
            .returns(TypeExpr::Int);
        assert_eq!(sig.to_string(), "(a: int, b: int, c: int = 0) -> int");
    }

    #[test]
    fn signature_display_omits_absent_pieces() {
        let sig = Signature::new()
            .param(Param::new("a"))
            .param(Param::new("b").with_default("x"));
        assert_eq!(sig.to_string(), "(a, b = 'x')");
        assert_eq!(Signature::new().to_string(), "()");
    }

    #[test]
    fn call_args_display_lists_literals() {
        let args = CallArgs::new().pos(1).pos(2).kw("c", 3);
        assert_eq!(args.to_string(), "1, 2, c=3");
        assert_eq!(CallArgs::new().to_string(), "");
    }
}
