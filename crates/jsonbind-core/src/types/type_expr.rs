//! Declared field types.
//!
//! A record declares each field's type as a [`TypeExpr`], which may mention the
//! record's type parameters. Instantiating the record substitutes the actual
//! type arguments, producing the [`TypeDescriptor`] the field is converted as.

use super::descriptor::TypeDescriptor;
use super::syntax::{self, Term};
use crate::naming::Name;
use indexmap::IndexMap;
use std::fmt;

/// A type expression as written in a record declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Type parameter of the declaring record
    ///
    /// Example: `T` in `Inner<T>(T best)`
    Variable(Name),

    /// Reference to a named type, possibly applied to arguments
    ///
    /// Example: `List<T>` is `Reference(List, [Variable(T)])`
    Reference(Name, Vec<TypeExpr>),
}

impl TypeExpr {
    /// Create a variable type
    pub fn variable(name: impl Into<Name>) -> Self {
        TypeExpr::Variable(name.into())
    }

    /// Create a reference type
    pub fn reference(name: impl Into<Name>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Reference(name.into(), args)
    }

    /// Create a reference without arguments
    pub fn named(name: impl Into<Name>) -> Self {
        TypeExpr::Reference(name.into(), Vec::new())
    }

    /// Parses `List<T>`-style text; names listed in `params` become variables.
    pub fn parse(text: &str, params: &[Name]) -> Result<Self, String> {
        syntax::parse(text).map(|term| Self::from_term(term, params))
    }

    fn from_term(term: Term, params: &[Name]) -> Self {
        let name = Name::from(term.name);
        if term.args.is_empty() && params.contains(&name) {
            return TypeExpr::Variable(name);
        }
        TypeExpr::Reference(
            name,
            term.args
                .into_iter()
                .map(|arg| Self::from_term(arg, params))
                .collect(),
        )
    }

    /// Replaces every variable with its binding.
    ///
    /// Returns the name of the first variable that has no binding.
    pub fn substitute(&self, bindings: &IndexMap<Name, TypeDescriptor>) -> Result<TypeDescriptor, Name> {
        match self {
            TypeExpr::Variable(name) => bindings.get(name).cloned().ok_or(*name),
            TypeExpr::Reference(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| arg.substitute(bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::new(*name, args))
            }
        }
    }
}

impl From<TypeDescriptor> for TypeExpr {
    fn from(ty: TypeDescriptor) -> Self {
        TypeExpr::Reference(ty.name, ty.args.into_iter().map(TypeExpr::from).collect())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Variable(name) => write!(f, "{}", name),
            TypeExpr::Reference(name, args) => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, TypeDescriptor)]) -> IndexMap<Name, TypeDescriptor> {
        pairs
            .iter()
            .map(|(name, ty)| (Name::from(*name), ty.clone()))
            .collect()
    }

    #[test]
    fn test_substitute_variable() {
        let expr = TypeExpr::variable("T");
        let ty = expr.substitute(&bindings(&[("T", TypeDescriptor::string())])).unwrap();
        assert_eq!(ty, TypeDescriptor::string());
    }

    #[test]
    fn test_substitute_nested() {
        // Middle<T>.inner : Inner<T>, Inner<T>.others : List<T>
        let expr = TypeExpr::reference("Inner", vec![TypeExpr::variable("T")]);
        let ty = expr.substitute(&bindings(&[("T", TypeDescriptor::string())])).unwrap();
        assert_eq!(ty.to_string(), "Inner<String>");

        let expr = TypeExpr::parse("List<T>", &[Name::from("T")]).unwrap();
        let ty = expr.substitute(&bindings(&[("T", TypeDescriptor::list(TypeDescriptor::i32()))])).unwrap();
        assert_eq!(ty.to_string(), "List<List<i32>>");
    }

    #[test]
    fn test_substitute_unbound_variable() {
        let expr = TypeExpr::reference("List", vec![TypeExpr::variable("U")]);
        let err = expr.substitute(&bindings(&[("T", TypeDescriptor::string())])).unwrap_err();
        assert_eq!(err, "U");
    }

    #[test]
    fn test_parse_classifies_parameters() {
        let params = [Name::from("K"), Name::from("V")];
        let expr = TypeExpr::parse("Pair<K, List<V>>", &params).unwrap();
        assert_eq!(
            expr,
            TypeExpr::reference(
                "Pair",
                vec![TypeExpr::variable("K"), TypeExpr::reference("List", vec![TypeExpr::variable("V")])]
            )
        );
        assert_eq!(expr.to_string(), "Pair<K, List<V>>");
        assert!(matches!(TypeExpr::parse("String", &params).unwrap(), TypeExpr::Reference(_, _)));
    }

    #[test]
    fn test_from_descriptor_needs_no_bindings() {
        let expr = TypeExpr::from(TypeDescriptor::option(TypeDescriptor::f64()));
        assert_eq!(expr.substitute(&IndexMap::new()).unwrap(), TypeDescriptor::option(TypeDescriptor::f64()));
    }
}
