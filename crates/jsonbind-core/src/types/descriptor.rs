use super::names;
use super::syntax::{self, Term};
use crate::naming::Name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a target type: a nominal name plus ordered type arguments.
///
/// Two descriptors are equal iff their names and all their arguments are
/// equal, which makes a descriptor usable as the converter cache key.
///
/// ```rust,ignore
/// let ty: TypeDescriptor = "List<Inner<String>>".parse()?;
/// assert_eq!(ty, TypeDescriptor::list(TypeDescriptor::new("Inner", vec![TypeDescriptor::string()])));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeDescriptor {
    pub name: Name,
    pub args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<Name>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor {
            name: name.into(),
            args,
        }
    }

    /// A descriptor without type arguments.
    pub fn named(name: impl Into<Name>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn arg(&self, index: usize) -> Option<&TypeDescriptor> {
        self.args.get(index)
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// True if the nominal name is `name`, whatever the arguments.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn unit() -> Self {
        Self::named(names::UNIT)
    }

    pub fn bool() -> Self {
        Self::named(names::BOOL)
    }

    pub fn i8() -> Self {
        Self::named(names::I8)
    }

    pub fn i16() -> Self {
        Self::named(names::I16)
    }

    pub fn i32() -> Self {
        Self::named(names::I32)
    }

    pub fn i64() -> Self {
        Self::named(names::I64)
    }

    pub fn f32() -> Self {
        Self::named(names::F32)
    }

    pub fn f64() -> Self {
        Self::named(names::F64)
    }

    pub fn string() -> Self {
        Self::named(names::STRING)
    }

    pub fn json() -> Self {
        Self::named(names::JSON)
    }

    pub fn list(element: TypeDescriptor) -> Self {
        Self::new(names::LIST, vec![element])
    }

    pub fn option(inner: TypeDescriptor) -> Self {
        Self::new(names::OPTION, vec![inner])
    }

    pub fn type_wrapper() -> Self {
        Self::named(names::TYPE_WRAPPER)
    }

    pub(crate) fn from_term(term: Term) -> Self {
        TypeDescriptor {
            name: Name::from(term.name),
            args: term.args.into_iter().map(Self::from_term).collect(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
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

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self)
    }
}

impl FromStr for TypeDescriptor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        syntax::parse(s).map(Self::from_term)
    }
}

impl From<TypeDescriptor> for String {
    fn from(ty: TypeDescriptor) -> String {
        ty.to_string()
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
