//! Type descriptors and the type expressions records declare their fields with.

pub mod descriptor;
pub mod type_expr;

mod syntax;

pub use descriptor::TypeDescriptor;
pub use type_expr::TypeExpr;

/// Nominal names of the built-in shapes.
pub mod names {
    pub const UNIT: &str = "Unit";
    pub const BOOL: &str = "bool";
    pub const I8: &str = "i8";
    pub const I16: &str = "i16";
    pub const I32: &str = "i32";
    pub const I64: &str = "i64";
    pub const F32: &str = "f32";
    pub const F64: &str = "f64";
    pub const STRING: &str = "String";
    pub const JSON: &str = "Json";
    pub const LIST: &str = "List";
    pub const OPTION: &str = "Option";
    pub const TYPE_WRAPPER: &str = "TypeWrapper";
}
