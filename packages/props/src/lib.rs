//! # LiteElement Props
//!
//! Typed field values for custom elements and the rules that turn attribute
//! strings into them.
//!
//! ## Usage
//!
//! ```rust
//! use lite_props::{convert, default_for, parse_props, PropDecl, PropKind, Value};
//!
//! let specs = parse_props(vec![
//!     PropDecl::from("label"),
//!     PropDecl::from(("count", PropKind::Int)),
//! ]);
//!
//! assert_eq!(default_for(specs[0].kind.as_ref()), Value::from(""));
//! assert_eq!(convert(&PropKind::Int, "count", Some("7px")).unwrap(), Value::Int(7));
//! ```

pub mod error;
pub mod kind;
pub mod numeric;
pub mod spec;
pub mod value;

#[cfg(test)]
mod tests_coercion;

pub use error::{CoercionError, CoercionResult};
pub use kind::{conform, convert, default_for, PropKind};
pub use numeric::{parse_float_prefix, parse_int_prefix};
pub use spec::{parse_props, PropDecl, PropertySpec};
pub use value::Value;
