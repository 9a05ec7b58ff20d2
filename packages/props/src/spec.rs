//! Property declarations.
//!
//! A declaration is either a bare field name (`"label"`) or a name/kind pair
//! (`["count", "int"]`). Both forms normalize into a [`PropertySpec`].

use crate::kind::PropKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Canonical form of one declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropKind>,
}

impl PropertySpec {
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }

    pub fn typed(name: impl Into<String>, kind: PropKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
        }
    }

    /// Attribute name the host reports changes under
    pub fn attribute_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Declaration as written by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropDecl {
    Name(String),
    Typed(String, PropKind),
}

impl PropDecl {
    /// Normalize into `(name, kind-or-none)`
    pub fn parse(&self) -> PropertySpec {
        match self {
            PropDecl::Name(name) => PropertySpec::untyped(name.clone()),
            PropDecl::Typed(name, kind) => {
                if !kind.is_known() {
                    warn!(field = %name, kind = %kind, "Unknown property kind in declaration");
                }
                PropertySpec::typed(name.clone(), kind.clone())
            }
        }
    }
}

impl From<&str> for PropDecl {
    fn from(name: &str) -> Self {
        PropDecl::Name(name.to_string())
    }
}

impl From<String> for PropDecl {
    fn from(name: String) -> Self {
        PropDecl::Name(name)
    }
}

impl From<(&str, PropKind)> for PropDecl {
    fn from((name, kind): (&str, PropKind)) -> Self {
        PropDecl::Typed(name.to_string(), kind)
    }
}

impl From<PropertySpec> for PropDecl {
    fn from(spec: PropertySpec) -> Self {
        match spec.kind {
            Some(kind) => PropDecl::Typed(spec.name, kind),
            None => PropDecl::Name(spec.name),
        }
    }
}

/// Normalize a declaration list, keeping declaration order and duplicates
pub fn parse_props<I, D>(decls: I) -> Vec<PropertySpec>
where
    I: IntoIterator<Item = D>,
    D: Into<PropDecl>,
{
    decls.into_iter().map(|d| d.into().parse()).collect()
}
