//! # LiteElement
//!
//! Define custom elements from a name, a list of typed props and a pure render
//! function. The crate keeps field values in sync with host attributes and
//! decides, per lifecycle event and mutation, whether to render.
//!
//! ## Architecture
//!
//! ```text
//! host callbacks / attribute changes
//!                 ↓
//! ┌─────────────────────────────────────────────┐
//! │ registry: attribute → field, kind coercion  │
//! └─────────────────────────────────────────────┘
//!                 ↓ (value changed)
//! ┌─────────────────────────────────────────────┐
//! │ render_mask: defer gate, then trigger flag  │
//! └─────────────────────────────────────────────┘
//!                 ↓ (passes)
//! ┌─────────────────────────────────────────────┐
//! │ element: render(props) → TemplateEngine     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous: a callback returns after its render (if any) has
//! been handed to the template engine. Mutations are never batched.
//!
//! ## Usage
//!
//! ```rust
//! use lite_element::{CustomElementRegistry, ElementConfig, VDomEngine, VNode};
//! use lite_props::PropKind;
//! use std::rc::Rc;
//!
//! let engine = Rc::new(VDomEngine::new());
//! let mut host: CustomElementRegistry<VNode> = CustomElementRegistry::with_engine(engine.clone());
//!
//! host.define(
//!     ElementConfig::new("hello-name", |props| {
//!         VNode::element("p").with_child(VNode::text(format!("hello {}", props.value("name"))))
//!     })
//!     .with_prop("name")
//!     .with_prop(("visits", PropKind::Int)),
//! )
//! .unwrap();
//!
//! let mut el = host.create("hello-name").unwrap();
//! el.set_attribute("name", "world").unwrap();
//! el.connected_callback();
//!
//! assert_eq!(engine.html(el.id()).unwrap(), "<p>hello world</p>");
//! ```

pub mod definition;
pub mod element;
pub mod errors;
pub mod host;
pub mod registry;
pub mod render_mask;
pub mod vdom;

#[cfg(test)]
mod tests_lifecycle;

pub use definition::{define, DefineOutcome, ElementConfig, ElementManifest, ElementType, RenderFn};
pub use element::{Element, Lifecycle};
pub use errors::{DefineError, ElementError, ElementResult};
pub use host::{CustomElementRegistry, ElementId, ElementRegistry, TemplateEngine};
pub use registry::{FieldRegistry, FieldSlot, FieldTable, PropHandle, Props};
pub use render_mask::{should_render, RenderMask, RenderTrigger};
pub use vdom::{Mounted, VDomEngine, VNode};
