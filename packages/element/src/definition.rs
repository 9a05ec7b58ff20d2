//! # Component Factory
//!
//! Turns an [`ElementConfig`] into an [`ElementType`] and registers it with the
//! host under its name.
//!
//! ## Definition Rules
//!
//! - A name that is already defined is left alone: the call logs a warning and
//!   returns [`DefineOutcome::AlreadyDefined`]. The first definition keeps its
//!   render function and policy.
//! - The render mask defaults to [`RenderMask::DEFAULT`] (render on connect,
//!   defer field/attribute renders until connected, no construction render).
//! - The observed attribute list is the lowercased declared field names, built
//!   once here and never changed afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use lite_element::{CustomElementRegistry, ElementConfig, ElementId, VNode};
//! use lite_props::PropKind;
//!
//! let mut host = CustomElementRegistry::new(|_output: VNode, _target: ElementId| {});
//! host.define(
//!     ElementConfig::new("count-badge", |props| {
//!         VNode::element("span").with_child(VNode::text(props.value("count").to_string()))
//!     })
//!     .with_prop(("count", PropKind::Int)),
//! )
//! .unwrap();
//!
//! assert!(host.create("count-badge").is_some());
//! ```

use crate::errors::DefineError;
use crate::host::ElementRegistry;
use crate::registry::{FieldTable, PropHandle, Props};
use crate::render_mask::RenderMask;
use lite_props::{parse_props, PropDecl};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, instrument, warn};

pub type RenderFn<R> = Box<dyn Fn(&Props<'_>) -> R>;

/// Declarative part of an element definition, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementManifest {
    pub name: String,
    #[serde(default)]
    pub props: Vec<PropDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_mask: Option<RenderMask>,
    #[serde(default)]
    pub log_renders: bool,
}

impl ElementManifest {
    pub fn from_json(source: &str) -> Result<Self, DefineError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Everything needed to define an element
pub struct ElementConfig<R> {
    pub name: String,
    pub props: Vec<PropDecl>,
    pub render: RenderFn<R>,
    /// `None` selects [`RenderMask::DEFAULT`]
    pub render_mask: Option<RenderMask>,
    pub log_renders: bool,
}

impl<R> ElementConfig<R> {
    pub fn new(name: impl Into<String>, render: impl Fn(&Props<'_>) -> R + 'static) -> Self {
        Self {
            name: name.into(),
            props: Vec::new(),
            render: Box::new(render),
            render_mask: None,
            log_renders: false,
        }
    }

    pub fn from_manifest(
        manifest: ElementManifest,
        render: impl Fn(&Props<'_>) -> R + 'static,
    ) -> Self {
        Self {
            name: manifest.name,
            props: manifest.props,
            render: Box::new(render),
            render_mask: manifest.render_mask,
            log_renders: manifest.log_renders,
        }
    }

    pub fn with_prop(mut self, decl: impl Into<PropDecl>) -> Self {
        self.props.push(decl.into());
        self
    }

    pub fn with_props<I, D>(mut self, decls: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<PropDecl>,
    {
        self.props.extend(decls.into_iter().map(Into::into));
        self
    }

    pub fn with_render_mask(mut self, mask: RenderMask) -> Self {
        self.render_mask = Some(mask);
        self
    }

    pub fn with_log_renders(mut self, log_renders: bool) -> Self {
        self.log_renders = log_renders;
        self
    }
}

impl<R> fmt::Debug for ElementConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementConfig")
            .field("name", &self.name)
            .field("props", &self.props)
            .field("render_mask", &self.render_mask)
            .field("log_renders", &self.log_renders)
            .finish_non_exhaustive()
    }
}

/// A defined element type, shared by all of its instances
pub struct ElementType<R> {
    name: String,
    fields: Rc<FieldTable>,
    render_mask: RenderMask,
    log_renders: bool,
    render: RenderFn<R>,
}

impl<R> ElementType<R> {
    pub fn from_config(config: ElementConfig<R>) -> Self {
        let specs = parse_props(config.props);
        Self {
            name: config.name,
            fields: Rc::new(FieldTable::new(&specs)),
            render_mask: config.render_mask.unwrap_or_default(),
            log_renders: config.log_renders,
            render: config.render,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &Rc<FieldTable> {
        &self.fields
    }

    /// Accessor for a declared field
    pub fn prop(&self, name: &str) -> Option<PropHandle> {
        self.fields.handle(name)
    }

    pub fn observed_attributes(&self) -> &[String] {
        self.fields.observed_attributes()
    }

    pub fn render_mask(&self) -> RenderMask {
        self.render_mask
    }

    pub fn log_renders(&self) -> bool {
        self.log_renders
    }

    pub(crate) fn render(&self, props: &Props<'_>) -> R {
        (self.render)(props)
    }
}

impl<R> fmt::Debug for ElementType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("render_mask", &self.render_mask)
            .field("log_renders", &self.log_renders)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineOutcome {
    Defined,
    /// The name was taken; nothing was registered
    AlreadyDefined,
}

impl DefineOutcome {
    pub fn is_defined(self) -> bool {
        self == DefineOutcome::Defined
    }
}

/// Define `config` in `host` unless its name is already taken
#[instrument(skip(host, config), fields(element = %config.name, prop_count = config.props.len()))]
pub fn define<R, H>(host: &mut H, config: ElementConfig<R>) -> Result<DefineOutcome, DefineError>
where
    H: ElementRegistry<R> + ?Sized,
{
    if config.name.is_empty() {
        return Err(DefineError::MissingName);
    }

    if host.is_defined(&config.name) {
        warn!("{} is already defined, not re-registering", config.name);
        return Ok(DefineOutcome::AlreadyDefined);
    }

    let ty = ElementType::from_config(config);
    debug!(
        observed = ?ty.observed_attributes(),
        render_mask = ?ty.render_mask().names(),
        log_renders = ty.log_renders(),
        "Defining element"
    );

    host.insert(Rc::new(ty));
    Ok(DefineOutcome::Defined)
}
