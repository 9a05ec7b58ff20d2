//! # Element Instance
//!
//! Lifecycle/render controller for one element.
//!
//! ## Lifecycle
//!
//! ```text
//!              connected_callback
//!   ┌────────────┐ ──────────────▶ ┌───────────┐
//!   │ Unconnected│                 │ Connected │ ◀─┐ connected_callback
//!   └────────────┘ ◀────────────── └───────────┘ ──┘
//!              disconnected_callback
//! ```
//!
//! `adopted_callback` and field/attribute mutations leave the state alone. Every
//! callback evaluates the type's [`RenderMask`](crate::RenderMask) and, when it
//! passes, calls the render function once and hands the output to the template
//! engine before returning.

use crate::definition::ElementType;
use crate::errors::{ElementError, ElementResult};
use crate::host::{ElementId, TemplateEngine};
use crate::registry::{FieldRegistry, PropHandle, Props};
use crate::render_mask::RenderTrigger;
use lite_props::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unconnected,
    Connected,
}

impl Lifecycle {
    pub fn has_connected(self) -> bool {
        self == Lifecycle::Connected
    }
}

pub struct Element<R> {
    id: ElementId,
    ty: Rc<ElementType<R>>,
    engine: Rc<dyn TemplateEngine<R>>,
    fields: FieldRegistry,
    lifecycle: Lifecycle,
    /// Native attributes, keyed by lowercased name
    attributes: BTreeMap<String, String>,
}

impl<R> Element<R> {
    /// Create an instance with every field at its default, then run the
    /// construction trigger.
    pub fn construct(
        id: ElementId,
        ty: Rc<ElementType<R>>,
        engine: Rc<dyn TemplateEngine<R>>,
    ) -> Self {
        let fields = FieldRegistry::new(ty.fields().clone());
        let element = Self {
            id,
            ty,
            engine,
            fields,
            lifecycle: Lifecycle::Unconnected,
            attributes: BTreeMap::new(),
        };

        debug!(element = %element.ty.name(), id = %id, "Constructed element");
        element.render_to_self(RenderTrigger::Construct);
        element
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn local_name(&self) -> &str {
        self.ty.name()
    }

    pub fn element_type(&self) -> &Rc<ElementType<R>> {
        &self.ty
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn has_connected(&self) -> bool {
        self.lifecycle.has_connected()
    }

    pub fn connected_callback(&mut self) -> bool {
        self.lifecycle = Lifecycle::Connected;
        self.render_to_self(RenderTrigger::Connect)
    }

    pub fn disconnected_callback(&mut self) -> bool {
        self.lifecycle = Lifecycle::Unconnected;
        self.render_to_self(RenderTrigger::Disconnect)
    }

    pub fn adopted_callback(&mut self) -> bool {
        self.render_to_self(RenderTrigger::Adopt)
    }

    /// Host notification for an observed attribute.
    ///
    /// Identical old and new values are ignored. A JSON field receiving
    /// malformed input returns the error and keeps its previous value.
    pub fn attribute_changed_callback(
        &mut self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> ElementResult<bool> {
        if old_value == new_value {
            return Ok(false);
        }

        if !self.fields.apply_attribute(name, new_value)? {
            debug!(element = %self.ty.name(), attribute = name, "Attribute value unchanged");
            return Ok(false);
        }

        Ok(self.render_to_self(RenderTrigger::AttrMutate))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.read(name)
    }

    pub fn get_prop(&self, prop: PropHandle) -> Option<&Value> {
        self.fields.read_slot(prop)
    }

    /// Write a declared field. Returns whether a render was dispatched.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> ElementResult<bool> {
        let prop = self
            .ty
            .prop(name)
            .ok_or_else(|| self.unknown_property(name))?;
        self.set_prop(prop, value)
    }

    pub fn set_prop(&mut self, prop: PropHandle, value: impl Into<Value>) -> ElementResult<bool> {
        if self.ty.fields().slot(prop).is_none() {
            return Err(self.unknown_property(&format!("<slot {}>", prop.slot())));
        }

        if !self.fields.write(prop, value.into()) {
            return Ok(false);
        }

        Ok(self.render_to_self(RenderTrigger::FieldMutate))
    }

    pub fn props(&self) -> Props<'_> {
        self.fields.props()
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_lowercase())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set a native attribute, notifying this element when the name is observed
    pub fn set_attribute(&mut self, name: &str, value: &str) -> ElementResult<bool> {
        let name = name.to_lowercase();
        let old = self.attributes.insert(name.clone(), value.to_string());
        self.notify_attribute(&name, old.as_deref(), Some(value))
    }

    pub fn remove_attribute(&mut self, name: &str) -> ElementResult<bool> {
        let name = name.to_lowercase();
        match self.attributes.remove(&name) {
            Some(old) => self.notify_attribute(&name, Some(&old), None),
            None => Ok(false),
        }
    }

    fn notify_attribute(
        &mut self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> ElementResult<bool> {
        if !self.ty.fields().observes(name) {
            return Ok(false);
        }
        self.attribute_changed_callback(name, old_value, new_value)
    }

    fn render_to_self(&self, trigger: RenderTrigger) -> bool {
        let mask = self.ty.render_mask();
        if !mask.should_render(trigger, self.lifecycle.has_connected()) {
            debug!(element = %self.ty.name(), id = %self.id, %trigger, "Render skipped");
            return false;
        }

        if self.ty.log_renders() {
            info!(
                element = %self.ty.name(),
                id = %self.id,
                triggers = ?trigger.mask().names(),
                "rendering"
            );
        }

        let output = self.ty.render(&self.fields.props());
        self.engine.render(output, self.id);
        true
    }

    fn unknown_property(&self, name: &str) -> ElementError {
        ElementError::UnknownProperty {
            element: self.ty.name().to_string(),
            name: name.to_string(),
        }
    }
}

impl<R> fmt::Debug for Element<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("local_name", &self.ty.name())
            .field("lifecycle", &self.lifecycle)
            .field("fields", &self.fields.props().to_map())
            .field("attributes", &self.attributes)
            .finish()
    }
}
