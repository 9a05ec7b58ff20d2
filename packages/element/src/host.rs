//! # Host Boundary
//!
//! The two collaborators an element talks to:
//!
//! - [`ElementRegistry`]: the host's namespace of defined element names. Define
//!   once, check before defining, never overwrite.
//! - [`TemplateEngine`]: receives each render output together with the element
//!   it targets. The core never inspects or keeps the output.
//!
//! [`CustomElementRegistry`] is an in-memory host providing both, and creates
//! element instances by name.

use crate::definition::{define, DefineOutcome, ElementConfig, ElementType};
use crate::element::Element;
use crate::errors::DefineError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Identity of one element instance within its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait TemplateEngine<R> {
    fn render(&self, output: R, target: ElementId);
}

impl<R, F> TemplateEngine<R> for F
where
    F: Fn(R, ElementId),
{
    fn render(&self, output: R, target: ElementId) {
        self(output, target)
    }
}

pub trait ElementRegistry<R> {
    fn get(&self, name: &str) -> Option<Rc<ElementType<R>>>;

    fn insert(&mut self, ty: Rc<ElementType<R>>);

    fn is_defined(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// In-memory host: element definitions, template engine, instance ids
pub struct CustomElementRegistry<R> {
    definitions: HashMap<String, Rc<ElementType<R>>>,
    engine: Rc<dyn TemplateEngine<R>>,
    next_id: u64,
}

impl<R: 'static> CustomElementRegistry<R> {
    pub fn new(engine: impl TemplateEngine<R> + 'static) -> Self {
        Self::with_engine(Rc::new(engine))
    }

    pub fn with_engine(engine: Rc<dyn TemplateEngine<R>>) -> Self {
        Self {
            definitions: HashMap::new(),
            engine,
            next_id: 0,
        }
    }

    pub fn define(&mut self, config: ElementConfig<R>) -> Result<DefineOutcome, DefineError> {
        define(self, config)
    }

    /// Instantiate a defined element; `None` when `name` is not defined
    pub fn create(&mut self, name: &str) -> Option<Element<R>> {
        let ty = self.definitions.get(name)?.clone();
        self.next_id += 1;
        Some(Element::construct(
            ElementId(self.next_id),
            ty,
            self.engine.clone(),
        ))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

impl<R> ElementRegistry<R> for CustomElementRegistry<R> {
    fn get(&self, name: &str) -> Option<Rc<ElementType<R>>> {
        self.definitions.get(name).cloned()
    }

    fn insert(&mut self, ty: Rc<ElementType<R>>) {
        self.definitions.insert(ty.name().to_string(), ty);
    }
}

impl<R> fmt::Debug for CustomElementRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomElementRegistry")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}
