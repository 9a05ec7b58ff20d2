use crate::host::{ElementId, TemplateEngine};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Virtual DOM node returned by render functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Serialize to HTML text
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            VNode::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            VNode::Text { content } => out.push_str(&escape_html(content)),
            VNode::Comment { content } => {
                out.push_str("<!--");
                out.push_str(content);
                out.push_str("-->");
            }
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Output mounted into one element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mounted {
    pub node: VNode,
    pub renders: usize,
}

/// Template engine keeping the latest output per element.
///
/// Entries stay mounted until [`VDomEngine::unmount`] drops them; the host
/// calls it once an element is gone for good.
#[derive(Debug, Default)]
pub struct VDomEngine {
    mounted: RefCell<HashMap<ElementId, Mounted>>,
}

impl VDomEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self, target: ElementId) -> Option<VNode> {
        self.mounted.borrow().get(&target).map(|m| m.node.clone())
    }

    pub fn html(&self, target: ElementId) -> Option<String> {
        self.mounted.borrow().get(&target).map(|m| m.node.to_html())
    }

    pub fn render_count(&self, target: ElementId) -> usize {
        self.mounted.borrow().get(&target).map_or(0, |m| m.renders)
    }

    pub fn total_renders(&self) -> usize {
        self.mounted.borrow().values().map(|m| m.renders).sum()
    }

    /// Drop the output mounted into `target`, returning it
    pub fn unmount(&self, target: ElementId) -> Option<VNode> {
        self.mounted.borrow_mut().remove(&target).map(|m| m.node)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.borrow().len()
    }

    pub fn to_json(&self, target: ElementId) -> Option<String> {
        self.mounted
            .borrow()
            .get(&target)
            .and_then(|m| serde_json::to_string(m).ok())
    }
}

impl TemplateEngine<VNode> for VDomEngine {
    fn render(&self, output: VNode, target: ElementId) {
        let mut mounted = self.mounted.borrow_mut();
        match mounted.get_mut(&target) {
            Some(existing) => {
                existing.node = output;
                existing.renders += 1;
            }
            None => {
                mounted.insert(
                    target,
                    Mounted {
                        node: output,
                        renders: 1,
                    },
                );
            }
        }
    }
}
