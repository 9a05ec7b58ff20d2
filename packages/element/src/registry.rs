//! # Field Registry
//!
//! Per-instance storage for field values, plus the type-level lookup tables that
//! route attribute notifications to fields.
//!
//! ## Layout
//!
//! ```text
//! FieldTable (one per element type, immutable)
//!   slots:        [ "fooBar" (none), "count" (int), ... ]   declaration order
//!   by_name:      "fooBar" → 0, "count" → 1
//!   by_attribute: "foobar" → 0, "count" → 1                  lowercased
//!
//! FieldRegistry (one per element instance)
//!   values:  [ "", 0, ... ]                                  one per slot
//!   extras:  { "data-x": "..." }                              unknown attributes
//! ```
//!
//! Every declared field has a value from construction onward. Attributes with no
//! matching field are kept verbatim under their raw name.

use lite_props::{conform, convert, default_for, CoercionResult, PropKind, PropertySpec, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// A declared field bound to its registry slot
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSlot {
    pub name: String,
    pub kind: Option<PropKind>,
    initial: Value,
}

impl FieldSlot {
    pub fn initial(&self) -> &Value {
        &self.initial
    }
}

/// Typed accessor for one declared field, resolved at definition time.
///
/// A handle only resolves against the table that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropHandle {
    table: u64,
    slot: usize,
}

impl PropHandle {
    pub fn slot(self) -> usize {
        self.slot
    }
}

/// Lookup tables shared by every instance of an element type
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    id: u64,
    slots: Vec<FieldSlot>,
    by_name: HashMap<String, usize>,
    by_attribute: HashMap<String, usize>,
    observed: Vec<String>,
}

impl FieldTable {
    /// Build the tables from normalized specs.
    ///
    /// A repeated name reuses its slot: the later declaration's default replaces
    /// the earlier one, and its kind does too when it declares one.
    pub fn new(specs: &[PropertySpec]) -> Self {
        let mut table = FieldTable {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            ..FieldTable::default()
        };

        for spec in specs {
            let initial = default_for(spec.kind.as_ref());
            let slot = match table.by_name.get(&spec.name) {
                Some(&slot) => {
                    let existing = &mut table.slots[slot];
                    existing.initial = initial;
                    if spec.kind.is_some() {
                        existing.kind = spec.kind.clone();
                    }
                    slot
                }
                None => {
                    table.slots.push(FieldSlot {
                        name: spec.name.clone(),
                        kind: spec.kind.clone(),
                        initial,
                    });
                    table.by_name.insert(spec.name.clone(), table.slots.len() - 1);
                    table.slots.len() - 1
                }
            };

            let attribute = spec.attribute_name();
            table.by_attribute.insert(attribute.clone(), slot);
            if !table.observed.contains(&attribute) {
                table.observed.push(attribute);
            }
        }

        table
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn handle(&self, name: &str) -> Option<PropHandle> {
        self.by_name.get(name).map(|&slot| self.issue(slot))
    }

    pub fn slot(&self, handle: PropHandle) -> Option<&FieldSlot> {
        self.index_of(handle).map(|slot| &self.slots[slot])
    }

    fn issue(&self, slot: usize) -> PropHandle {
        PropHandle {
            table: self.id,
            slot,
        }
    }

    /// Slot index for a handle issued by this table
    fn index_of(&self, handle: PropHandle) -> Option<usize> {
        (handle.table == self.id && handle.slot < self.slots.len()).then_some(handle.slot)
    }

    pub fn kind_of(&self, name: &str) -> Option<&PropKind> {
        self.by_name
            .get(name)
            .and_then(|&slot| self.slots[slot].kind.as_ref())
    }

    /// Resolve an attribute name to its field, ignoring case
    pub fn field_for_attribute(&self, attribute: &str) -> Option<PropHandle> {
        self.by_attribute
            .get(&attribute.to_lowercase())
            .map(|&slot| self.issue(slot))
    }

    /// Lowercased names of every declared field, in declaration order
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed
    }

    pub fn observes(&self, attribute: &str) -> bool {
        self.by_attribute.contains_key(attribute)
    }
}

/// Field values owned by one element instance
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    table: Rc<FieldTable>,
    values: Vec<Value>,
    extras: BTreeMap<String, Value>,
}

impl FieldRegistry {
    pub fn new(table: Rc<FieldTable>) -> Self {
        let values = table.slots.iter().map(|slot| slot.initial.clone()).collect();
        Self {
            table,
            values,
            extras: BTreeMap::new(),
        }
    }

    pub fn table(&self) -> &FieldTable {
        &self.table
    }

    /// Current value of a declared field, or of an unknown attribute stored verbatim
    pub fn read(&self, name: &str) -> Option<&Value> {
        match self.table.handle(name) {
            Some(handle) => self.values.get(handle.slot),
            None => self.extras.get(name),
        }
    }

    pub fn read_slot(&self, handle: PropHandle) -> Option<&Value> {
        self.table.index_of(handle).and_then(|slot| self.values.get(slot))
    }

    /// Store `value` in the slot; returns whether the stored value changed.
    ///
    /// Numeric values are conformed to the field's declared kind first, so a
    /// `number` field keeps holding `Number` whatever numeric type is written.
    pub fn write(&mut self, handle: PropHandle, value: Value) -> bool {
        let Some(slot) = self.table.index_of(handle) else {
            return false;
        };
        let value = match &self.table.slots[slot].kind {
            Some(kind) => conform(kind, value),
            None => value,
        };

        let current = &mut self.values[slot];
        if *current == value {
            return false;
        }
        *current = value;
        true
    }

    /// Apply an attribute notification; returns whether the stored value changed.
    ///
    /// Nothing is stored when coercion fails.
    pub fn apply_attribute(&mut self, attribute: &str, raw: Option<&str>) -> CoercionResult<bool> {
        match self.table.field_for_attribute(attribute) {
            Some(handle) => {
                let slot = &self.table.slots[handle.slot];
                let value = match &slot.kind {
                    Some(kind) => convert(kind, &slot.name, raw)?,
                    None => raw_value(raw),
                };
                Ok(self.write(handle, value))
            }
            None => {
                let value = raw_value(raw);
                if self.extras.get(attribute) == Some(&value) {
                    return Ok(false);
                }
                self.extras.insert(attribute.to_string(), value);
                Ok(true)
            }
        }
    }

    /// Read-only view handed to the render function
    pub fn props(&self) -> Props<'_> {
        Props { registry: self }
    }
}

fn raw_value(raw: Option<&str>) -> Value {
    raw.map(Value::from).unwrap_or(Value::Null)
}

/// Snapshot of every field value at render time
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    registry: &'a FieldRegistry,
}

impl<'a> Props<'a> {
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.registry.read(name)
    }

    /// Field value, or `Value::Null` when nothing is stored under `name`
    pub fn value(&self, name: &str) -> &'a Value {
        const NULL: &Value = &Value::Null;
        self.get(name).unwrap_or(NULL)
    }

    pub fn get_prop(&self, handle: PropHandle) -> Option<&'a Value> {
        self.registry.read_slot(handle)
    }

    /// Declared fields in declaration order, then unknown attributes by name
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let registry = self.registry;
        registry
            .table
            .slots
            .iter()
            .map(|slot| slot.name.as_str())
            .zip(registry.values.iter())
            .chain(registry.extras.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.registry.values.len() + self.registry.extras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(self.iter().map(|(k, v)| (k.to_string(), v.to_json())).collect())
    }
}

impl Serialize for Props<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
