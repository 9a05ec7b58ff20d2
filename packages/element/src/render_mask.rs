//! # Render Mask
//!
//! Decides which lifecycle and mutation events cause a render.
//!
//! Evaluation is two-stage:
//!
//! 1. **Modifier gate**: a change trigger (`PROPS` or `ATTR`) is suppressed while
//!    `DEFER_CHANGE_CONNECT` is set and the element has not connected yet.
//! 2. **Trigger flag**: otherwise the mask's own bit for the trigger decides.
//!
//! The modifier never affects `CONSTRUCT`, `CONNECT`, `ADOPT` or `DISCONNECT`.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Set of triggers that render, plus the defer modifier
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct RenderMask: u8 {
        /// Render when connected to the host tree
        const CONNECT = 1 << 0;
        /// Render when adopted into another document
        const ADOPT = 1 << 1;
        /// Render when disconnected from the host tree
        const DISCONNECT = 1 << 2;
        /// Render when a field is written
        const PROPS = 1 << 3;
        /// Render when an observed attribute changes
        const ATTR = 1 << 4;
        /// Do not render field/attribute changes until connected
        const DEFER_CHANGE_CONNECT = 1 << 5;
        /// Render once when the element is constructed
        const CONSTRUCT = 1 << 6;

        const CHANGES = Self::PROPS.bits() | Self::ATTR.bits();
        const DEFER_CHANGES = Self::DEFER_CHANGE_CONNECT.bits() | Self::CHANGES.bits();
        const ALL = Self::CONNECT.bits()
            | Self::ADOPT.bits()
            | Self::DISCONNECT.bits()
            | Self::PROPS.bits()
            | Self::ATTR.bits();
    }
}

impl RenderMask {
    /// Render on connection; defer change renders until then
    pub const DEFAULT: RenderMask = RenderMask::CONNECT.union(RenderMask::DEFER_CHANGES);

    /// Human-readable names of the set bits
    pub fn names(self) -> Vec<&'static str> {
        const NAMES: [(RenderMask, &str); 7] = [
            (RenderMask::CONNECT, "connect"),
            (RenderMask::ADOPT, "adopt"),
            (RenderMask::DISCONNECT, "disconnect"),
            (RenderMask::PROPS, "props"),
            (RenderMask::ATTR, "attr"),
            (RenderMask::DEFER_CHANGE_CONNECT, "defer-change-connect"),
            (RenderMask::CONSTRUCT, "construct"),
        ];

        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    pub fn defers_changes(self) -> bool {
        self.contains(RenderMask::DEFER_CHANGE_CONNECT)
    }

    pub fn should_render(self, trigger: RenderTrigger, has_connected: bool) -> bool {
        should_render(trigger, self, has_connected)
    }
}

impl Default for RenderMask {
    fn default() -> Self {
        RenderMask::DEFAULT
    }
}

/// One lifecycle or mutation event evaluated against a [`RenderMask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTrigger {
    Construct,
    Connect,
    Adopt,
    Disconnect,
    FieldMutate,
    AttrMutate,
}

impl RenderTrigger {
    pub fn mask(self) -> RenderMask {
        match self {
            RenderTrigger::Construct => RenderMask::CONSTRUCT,
            RenderTrigger::Connect => RenderMask::CONNECT,
            RenderTrigger::Adopt => RenderMask::ADOPT,
            RenderTrigger::Disconnect => RenderMask::DISCONNECT,
            RenderTrigger::FieldMutate => RenderMask::PROPS,
            RenderTrigger::AttrMutate => RenderMask::ATTR,
        }
    }

    pub fn is_change(self) -> bool {
        matches!(self, RenderTrigger::FieldMutate | RenderTrigger::AttrMutate)
    }
}

impl fmt::Display for RenderTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mask().names().first().copied().unwrap_or("none"))
    }
}

pub fn should_render(trigger: RenderTrigger, policy: RenderMask, has_connected: bool) -> bool {
    if trigger.is_change() && policy.defers_changes() && !has_connected {
        return false;
    }
    policy.contains(trigger.mask())
}
