//! Input device classes and raw event types.
//!
//! The coordinator only cares about three device classes: multi-touch
//! touchscreens, touchpads, and anything that can emit a key press. Each
//! class is described by an [`InputDeviceId`] match rule over the device's
//! capability bitmaps, mirroring how input handlers declare interest.

use bitflags::bitflags;

bitflags! {
    /// Which capability bitmaps an [`InputDeviceId`] rule inspects.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MatchFlags: u8 {
        const EVBIT = 1 << 0;
        const ABSBIT = 1 << 1;
        const KEYBIT = 1 << 2;
    }
}

bitflags! {
    /// Event types a device can generate.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EventBits: u32 {
        /// Key / button events.
        const KEY = 1 << 0;
        /// Absolute axis events.
        const ABS = 1 << 1;
    }
}

bitflags! {
    /// Absolute axes a device reports.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AbsBits: u32 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const MT_POSITION_X = 1 << 2;
        const MT_POSITION_Y = 1 << 3;
    }
}

bitflags! {
    /// Buttons/keys a device reports (only the ones matching cares about).
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct KeyBits: u32 {
        const BTN_TOUCH = 1 << 0;
    }
}

/// Capability bitmaps advertised by a connecting input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputDeviceCaps {
    pub evbits: EventBits,
    pub absbits: AbsBits,
    pub keybits: KeyBits,
}

impl Default for InputDeviceCaps {
    fn default() -> Self {
        Self::none()
    }
}

impl InputDeviceCaps {
    /// A device advertising no capabilities at all.
    pub const fn none() -> Self {
        Self {
            evbits: EventBits::empty(),
            absbits: AbsBits::empty(),
            keybits: KeyBits::empty(),
        }
    }

    /// A multi-touch touchscreen (absolute MT position axes).
    pub const fn touchscreen() -> Self {
        Self {
            evbits: EventBits::ABS,
            absbits: AbsBits::MT_POSITION_X.union(AbsBits::MT_POSITION_Y),
            keybits: KeyBits::empty(),
        }
    }

    /// A touchpad (touch button plus absolute X/Y).
    pub const fn touchpad() -> Self {
        Self {
            evbits: EventBits::KEY.union(EventBits::ABS),
            absbits: AbsBits::X.union(AbsBits::Y),
            keybits: KeyBits::BTN_TOUCH,
        }
    }

    /// A keypad or keyboard (key events only).
    pub const fn keypad() -> Self {
        Self {
            evbits: EventBits::KEY,
            absbits: AbsBits::empty(),
            keybits: KeyBits::empty(),
        }
    }
}

/// A single match rule: every bitmap named in `flags` must intersect the
/// device's corresponding capability bitmap.
#[derive(Clone, Copy, Debug)]
pub struct InputDeviceId {
    pub flags: MatchFlags,
    pub evbits: EventBits,
    pub absbits: AbsBits,
    pub keybits: KeyBits,
}

impl InputDeviceId {
    /// Does `caps` satisfy this rule?
    pub fn matches(&self, caps: &InputDeviceCaps) -> bool {
        if self.flags.contains(MatchFlags::EVBIT) && !caps.evbits.intersects(self.evbits) {
            return false;
        }
        if self.flags.contains(MatchFlags::ABSBIT) && !caps.absbits.intersects(self.absbits) {
            return false;
        }
        if self.flags.contains(MatchFlags::KEYBIT) && !caps.keybits.intersects(self.keybits) {
            return false;
        }
        true
    }
}

/// Type of a raw input event as delivered to handlers.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEventType {
    Key = 0,
    Abs = 1,
    Rel = 2,
    Sync = 3,
}

impl RawEventType {
    #[inline]
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Key),
            1 => Some(Self::Abs),
            2 => Some(Self::Rel),
            3 => Some(Self::Sync),
            _ => None,
        }
    }
}

/// A raw input event: type, code, value.
///
/// The coordinator treats any event on a matched device as activity; the
/// payload exists so handlers with finer-grained interest can share the
/// same delivery path.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawInputEvent {
    pub etype: RawEventType,
    pub code: u16,
    pub value: i32,
}

impl RawInputEvent {
    pub const fn new(etype: RawEventType, code: u16, value: i32) -> Self {
        Self { etype, code, value }
    }
}
