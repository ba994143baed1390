//! Boost state flags and classes.

use bitflags::bitflags;

bitflags! {
    /// Independent boolean conditions of the coordinator state machine.
    ///
    /// Bits are only ever set/cleared through atomic OR / AND-NOT on the
    /// coordinator's state word; the flags type itself is a plain value.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BoostFlags: u32 {
        /// The display is powered; input-originated boosts are accepted.
        const SCREEN_AWAKE = 1 << 0;
        /// Ordinary fixed-duration input boost is active.
        const INPUT_BOOST = 1 << 1;
        /// The active max boost was triggered by a display wake.
        const WAKE_BOOST = 1 << 2;
        /// Maximum-priority boost is active (min pinned to max).
        const MAX_BOOST = 1 << 3;
        /// Caller-supplied-duration general boost is active.
        const GENERAL_BOOST = 1 << 4;
    }
}

impl BoostFlags {
    /// Every bit a display-off reset clears.
    pub const ALL_BOOSTS: Self = Self::INPUT_BOOST
        .union(Self::WAKE_BOOST)
        .union(Self::MAX_BOOST)
        .union(Self::GENERAL_BOOST);
}

/// The three boost classes the coordinator schedules independently.
///
/// `Input` has a fixed externally-configured duration; `Max` and `General`
/// carry a caller-supplied duration merged longest-deadline-wins.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoostClass {
    Input = 0,
    Max = 1,
    General = 2,
}

/// Number of [`BoostClass`] variants; sizes the per-class timer table.
pub const BOOST_CLASS_COUNT: usize = 3;

impl BoostClass {
    #[inline]
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Input),
            1 => Some(Self::Max),
            2 => Some(Self::General),
            _ => None,
        }
    }

    /// Table index for per-class storage.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// State bits cleared when this class's deferred unboost fires.
    ///
    /// A max unboost also retires the wake boost: the wake path is a max
    /// boost under the hood and shares its timer.
    #[inline]
    pub fn unboost_bits(self) -> BoostFlags {
        match self {
            Self::Input => BoostFlags::INPUT_BOOST,
            Self::Max => BoostFlags::MAX_BOOST.union(BoostFlags::WAKE_BOOST),
            Self::General => BoostFlags::GENERAL_BOOST,
        }
    }

    /// State bit asserted while this class is boosting.
    #[inline]
    pub fn boost_bit(self) -> BoostFlags {
        match self {
            Self::Input => BoostFlags::INPUT_BOOST,
            Self::Max => BoostFlags::MAX_BOOST,
            Self::General => BoostFlags::GENERAL_BOOST,
        }
    }
}
