//! Frequency-policy engine boundary types.

/// Which performance class a CPU belongs to.
///
/// Big.LITTLE-style topologies expose two clusters; the boost frequency
/// tables are configured per cluster.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuCluster {
    LowPower = 0,
    Performance = 1,
}

impl CpuCluster {
    #[inline]
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::LowPower),
            1 => Some(Self::Performance),
            _ => None,
        }
    }
}

/// Per-CPU frequency bounds handed to policy-adjust notifiers.
///
/// The engine fills in `cpu`, the current `max_khz`, and the hardware
/// limits before invoking the notifier chain; notifiers rewrite `min_khz`.
/// All frequencies are in kHz, the engine's native unit.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyBounds {
    /// CPU index this policy applies to.
    pub cpu: u32,
    /// Minimum frequency the engine will enforce after adjustment.
    pub min_khz: u32,
    /// Maximum frequency currently allowed for this CPU.
    pub max_khz: u32,
    /// Absolute hardware minimum for this CPU.
    pub cpuinfo_min_khz: u32,
    /// Absolute hardware maximum for this CPU.
    pub cpuinfo_max_khz: u32,
}

impl PolicyBounds {
    /// A policy with identical hardware and enforced bounds.
    pub const fn new(cpu: u32, min_khz: u32, max_khz: u32) -> Self {
        Self {
            cpu,
            min_khz,
            max_khz,
            cpuinfo_min_khz: min_khz,
            cpuinfo_max_khz: max_khz,
        }
    }
}
