//! Boost tunables.
//!
//! The boost frequencies and durations are externally supplied policy, not
//! coordinator logic. Compiled defaults can be overridden at bring-up from
//! a kernel-style cmdline (`cpu_boost.<key>=<value>`) or individually at
//! runtime; readers always take a whole-struct snapshot so a concurrent
//! update can never produce a torn mix of old and new values.

use slingshot_lib::IrqMutex;

const DEFAULT_INPUT_BOOST_FREQ_LP_KHZ: u32 = 1_228_800;
const DEFAULT_INPUT_BOOST_FREQ_HP_KHZ: u32 = 1_574_400;
const DEFAULT_GENERAL_BOOST_FREQ_LP_KHZ: u32 = 1_228_800;
const DEFAULT_GENERAL_BOOST_FREQ_HP_KHZ: u32 = 1_574_400;
const DEFAULT_REMOVE_BOOST_FREQ_LP_KHZ: u32 = 576_000;
const DEFAULT_REMOVE_BOOST_FREQ_HP_KHZ: u32 = 652_800;
const DEFAULT_INPUT_BOOST_DURATION_MS: u16 = 100;
const DEFAULT_WAKE_BOOST_DURATION_MS: u32 = 1_000;

/// Externally configured boost policy values.
///
/// Frequencies are per cluster; `lp` rows apply to the low-power cluster
/// and `hp` rows to the performance cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoostTunables {
    /// Input-boost frequency table.
    pub input_boost_freq_lp_khz: u32,
    pub input_boost_freq_hp_khz: u32,
    /// General-boost frequency table.
    pub general_boost_freq_lp_khz: u32,
    pub general_boost_freq_hp_khz: u32,
    /// Post-boost comfort floor, applied even when no boost is active.
    pub remove_boost_freq_lp_khz: u32,
    pub remove_boost_freq_hp_khz: u32,
    /// Fixed duration of the ordinary input boost.
    pub input_boost_duration_ms: u16,
    /// Fixed duration of the max boost requested on display wake.
    pub wake_boost_duration_ms: u32,
}

impl BoostTunables {
    pub const fn defaults() -> Self {
        Self {
            input_boost_freq_lp_khz: DEFAULT_INPUT_BOOST_FREQ_LP_KHZ,
            input_boost_freq_hp_khz: DEFAULT_INPUT_BOOST_FREQ_HP_KHZ,
            general_boost_freq_lp_khz: DEFAULT_GENERAL_BOOST_FREQ_LP_KHZ,
            general_boost_freq_hp_khz: DEFAULT_GENERAL_BOOST_FREQ_HP_KHZ,
            remove_boost_freq_lp_khz: DEFAULT_REMOVE_BOOST_FREQ_LP_KHZ,
            remove_boost_freq_hp_khz: DEFAULT_REMOVE_BOOST_FREQ_HP_KHZ,
            input_boost_duration_ms: DEFAULT_INPUT_BOOST_DURATION_MS,
            wake_boost_duration_ms: DEFAULT_WAKE_BOOST_DURATION_MS,
        }
    }
}

impl Default for BoostTunables {
    fn default() -> Self {
        Self::defaults()
    }
}

static TUNABLES: IrqMutex<BoostTunables> = IrqMutex::new(BoostTunables::defaults());

/// Snapshot of the current tunables.
#[inline]
pub fn tunables() -> BoostTunables {
    *TUNABLES.lock()
}

/// Replace the whole tunable set.
pub fn set_tunables(new: BoostTunables) {
    *TUNABLES.lock() = new;
}

/// Restore compiled defaults.
pub fn reset_tunables() {
    set_tunables(BoostTunables::defaults());
}

fn parse_khz(value: &str) -> Option<u32> {
    value.parse::<u32>().ok()
}

/// Apply `cpu_boost.*` overrides from a kernel-style cmdline.
///
/// Unknown keys and unparsable values are ignored; partial overrides keep
/// the defaults for every key not mentioned.
pub fn apply_cmdline(cmdline: &str) {
    let mut tun = tunables();
    for token in cmdline.split_whitespace() {
        let Some(kv) = token.strip_prefix("cpu_boost.") else {
            continue;
        };
        let Some((key, value)) = kv.split_once('=') else {
            continue;
        };
        match key {
            "input_freq_lp" => {
                if let Some(v) = parse_khz(value) {
                    tun.input_boost_freq_lp_khz = v;
                }
            }
            "input_freq_hp" => {
                if let Some(v) = parse_khz(value) {
                    tun.input_boost_freq_hp_khz = v;
                }
            }
            "general_freq_lp" => {
                if let Some(v) = parse_khz(value) {
                    tun.general_boost_freq_lp_khz = v;
                }
            }
            "general_freq_hp" => {
                if let Some(v) = parse_khz(value) {
                    tun.general_boost_freq_hp_khz = v;
                }
            }
            "remove_freq_lp" => {
                if let Some(v) = parse_khz(value) {
                    tun.remove_boost_freq_lp_khz = v;
                }
            }
            "remove_freq_hp" => {
                if let Some(v) = parse_khz(value) {
                    tun.remove_boost_freq_hp_khz = v;
                }
            }
            "input_duration" => {
                if let Ok(v) = value.trim_end_matches("ms").parse::<u16>() {
                    tun.input_boost_duration_ms = v;
                }
            }
            "wake_duration" => {
                if let Ok(v) = value.trim_end_matches("ms").parse::<u32>() {
                    tun.wake_boost_duration_ms = v;
                }
            }
            _ => {}
        }
    }
    set_tunables(tun);
}
