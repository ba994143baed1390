//! Tests for the minimum-frequency arbitration.
//!
//! All pure: a bounds record, a flag set, and the default tunables in, an
//! adjusted minimum out. The cluster split comes from the topology module,
//! configured per test.

use slingshot_abi::{BoostFlags, PolicyBounds};
use slingshot_lib::testing::TestResult;
use slingshot_lib::{CpuMask, assert_eq_test, pass};

use crate::config::BoostTunables;
use crate::policy::adjust;
use crate::topology;

const LP_CPU: u32 = 0;
const HP_CPU: u32 = 2;

fn setup_topology() {
    topology::set_lp_cluster(CpuMask::range(0, 2));
}

fn lp_bounds() -> PolicyBounds {
    PolicyBounds {
        cpu: LP_CPU,
        min_khz: 300_000,
        max_khz: 1_804_800,
        cpuinfo_min_khz: 300_000,
        cpuinfo_max_khz: 1_804_800,
    }
}

fn hp_bounds() -> PolicyBounds {
    PolicyBounds {
        cpu: HP_CPU,
        min_khz: 825_600,
        max_khz: 2_803_200,
        cpuinfo_min_khz: 825_600,
        cpuinfo_max_khz: 2_803_200,
    }
}

pub fn test_max_boost_pins_min_to_max() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();

    let mut bounds = lp_bounds();
    adjust(&mut bounds, BoostFlags::MAX_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, bounds.max_khz, "lp pinned to max");

    let mut bounds = hp_bounds();
    adjust(&mut bounds, BoostFlags::MAX_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, bounds.max_khz, "hp pinned to max");
    pass!()
}

pub fn test_max_boost_wins_over_input() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = hp_bounds();
    adjust(
        &mut bounds,
        BoostFlags::MAX_BOOST.union(BoostFlags::INPUT_BOOST),
        &tun,
    );
    assert_eq_test!(bounds.min_khz, bounds.max_khz);
    pass!()
}

pub fn test_input_boost_uses_lp_table() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = lp_bounds();
    adjust(&mut bounds, BoostFlags::INPUT_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, tun.input_boost_freq_lp_khz);
    pass!()
}

pub fn test_input_boost_uses_hp_table() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = hp_bounds();
    adjust(&mut bounds, BoostFlags::INPUT_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, tun.input_boost_freq_hp_khz);
    pass!()
}

pub fn test_general_boost_uses_general_table() -> TestResult {
    setup_topology();
    let mut tun = BoostTunables::defaults();
    tun.general_boost_freq_lp_khz = 960_000;
    tun.general_boost_freq_hp_khz = 1_209_600;

    let mut bounds = lp_bounds();
    adjust(&mut bounds, BoostFlags::GENERAL_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, 960_000);

    let mut bounds = hp_bounds();
    adjust(&mut bounds, BoostFlags::GENERAL_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, 1_209_600);
    pass!()
}

pub fn test_input_takes_precedence_over_general() -> TestResult {
    setup_topology();
    let mut tun = BoostTunables::defaults();
    tun.general_boost_freq_lp_khz = 960_000;

    let mut bounds = lp_bounds();
    adjust(
        &mut bounds,
        BoostFlags::INPUT_BOOST.union(BoostFlags::GENERAL_BOOST),
        &tun,
    );
    assert_eq_test!(
        bounds.min_khz,
        tun.input_boost_freq_lp_khz,
        "input table selected when both are active"
    );
    pass!()
}

pub fn test_boost_clamped_to_policy_max() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = lp_bounds();
    // Thermal pressure has capped this policy below the boost frequency.
    bounds.max_khz = 1_000_000;
    adjust(&mut bounds, BoostFlags::INPUT_BOOST, &tun);
    assert_eq_test!(bounds.min_khz, 1_000_000, "boost never exceeds max");
    pass!()
}

pub fn test_unboosted_floor_applies_removal_freq() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = lp_bounds();
    adjust(&mut bounds, BoostFlags::SCREEN_AWAKE, &tun);
    // Floor above the absolute minimum wins.
    assert_eq_test!(bounds.min_khz, tun.remove_boost_freq_lp_khz);
    pass!()
}

pub fn test_unboosted_floor_respects_cpuinfo_min() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = hp_bounds();
    adjust(&mut bounds, BoostFlags::SCREEN_AWAKE, &tun);
    // The hp cluster's absolute minimum sits above the configured floor.
    assert_eq_test!(bounds.min_khz, bounds.cpuinfo_min_khz);
    pass!()
}

pub fn test_wake_bit_alone_is_not_a_frequency_boost() -> TestResult {
    setup_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = lp_bounds();
    adjust(&mut bounds, BoostFlags::WAKE_BOOST, &tun);
    assert_eq_test!(
        bounds.min_khz,
        tun.remove_boost_freq_lp_khz,
        "wake bit without max boost falls through to the floor"
    );
    pass!()
}

pub fn test_unconfigured_topology_is_performance() -> TestResult {
    topology::reset_topology();
    let tun = BoostTunables::defaults();
    let mut bounds = lp_bounds();
    adjust(&mut bounds, BoostFlags::INPUT_BOOST, &tun);
    assert_eq_test!(
        bounds.min_khz,
        tun.input_boost_freq_hp_khz,
        "no lp mask configured: every cpu uses the hp table"
    );
    pass!()
}

slingshot_lib::define_test_suite!(
    policy,
    [
        test_max_boost_pins_min_to_max,
        test_max_boost_wins_over_input,
        test_input_boost_uses_lp_table,
        test_input_boost_uses_hp_table,
        test_general_boost_uses_general_table,
        test_input_takes_precedence_over_general,
        test_boost_clamped_to_policy_max,
        test_unboosted_floor_applies_removal_freq,
        test_unboosted_floor_respects_cpuinfo_min,
        test_wake_bit_alone_is_not_a_frequency_boost,
        test_unconfigured_topology_is_performance,
    ]
);
