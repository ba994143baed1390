//! Tests for the tunable store and its cmdline parsing.

use slingshot_lib::testing::TestResult;
use slingshot_lib::{assert_eq_test, pass};

use crate::config::{BoostTunables, apply_cmdline, reset_tunables, set_tunables, tunables};

pub fn test_defaults_roundtrip() -> TestResult {
    reset_tunables();
    assert_eq_test!(tunables(), BoostTunables::defaults());
    pass!()
}

pub fn test_set_tunables_snapshot() -> TestResult {
    reset_tunables();
    let mut tun = tunables();
    tun.input_boost_freq_lp_khz = 999_000;
    set_tunables(tun);
    assert_eq_test!(tunables().input_boost_freq_lp_khz, 999_000);
    reset_tunables();
    pass!()
}

pub fn test_cmdline_overrides() -> TestResult {
    reset_tunables();
    apply_cmdline(
        "console=ttyS0 cpu_boost.input_freq_lp=900000 cpu_boost.input_duration=250ms \
         cpu_boost.wake_duration=1500 cpu_boost.remove_freq_hp=700000",
    );

    let tun = tunables();
    assert_eq_test!(tun.input_boost_freq_lp_khz, 900_000);
    assert_eq_test!(tun.input_boost_duration_ms, 250);
    assert_eq_test!(tun.wake_boost_duration_ms, 1_500);
    assert_eq_test!(tun.remove_boost_freq_hp_khz, 700_000);
    // Keys not mentioned keep their defaults.
    assert_eq_test!(
        tun.input_boost_freq_hp_khz,
        BoostTunables::defaults().input_boost_freq_hp_khz
    );
    reset_tunables();
    pass!()
}

pub fn test_cmdline_ignores_garbage() -> TestResult {
    reset_tunables();
    apply_cmdline("cpu_boost.bogus=1 cpu_boost.input_freq_hp=abc cpu_boost.nodelim foo=bar");
    assert_eq_test!(tunables(), BoostTunables::defaults(), "garbage leaves defaults");
    pass!()
}

pub fn test_cmdline_general_tables() -> TestResult {
    reset_tunables();
    apply_cmdline("cpu_boost.general_freq_lp=800000 cpu_boost.general_freq_hp=1200000");
    let tun = tunables();
    assert_eq_test!(tun.general_boost_freq_lp_khz, 800_000);
    assert_eq_test!(tun.general_boost_freq_hp_khz, 1_200_000);
    reset_tunables();
    pass!()
}

slingshot_lib::define_test_suite!(
    config,
    [
        test_defaults_roundtrip,
        test_set_tunables_snapshot,
        test_cmdline_overrides,
        test_cmdline_ignores_garbage,
        test_cmdline_general_tables,
    ]
);
