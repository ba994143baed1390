//! Tests for the lock-free boost state.
//!
//! Covers: atomic bit set/clear totality, the longest-deadline-wins merge
//! (no request may shorten a boost already in flight), and the per-class
//! bit mappings the unboost path relies on.

use slingshot_abi::{BoostClass, BoostFlags};
use slingshot_lib::testing::TestResult;
use slingshot_lib::{assert_eq_test, assert_test, pass};

use crate::state::{BoostState, DeadlineCell};

pub fn test_fresh_state_is_clear() -> TestResult {
    let state = BoostState::new();
    assert_eq_test!(state.read(), BoostFlags::empty(), "fresh state word");
    pass!()
}

pub fn test_set_and_clear_bits() -> TestResult {
    let state = BoostState::new();

    state.set_bits(BoostFlags::SCREEN_AWAKE);
    state.set_bits(BoostFlags::INPUT_BOOST.union(BoostFlags::MAX_BOOST));

    let flags = state.read();
    assert_test!(flags.contains(BoostFlags::SCREEN_AWAKE), "SCREEN_AWAKE set");
    assert_test!(flags.contains(BoostFlags::INPUT_BOOST), "INPUT_BOOST set");
    assert_test!(flags.contains(BoostFlags::MAX_BOOST), "MAX_BOOST set");

    state.clear_bits(BoostFlags::INPUT_BOOST);
    let flags = state.read();
    assert_test!(!flags.contains(BoostFlags::INPUT_BOOST), "INPUT_BOOST cleared");
    assert_test!(flags.contains(BoostFlags::MAX_BOOST), "MAX_BOOST untouched");
    assert_test!(
        flags.contains(BoostFlags::SCREEN_AWAKE),
        "SCREEN_AWAKE untouched"
    );
    pass!()
}

pub fn test_clear_absent_bits_is_noop() -> TestResult {
    let state = BoostState::new();
    state.set_bits(BoostFlags::SCREEN_AWAKE);
    state.clear_bits(BoostFlags::ALL_BOOSTS);
    assert_eq_test!(state.read(), BoostFlags::SCREEN_AWAKE, "only awake bit remains");
    pass!()
}

pub fn test_extend_first_request_wins() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 500), "first extend wins");
    assert_eq_test!(cell.expires_at_ms(), 500, "deadline recorded");
    assert_eq_test!(cell.duration_ms(), 500, "duration recorded");
    pass!()
}

pub fn test_extend_longer_replaces() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 500));
    assert_test!(cell.extend(0, 1000), "longer request wins");
    assert_eq_test!(cell.expires_at_ms(), 1000);
    assert_eq_test!(cell.duration_ms(), 1000);
    pass!()
}

pub fn test_extend_shorter_rejected() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 1000));
    // At t=100 a 200ms request would expire at 300 — inside the active
    // boost, so it must not truncate it.
    assert_test!(!cell.extend(100, 200), "shorter request rejected");
    assert_eq_test!(cell.expires_at_ms(), 1000, "deadline unchanged");
    assert_eq_test!(cell.duration_ms(), 1000, "duration unchanged");
    pass!()
}

pub fn test_extend_equal_deadline_rejected() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 500));
    assert_test!(!cell.extend(0, 500), "same deadline does not re-arm");
    pass!()
}

pub fn test_extend_later_request_extends() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 500));
    // Same duration requested later in time reaches further: wins.
    assert_test!(cell.extend(400, 500));
    assert_eq_test!(cell.expires_at_ms(), 900);
    assert_eq_test!(cell.duration_ms(), 500);
    pass!()
}

pub fn test_extend_sequence_keeps_furthest() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 300));
    assert_test!(cell.extend(50, 600));
    assert_test!(!cell.extend(100, 200));
    assert_test!(!cell.extend(150, 400));
    assert_eq_test!(cell.expires_at_ms(), 650, "furthest deadline survives");
    assert_eq_test!(cell.duration_ms(), 600, "winner's duration survives");
    pass!()
}

pub fn test_deadline_reset() -> TestResult {
    let cell = DeadlineCell::new();
    assert_test!(cell.extend(0, 1000));
    cell.reset();
    assert_eq_test!(cell.expires_at_ms(), 0);
    assert_eq_test!(cell.duration_ms(), 0);
    assert_test!(cell.extend(0, 100), "extend works after reset");
    pass!()
}

pub fn test_class_bit_mappings() -> TestResult {
    assert_eq_test!(BoostClass::Input.boost_bit(), BoostFlags::INPUT_BOOST);
    assert_eq_test!(BoostClass::Max.boost_bit(), BoostFlags::MAX_BOOST);
    assert_eq_test!(BoostClass::General.boost_bit(), BoostFlags::GENERAL_BOOST);

    // A max unboost also retires the wake boost.
    let max_bits = BoostClass::Max.unboost_bits();
    assert_test!(max_bits.contains(BoostFlags::MAX_BOOST));
    assert_test!(max_bits.contains(BoostFlags::WAKE_BOOST));
    assert_eq_test!(BoostClass::Input.unboost_bits(), BoostFlags::INPUT_BOOST);
    assert_eq_test!(BoostClass::General.unboost_bits(), BoostFlags::GENERAL_BOOST);
    pass!()
}

pub fn test_state_deadline_lookup() -> TestResult {
    let state = BoostState::new();
    assert_test!(state.deadline(BoostClass::Input).is_none(), "input has no cell");
    assert_test!(state.deadline(BoostClass::Max).is_some());
    assert_test!(state.deadline(BoostClass::General).is_some());
    pass!()
}

slingshot_lib::define_test_suite!(
    state,
    [
        test_fresh_state_is_clear,
        test_set_and_clear_bits,
        test_clear_absent_bits_is_noop,
        test_extend_first_request_wins,
        test_extend_longer_replaces,
        test_extend_shorter_rejected,
        test_extend_equal_deadline_rejected,
        test_extend_later_request_extends,
        test_extend_sequence_keeps_furthest,
        test_deadline_reset,
        test_class_bit_mappings,
        test_state_deadline_lookup,
    ]
);
