#![no_std]

//! Aggregate test runner.
//!
//! Collects every suite descriptor in the workspace into [`ALL_SUITES`]
//! and walks them, accumulating a [`TestRunSummary`]. The host (or a
//! bring-up harness) decides when to run this — typically from a
//! dedicated test boot with `itests=on` on the cmdline.

use slingshot_lib::clock;
use slingshot_lib::klog_info;
pub use slingshot_lib::testing::{
    HARNESS_MAX_SUITES, TestConfig, TestRunSummary, TestSuiteDesc, TestSuiteResult, Verbosity,
    config_from_cmdline, measure_elapsed_ms,
};

pub const TESTS_MAX_SUITES: usize = HARNESS_MAX_SUITES;

/// Every suite in the workspace, leaves first so primitive failures show
/// up before the integration suite that depends on them.
pub static ALL_SUITES: [TestSuiteDesc; 5] = [
    slingshot_core::state_tests::STATE_SUITE,
    slingshot_core::timer_tests::TIMER_SUITE,
    slingshot_core::config_tests::CONFIG_SUITE,
    slingshot_core::policy_tests::POLICY_SUITE,
    slingshot_core::boost_tests::BOOST_SUITE,
];

/// Run `suites`, filling `summary`. Returns 0 when everything passed.
pub fn tests_run_all(
    config: &TestConfig,
    summary: &mut TestRunSummary,
    suites: &[TestSuiteDesc],
) -> i32 {
    *summary = TestRunSummary::default();

    if !config.enabled {
        klog_info!("TESTS: Harness disabled");
        return 0;
    }

    klog_info!("TESTS: Starting test suites");

    let start_ms = clock::monotonic_ms();
    for (idx, desc) in suites.iter().enumerate() {
        let suite_start_ms = clock::monotonic_ms();
        let mut res = TestSuiteResult {
            name: desc.name,
            ..Default::default()
        };

        if let Some(run) = desc.run {
            run(config, &mut res);
        }

        if config.timeout_ms != 0 {
            let elapsed = measure_elapsed_ms(suite_start_ms, clock::monotonic_ms());
            if elapsed > config.timeout_ms {
                res.timed_out = true;
                res.failed = res.failed.saturating_add(1);
                klog_info!("TESTS: suite timeout exceeded");
            }
        }

        if summary.suite_count < TESTS_MAX_SUITES {
            summary.suites[summary.suite_count] = res;
            summary.suite_count += 1;
        }

        klog_info!(
            "SUITE{} {} total={} pass={} fail={} elapsed={}ms",
            idx as u32,
            res.name,
            res.total,
            res.passed,
            res.failed,
            res.elapsed_ms,
        );
        summary.add_suite_result(&res);
    }

    let overall_ms = measure_elapsed_ms(start_ms, clock::monotonic_ms());
    if overall_ms > summary.elapsed_ms {
        summary.elapsed_ms = overall_ms;
    }

    klog_info!(
        "TESTS SUMMARY: total={} passed={} failed={} elapsed_ms={}",
        summary.total_tests,
        summary.passed,
        summary.failed,
        summary.elapsed_ms,
    );

    if summary.failed == 0 { 0 } else { -1 }
}

/// Run the built-in [`ALL_SUITES`] set.
pub fn run_builtin_suites(config: &TestConfig, summary: &mut TestRunSummary) -> i32 {
    tests_run_all(config, summary, &ALL_SUITES)
}
