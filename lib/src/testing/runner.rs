//! Single-test execution with uniform logging.

use super::TestResult;
use crate::{klog_debug, klog_info};

/// Run one test function, logging the outcome.
///
/// Pass results stay quiet at the default log level; failures and skips
/// are always reported with the test's name.
pub fn run_single_test(name: &str, test: impl FnOnce() -> TestResult) -> TestResult {
    klog_debug!("TEST: {}", name);
    let result = test();
    match result {
        TestResult::Pass => {}
        TestResult::Skipped => klog_info!("TEST SKIP: {}", name),
        TestResult::Fail => klog_info!("TEST FAIL: {}", name),
    }
    result
}
