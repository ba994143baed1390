//! Error types shared across the workspace.

/// Failure to register with a collaborator's notifier/handler table.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// The fixed-size registration table has no free slot.
    TableFull = 0,
}

/// Failure to bring up the boost coordinator.
///
/// Each variant names the collaborator whose registration failed so the
/// operator can tell which table was exhausted. Registrations acquired
/// before the failing one are released in reverse order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoostInitError {
    /// `boost_init` was called while the coordinator is already up.
    AlreadyInitialized,
    /// Registering the policy-adjust callback with the frequency-policy
    /// engine failed.
    Cpufreq(RegisterError),
    /// Registering the input handler failed.
    Input(RegisterError),
    /// Registering the display blank-notifier client failed.
    Display(RegisterError),
}
