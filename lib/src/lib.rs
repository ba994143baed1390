#![no_std]

pub mod clock;
pub mod cpumask;
pub mod hostcalls;
pub mod init_flag;
pub mod klog;
pub mod spinlock;
pub mod testing;

#[doc(hidden)]
pub use paste;

pub use cpumask::{
    CpuMask, MAX_CPUS, for_each_online_cpu, is_cpu_online, mark_cpu_offline, mark_cpu_online,
    online_cpus, reset_online_cpus,
};
pub use hostcalls::{HostCalls, clear_hostcalls, register_hostcalls};
pub use init_flag::{InitFlag, StateFlag};
pub use klog::{
    KlogLevel, klog_dropped_lines, klog_get_level, klog_register_backend, klog_set_level,
    klog_unregister_backend,
};
pub use spinlock::{IrqMutex, IrqMutexGuard};
