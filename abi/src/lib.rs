//! Slingshot Shared ABI Types
//!
//! This crate provides the canonical definitions for all types shared between
//! the boost coordinator and its collaborators (the frequency-policy engine,
//! the input subsystem, the display power subsystem). Having a single source
//! of truth eliminates:
//! - Duplicate type definitions
//! - Shape mismatches between the coordinator and the host kernel
//! - The need for unsafe conversions at the collaborator boundary
//!
//! Types that cross the host boundary are `#[repr(C)]`/`#[repr(u8)]` for
//! stability.

#![no_std]
#![forbid(unsafe_code)]

pub mod boost;
pub mod cpufreq;
pub mod display;
pub mod error;
pub mod input;

pub use boost::*;
pub use cpufreq::*;
pub use display::*;
pub use error::*;
pub use input::*;
