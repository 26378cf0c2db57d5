//! Background tasks module
//! 
//! This module contains the scheduling plumbing behind the countdown clock.

pub mod scheduler;
pub(crate) mod tick;

// Re-export main types
pub use scheduler::Scheduler;
pub(crate) use tick::tick_task;
