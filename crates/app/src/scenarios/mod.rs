//! The CRUD scenarios.
//!
//! Every scenario takes the run's [`SuiteContext`](crate::SuiteContext),
//! obtains its prerequisites from [`fixtures`](crate::fixtures) and stops at
//! the first failed check. Field checks of one response are reported together.

pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;
