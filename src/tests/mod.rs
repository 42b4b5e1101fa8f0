//! Internal test modules - whitebox tests with crate access
//!
//! End-to-end checks of the documented behaviour of both engines, and
//! snapshots of what the host prints.
