//! Integration tests for vmprobe
//!
//! These tests drive the components the way a session manager does.

#[path = "../common/mod.rs"]
pub mod common;

pub mod reconnect_flow;
pub mod recording_flow;
