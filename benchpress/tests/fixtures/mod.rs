//! Bench files registered into the integration test binary.
//!
//! Each lives in its own source file so tests can select it by path.

pub mod focus;
pub mod hooks;
pub mod string_matching;
