//! Typed readings parsed from tegrastats lines

pub mod cpu;
pub mod gpu;
pub mod memory;
