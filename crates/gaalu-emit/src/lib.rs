//! # gaalu-emit
//!
//! Lowering pipeline for the GAALU generator.
//!
//! Turns a product table from `gaalu-core` into:
//! - An ordered, deterministic sequence of signed multiply-accumulate
//!   micro-ops (one group per output lane)
//! - SystemVerilog text for the hardware arithmetic unit, in both the
//!   full 32-lane form and the even 16-lane form
//! - The Q5.11 fixed-point codec shared with the hardware testbench

pub mod fixed;
pub mod microop;
pub mod sv;

pub use microop::{AccDir, MicroOp};
