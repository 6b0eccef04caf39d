#![no_std]

// Portable control logic for the glow panel: per-channel moving-average
// filters, lamp timing state machines, and the activation-order gesture
// that resets the whole array.
//
// This crate stays portable across MCU firmware and host tooling by avoiding
// the Rust standard library. Hardware access is injected through the
// `SensorReader` and `LampDriver` capability traits so the tick logic can be
// exercised with scripted samples and synthetic clocks.

pub mod config;
pub mod controller;
pub mod event;
pub mod filter;
pub mod gesture;
pub mod lamp;
pub mod time;
