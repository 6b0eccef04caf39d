//! Hardware access kept out of the portable control logic.

pub mod sensors;
