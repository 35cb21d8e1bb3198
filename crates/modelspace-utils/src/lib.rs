//! Small shared helpers for the modelspace crates.

pub mod case;
