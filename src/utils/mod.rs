//! Utility functions

mod naming;

pub use naming::sanitize_output_name;
