//! Small utilities shared by the route line crates: logging setup, JSON files, and formatting.

pub mod logger;

mod io;
mod utils;

pub use crate::io::{from_json, read_json, to_json, write_json};
pub use crate::utils::{elapsed_seconds, prettyprint_time, prettyprint_usize};
