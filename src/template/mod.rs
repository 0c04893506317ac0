//! Template language for output paths and filenames
//!
//! Users describe where a batch lands on disk with two small template
//! strings, one for the directory and one for the filename stem. At save
//! time each recognized token is replaced with a runtime value:
//!
//! ```text
//! %date    -> 2024-05-17
//! %time    -> 2024-05-17-093005
//! %seed    -> generation seed, or "unknown"
//! %model   -> model name, or "unknown"
//! %counter -> saves since process start
//! ```
//!
//! Resolution never fails: unrecognized tokens are left as-is.

mod context;
mod resolver;

pub use context::RunContext;
pub use resolver::{normalize_text, resolve, DATE_FORMAT, TIME_FORMAT};
