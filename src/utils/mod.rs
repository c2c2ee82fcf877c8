// utils/mod.rs
pub mod drain;
#[cfg(feature = "python")]
pub(crate) mod py_to_json;
mod time;

pub use drain::{drain, drain_response};
#[cfg(feature = "python")]
pub(crate) use py_to_json::py_to_json;
pub(crate) use time::format_datetime;
