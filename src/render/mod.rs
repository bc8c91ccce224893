//! Rendering of outlines, reports and layouts.

mod json;

pub use json::{to_json, write_json, JsonFormat};
