//! Small shared helpers: timestamps and case identifiers.

mod case_id;
mod timestamps;

pub use case_id::{format_case_id, generate_case_id, generate_case_id_with, is_case_id};
pub use timestamps::{iso_timestamp, round_tenths};
