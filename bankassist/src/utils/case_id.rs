//! Case identifiers of the form `CS-<year>-<nnn>`.

use chrono::{Datelike, Utc};
use rand::Rng;

const PREFIX: &str = "CS";

/// Formats a case identifier from a year and a sequence number.
///
/// ```
/// use bankassist::utils::format_case_id;
///
/// assert_eq!(format_case_id(2024, 7), "CS-2024-007");
/// ```
#[must_use]
pub fn format_case_id(year: i32, number: u32) -> String {
    format!("{PREFIX}-{year}-{number:03}")
}

/// Generates a case identifier for the current UTC year with a random suffix.
#[must_use]
pub fn generate_case_id() -> String {
    generate_case_id_with(&mut rand::thread_rng())
}

/// Generates a case identifier using the given random source.
#[must_use]
pub fn generate_case_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    format_case_id(Utc::now().year(), rng.gen_range(0..1000))
}

/// Returns true if `value` looks like a generated case identifier.
#[must_use]
pub fn is_case_id(value: &str) -> bool {
    let mut parts = value.split('-');
    let (Some(prefix), Some(year), Some(number), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == PREFIX
        && year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && number.len() >= 3
        && number.bytes().all(|b| b.is_ascii_digit())
}
