//! Equivalency Record Module
//! One row of the C-ID file plus the helpers that pick apart its course text.

use regex::Regex;
use std::sync::LazyLock;

/// Header names every input file must carry, in display order.
pub const COL_CID: &str = "C-ID #";
pub const COL_DESCRIPTOR: &str = "C-ID Descriptor";
pub const COL_INSTITUTION: &str = "Institution";
pub const COL_TITLES: &str = "Local Course Title(s)";
pub const COL_LOCAL_COURSE: &str = "Local Dept. Name & Number";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_CID,
    COL_DESCRIPTOR,
    COL_INSTITUTION,
    COL_TITLES,
    COL_LOCAL_COURSE,
];

/// Department letters, then the course number starting at the first digit.
static LOCAL_COURSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z\s]+?)\s+([0-9].*)$").expect("LOCAL_COURSE_REGEX must compile")
});

/// A single course equivalency row. Null cells are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EquivalencyRecord {
    pub cid: String,
    pub descriptor: String,
    pub institution: String,
    pub local_titles: String,
    pub local_course: String,
}

impl EquivalencyRecord {
    pub fn new(
        cid: impl Into<String>,
        descriptor: impl Into<String>,
        institution: impl Into<String>,
        local_titles: impl Into<String>,
        local_course: impl Into<String>,
    ) -> Self {
        Self {
            cid: cid.into(),
            descriptor: descriptor.into(),
            institution: institution.into(),
            local_titles: local_titles.into(),
            local_course: local_course.into(),
        }
    }

    /// Split `Local Dept. Name & Number` into department and number.
    pub fn split_local_course(&self) -> (String, String) {
        split_dept_and_number(&self.local_course)
    }

    /// Whether this row belongs to the given home institution.
    pub fn is_home(&self, home: &str) -> bool {
        !home.is_empty() && self.institution.to_uppercase().contains(&home.to_uppercase())
    }
}

/// `"ACCT 1A"` -> `("ACCT", "1A")`, `"C D 1"` -> `("C D", "1")`.
///
/// Text that does not look like a department followed by a number comes
/// back as `("", text)`.
pub fn split_dept_and_number(course: &str) -> (String, String) {
    let course = course.trim();
    if course.is_empty() {
        return (String::new(), String::new());
    }

    match LOCAL_COURSE_REGEX.captures(course) {
        Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
        None => (String::new(), course.to_string()),
    }
}

/// First number of a combined course, `"6A + BIOL 6C"` -> `"6A"`.
pub fn first_course_number(number: &str) -> &str {
    number.split('+').next().unwrap_or_default().trim()
}

/// Sort key ordering course numbers as 1, 1A, 1B, 2, 6A, 10, 40A.
pub fn natural_sort_key(number: &str) -> (u64, String) {
    let number = number.trim();
    let digits_end = number
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(number.len());
    let value = number[..digits_end].parse().unwrap_or(0);
    (value, number[digits_end..].trim().to_string())
}
