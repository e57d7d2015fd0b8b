//! Course Catalog Module
//! In-memory equivalency records with the department/course index and the
//! filters that drive the results table.

use super::record::{
    first_course_number, natural_sort_key, split_dept_and_number, EquivalencyRecord,
};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;

/// Shortest query the smart search will act on.
pub const MIN_SEARCH_CHARS: usize = 2;
/// Default cap on rows handed to the table.
pub const MAX_DISPLAY_RESULTS: usize = 2000;
/// Titles in the course selector are cut to this many characters.
const MAX_TITLE_LEN: usize = 40;

/// Words never treated as department codes.
const STOP_WORDS: [&str; 12] = [
    "DE", "LA", "OF", "AND", "THE", "FOR", "IN", "ON", "AT", "TO", "A", "AN",
];

static CID_QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,5})[\s-]+(\d+[A-Z]?)\s*(.*)$").expect("CID_QUERY_REGEX must compile")
});

static DEPT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}$").expect("DEPT_CODE_REGEX must compile"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_REGEX must compile"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No courses found for this department")]
    NoDepartmentCourses,
    #[error("Course not found")]
    CourseNotFound,
    #[error("Type at least {} characters to search", MIN_SEARCH_CHARS)]
    QueryTooShort,
    #[error("No results for \"{0}\"")]
    NoMatches(String),
}

/// A home-institution course that has a C-ID and a parseable number.
#[derive(Debug, Clone)]
struct LocalCourse {
    dept: String,
    number: String,
    cid: String,
    title: String,
}

/// Uppercased search fields for one record.
#[derive(Debug, Clone)]
struct SearchFields {
    institution: String,
    dept: String,
    title: String,
}

impl SearchFields {
    fn from_record(record: &EquivalencyRecord) -> Self {
        Self {
            institution: record.institution.to_uppercase(),
            dept: WHITESPACE_REGEX
                .replace_all(&record.local_course.to_uppercase(), " ")
                .into_owned(),
            title: record.local_titles.to_uppercase(),
        }
    }
}

/// One entry of the course selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOption {
    /// First course number, used for lookups.
    pub number: String,
    /// Number text as it appears in the file, e.g. `6A + BIOL 6C`.
    pub full_number: String,
    pub cid: String,
    pub label: String,
}

impl CourseOption {
    fn new(number: &str, full_number: &str, cid: &str, title: &str) -> Self {
        let title = title.trim();
        let short = if title.chars().count() > MAX_TITLE_LEN {
            format!("{}...", title.chars().take(MAX_TITLE_LEN).collect::<String>())
        } else {
            title.to_string()
        };

        let label = match (cid.is_empty(), short.is_empty()) {
            (false, false) => format!("{} ({}) :: {}", number, cid, short),
            (false, true) => format!("{} ({})", number, cid),
            (true, false) => format!("{} :: {}", number, short),
            (true, true) => number.to_string(),
        };

        Self {
            number: number.to_string(),
            full_number: full_number.to_string(),
            cid: cid.to_string(),
            label,
        }
    }
}

/// Columns of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Cid,
    School,
    Dept,
    Number,
    Title,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Cid,
        SortColumn::School,
        SortColumn::Dept,
        SortColumn::Number,
        SortColumn::Title,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Cid => "C-ID",
            SortColumn::School => "School",
            SortColumn::Dept => "Dept",
            SortColumn::Number => "Number",
            SortColumn::Title => "Title",
        }
    }

    /// Cell text of this column for a record.
    pub fn cell(&self, record: &EquivalencyRecord) -> String {
        match self {
            SortColumn::Cid => record.cid.trim().to_string(),
            SortColumn::School => record.institution.trim().to_string(),
            SortColumn::Dept => record.split_local_course().0,
            SortColumn::Number => record.split_local_course().1,
            SortColumn::Title => record.local_titles.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "⬆",
            SortDirection::Descending => "⬇",
        }
    }
}

/// Rows matching a selection or search, capped for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub label: String,
    pub rows: Vec<EquivalencyRecord>,
    pub total: usize,
    pub unique_cids: usize,
    /// Set when `rows` was cut down to this many.
    pub truncated_to: Option<usize>,
}

impl ResultSet {
    pub fn new(label: impl Into<String>, mut rows: Vec<EquivalencyRecord>, cap: usize) -> Self {
        let total = rows.len();
        let unique_cids = rows.iter().map(|r| r.cid.as_str()).collect::<HashSet<_>>().len();
        let truncated_to = if total > cap {
            rows.truncate(cap);
            Some(cap)
        } else {
            None
        };

        Self {
            label: label.into(),
            rows,
            total,
            unique_cids,
            truncated_to,
        }
    }

    /// Status line text, e.g. `Found 2 C-ID(s), 14 course(s)`.
    pub fn summary(&self) -> String {
        let base = format!("Found {} C-ID(s), {} course(s)", self.unique_cids, self.total);
        match self.truncated_to {
            Some(cap) => format!("{} - Showing first {}", base, cap),
            None => base,
        }
    }

    /// Stable sort of the displayed rows on one column.
    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        self.rows.sort_by(|a, b| {
            let ord = column.cell(a).cmp(&column.cell(b));
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
}

/// All loaded records plus the home-institution course index.
pub struct Catalog {
    records: Vec<EquivalencyRecord>,
    search_fields: Vec<SearchFields>,
    courses: Vec<LocalCourse>,
    home: Option<String>,
    max_results: usize,
}

impl Catalog {
    /// Build the catalog. With no home institution every record is local.
    pub fn new(records: Vec<EquivalencyRecord>, home: Option<String>, max_results: usize) -> Self {
        let home = home.filter(|h| !h.trim().is_empty());

        let courses = records
            .iter()
            .filter(|r| home.as_deref().map_or(true, |h| r.is_home(h)))
            .filter(|r| !r.cid.trim().is_empty())
            .filter_map(|r| {
                let (dept, number) = split_dept_and_number(&r.local_course);
                if dept.is_empty() || number.is_empty() {
                    return None;
                }
                Some(LocalCourse {
                    dept,
                    number,
                    cid: r.cid.trim().to_string(),
                    title: r.local_titles.clone(),
                })
            })
            .collect();

        let search_fields = records.iter().map(SearchFields::from_record).collect();

        Self {
            records,
            search_fields,
            courses,
            home,
            max_results,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn home(&self) -> Option<&str> {
        self.home.as_deref()
    }

    /// Number of home courses that can be picked from the selectors.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn is_home(&self, record: &EquivalencyRecord) -> bool {
        self.home.as_deref().is_some_and(|h| record.is_home(h))
    }

    /// Sorted distinct departments of the home courses.
    pub fn departments(&self) -> Vec<String> {
        self.courses
            .iter()
            .map(|c| c.dept.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// One option per distinct first course number in `dept`, naturally sorted.
    pub fn courses_in(&self, dept: &str) -> Vec<CourseOption> {
        let mut seen: HashMap<String, CourseOption> = HashMap::new();
        for course in self.courses.iter().filter(|c| c.dept == dept) {
            let first = first_course_number(&course.number);
            if first.is_empty() || seen.contains_key(first) {
                continue;
            }
            seen.insert(
                first.to_string(),
                CourseOption::new(first, &course.number, &course.cid, &course.title),
            );
        }

        let mut options: Vec<CourseOption> = seen.into_values().collect();
        options.sort_by(|a, b| {
            natural_sort_key(&a.number)
                .cmp(&natural_sort_key(&b.number))
                .then_with(|| a.number.cmp(&b.number))
        });
        options
    }

    /// Every record sharing a C-ID with any home course in `dept`.
    pub fn department_equivalents(&self, dept: &str) -> Result<ResultSet, LookupError> {
        let cids: HashSet<&str> = self
            .courses
            .iter()
            .filter(|c| c.dept == dept)
            .map(|c| c.cid.as_str())
            .collect();
        if cids.is_empty() {
            return Err(LookupError::NoDepartmentCourses);
        }

        // Every indexed C-ID comes from a loaded row, so this is never empty
        let rows = self.rows_with_cids(&cids);
        Ok(ResultSet::new(
            format!("{} Department", dept),
            rows,
            self.max_results,
        ))
    }

    /// Every record sharing a C-ID with the home course `dept number`.
    ///
    /// `number` matches combined courses by their first number, so `6A`
    /// also finds `6A + BIOL 6C`.
    pub fn course_equivalents(&self, dept: &str, number: &str) -> Result<ResultSet, LookupError> {
        let spaced = format!("{} ", number);
        let plussed = format!("{}+", number);
        let cids: HashSet<&str> = self
            .courses
            .iter()
            .filter(|c| c.dept == dept)
            .filter(|c| {
                c.number == number || c.number.starts_with(&spaced) || c.number.starts_with(&plussed)
            })
            .map(|c| c.cid.as_str())
            .collect();
        if cids.is_empty() {
            return Err(LookupError::CourseNotFound);
        }

        // Every indexed C-ID comes from a loaded row, so this is never empty
        let rows = self.rows_with_cids(&cids);
        Ok(ResultSet::new(
            format!("{} {}", dept, number),
            rows,
            self.max_results,
        ))
    }

    fn rows_with_cids(&self, cids: &HashSet<&str>) -> Vec<EquivalencyRecord> {
        self.records
            .iter()
            .filter(|r| cids.contains(r.cid.trim()))
            .cloned()
            .collect()
    }

    /// Free-text search over C-IDs, departments, institutions and titles.
    pub fn search(&self, query: &str) -> Result<ResultSet, LookupError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_CHARS {
            return Err(LookupError::QueryTooShort);
        }
        let upper = query.to_uppercase();
        let label = format!("\"{}\"", query);

        if let Some(rows) = self.search_by_cid(&upper) {
            if rows.is_empty() {
                return Err(LookupError::NoMatches(query.to_string()));
            }
            return Ok(ResultSet::new(label, self.home_first(rows), self.max_results));
        }

        let keywords: Vec<&str> = upper.split_whitespace().collect();
        let (institution_kws, other_kws): (Vec<&str>, Vec<&str>) = keywords
            .into_iter()
            .partition(|kw| self.search_fields.iter().any(|f| f.institution.contains(*kw)));

        let mut matched: Vec<usize> = (0..self.records.len())
            .filter(|&i| {
                institution_kws
                    .iter()
                    .all(|kw| self.search_fields[i].institution.contains(kw))
            })
            .collect();

        let mut dept_filters: Vec<Regex> = Vec::new();
        let mut title_kws: Vec<&str> = Vec::new();
        for kw in other_kws {
            if DEPT_CODE_REGEX.is_match(kw) && !STOP_WORDS.contains(&kw) {
                let Ok(dept_re) = Regex::new(&format!(r"\b{}", regex::escape(kw))) else {
                    continue;
                };
                let dept_count = matched
                    .iter()
                    .filter(|&&i| dept_re.is_match(&self.search_fields[i].dept))
                    .count();
                let title_count = matched
                    .iter()
                    .filter(|&&i| self.search_fields[i].title.contains(kw))
                    .count();

                if dept_count > 0 && title_count < dept_count * 10 {
                    dept_filters.push(dept_re);
                } else {
                    title_kws.push(kw);
                }
            } else {
                title_kws.push(kw);
            }
        }

        matched.retain(|&i| {
            let fields = &self.search_fields[i];
            dept_filters.iter().all(|re| re.is_match(&fields.dept))
                && title_kws.iter().all(|kw| fields.title.contains(kw))
        });
        if matched.is_empty() {
            return Err(LookupError::NoMatches(query.to_string()));
        }

        let rows = if institution_kws.is_empty() {
            // Widen to every institution offering a matched C-ID
            let cids: HashSet<&str> = matched
                .iter()
                .map(|&i| self.records[i].cid.trim())
                .filter(|c| !c.is_empty())
                .collect();
            self.home_first(self.rows_with_cids(&cids))
        } else {
            matched.iter().map(|&i| self.records[i].clone()).collect()
        };

        let rows = dedup_rows(rows);
        if rows.is_empty() {
            return Err(LookupError::NoMatches(query.to_string()));
        }
        Ok(ResultSet::new(label, rows, self.max_results))
    }

    /// Rows whose C-ID contains `DEPT NUM` when the query looks like a C-ID.
    fn search_by_cid(&self, upper: &str) -> Option<Vec<EquivalencyRecord>> {
        let caps = CID_QUERY_REGEX.captures(upper)?;
        let cid_query = format!("{} {}", &caps[1], &caps[2]);
        let extra: Vec<&str> = caps
            .get(3)
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();

        let rows: Vec<EquivalencyRecord> = self
            .records
            .iter()
            .zip(&self.search_fields)
            .filter(|(r, _)| r.cid.to_uppercase().contains(&cid_query))
            .filter(|(_, f)| {
                extra
                    .iter()
                    .all(|kw| f.institution.contains(kw) || f.title.contains(kw))
            })
            .map(|(r, _)| r.clone())
            .collect();

        // Extra words may filter to nothing; only an empty C-ID match falls through
        let any_cid = self
            .records
            .iter()
            .any(|r| r.cid.to_uppercase().contains(&cid_query));
        any_cid.then_some(rows)
    }

    /// Home-institution rows first, otherwise in original order.
    fn home_first(&self, mut rows: Vec<EquivalencyRecord>) -> Vec<EquivalencyRecord> {
        rows.sort_by(|a, b| match (self.is_home(a), self.is_home(b)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        });
        rows
    }
}

fn dedup_rows(rows: Vec<EquivalencyRecord>) -> Vec<EquivalencyRecord> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "De Anza College";

    fn rec(cid: &str, institution: &str, title: &str, course: &str) -> EquivalencyRecord {
        EquivalencyRecord::new(cid, "", institution, title, course)
    }

    fn sample() -> Vec<EquivalencyRecord> {
        vec![
            rec("ACCT 110", HOME, "Financial Accounting", "ACCT 1A"),
            rec("ACCT 110", "Foothill College", "Financial Accounting I", "ACTG 1A"),
            rec("ACCT 120", HOME, "Managerial Accounting", "ACCT 1B"),
            rec("ACCT 120", "Hartnell College", "Managerial Accounting", "ACC 2"),
            rec("BIOL 110B", HOME, "Human Anatomy", "BIOL 40A"),
            rec("BIOL 120B", HOME, "Human Physiology", "BIOL 6A + BIOL 6C"),
            rec("BIOL 110B", "Hartnell College", "Human Anatomy", "BIO 5"),
            rec("BIOL 120B", "Foothill College", "Physiology", "BIOL 41"),
            rec("COMP 122", HOME, "Programming Concepts and Methodology I", "CIS 22A"),
            rec("COMP 122", "Foothill College", "Intro to Programming", "CS 1A"),
            rec("", HOME, "Special Topics", "ACCT 99"),
            rec("MATH 210", HOME, "Calculus I", "Independent Study"),
        ]
    }

    fn catalog() -> Catalog {
        Catalog::new(sample(), Some(HOME.to_string()), MAX_DISPLAY_RESULTS)
    }

    #[test]
    fn departments_are_distinct_home_departments() {
        assert_eq!(catalog().departments(), vec!["ACCT", "BIOL", "CIS"]);
    }

    #[test]
    fn departments_without_home_cover_all_records() {
        let catalog = Catalog::new(sample(), None, MAX_DISPLAY_RESULTS);
        let expected: BTreeSet<String> = sample()
            .iter()
            .filter(|r| !r.cid.is_empty())
            .map(|r| r.split_local_course().0)
            .filter(|d| !d.is_empty())
            .collect();
        assert_eq!(
            catalog.departments(),
            expected.into_iter().collect::<Vec<_>>()
        );
        assert!(catalog.departments().contains(&"ACTG".to_string()));
    }

    #[test]
    fn blank_home_behaves_like_none() {
        let catalog = Catalog::new(sample(), Some("  ".to_string()), MAX_DISPLAY_RESULTS);
        assert!(catalog.home().is_none());
        assert!(catalog.departments().contains(&"CS".to_string()));
    }

    #[test]
    fn courses_narrow_to_department() {
        let catalog = catalog();
        let numbers: Vec<String> = catalog
            .courses_in("BIOL")
            .into_iter()
            .map(|c| c.number)
            .collect();
        assert_eq!(numbers, vec!["6A", "40A"]);
        assert!(catalog.courses_in("MATH").is_empty());
    }

    #[test]
    fn course_labels_carry_cid_and_title() {
        let options = catalog().courses_in("BIOL");
        assert_eq!(options[0].label, "6A (BIOL 120B) :: Human Physiology");
        assert_eq!(options[0].full_number, "6A + BIOL 6C");

        let cis = catalog().courses_in("CIS");
        assert_eq!(
            cis[0].label,
            "22A (COMP 122) :: Programming Concepts and Methodology I"
        );
    }

    #[test]
    fn long_titles_are_truncated() {
        let option = CourseOption::new("1", "1", "X 1", &"A".repeat(45));
        assert_eq!(option.label, format!("1 (X 1) :: {}...", "A".repeat(40)));
        assert_eq!(CourseOption::new("1", "1", "", "").label, "1");
    }

    #[test]
    fn department_view_spans_institutions() {
        let result = catalog().department_equivalents("ACCT").unwrap();
        assert_eq!(result.label, "ACCT Department");
        assert_eq!(result.total, 4);
        assert_eq!(result.unique_cids, 2);
        assert!(result.rows.iter().any(|r| r.institution == "Hartnell College"));
        assert!(result.rows.iter().all(|r| r.cid.starts_with("ACCT")));
    }

    #[test]
    fn course_view_matches_cid_across_institutions() {
        let result = catalog().course_equivalents("ACCT", "1A").unwrap();
        assert_eq!(result.label, "ACCT 1A");
        assert_eq!(
            result
                .rows
                .iter()
                .map(|r| r.institution.as_str())
                .collect::<Vec<_>>(),
            vec![HOME, "Foothill College"]
        );
        assert!(result.rows.iter().all(|r| r.cid == "ACCT 110"));
    }

    #[test]
    fn course_view_matches_combined_numbers() {
        let result = catalog().course_equivalents("BIOL", "6A").unwrap();
        assert_eq!(result.total, 2);
        assert!(result.rows.iter().all(|r| r.cid == "BIOL 120B"));
    }

    #[test]
    fn unknown_selection_is_an_error() {
        let catalog = catalog();
        assert_eq!(
            catalog.department_equivalents("MATH").unwrap_err(),
            LookupError::NoDepartmentCourses
        );
        assert_eq!(
            catalog.course_equivalents("ACCT", "7").unwrap_err(),
            LookupError::CourseNotFound
        );
    }

    #[test]
    fn results_are_capped() {
        let catalog = Catalog::new(sample(), Some(HOME.to_string()), 3);
        let result = catalog.department_equivalents("BIOL").unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.total, 4);
        assert_eq!(
            result.summary(),
            "Found 2 C-ID(s), 4 course(s) - Showing first 3"
        );
    }

    #[test]
    fn summary_without_cap() {
        let result = catalog().course_equivalents("ACCT", "1B").unwrap();
        assert_eq!(result.summary(), "Found 1 C-ID(s), 2 course(s)");
    }

    #[test]
    fn sorting_toggles_direction() {
        let mut result = catalog().department_equivalents("ACCT").unwrap();
        result.sort_by(SortColumn::School, SortDirection::Ascending);
        assert_eq!(result.rows[0].institution, HOME);
        assert_eq!(result.rows[3].institution, "Hartnell College");

        result.sort_by(SortColumn::School, SortDirection::Descending);
        assert_eq!(result.rows[0].institution, "Hartnell College");

        result.sort_by(SortColumn::Number, SortDirection::Ascending);
        assert_eq!(SortColumn::Number.cell(&result.rows[0]), "1A");
    }

    #[test]
    fn short_query_is_rejected() {
        assert_eq!(catalog().search(" a ").unwrap_err(), LookupError::QueryTooShort);
    }

    #[test]
    fn cid_query_puts_home_first() {
        let result = catalog().search("biol 110").unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.rows[0].institution, HOME);
        assert!(result.rows.iter().all(|r| r.cid == "BIOL 110B"));
    }

    #[test]
    fn cid_query_with_extra_words_filters() {
        let result = catalog().search("ACCT-110 foothill").unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.rows[0].institution, "Foothill College");
    }

    #[test]
    fn institution_keyword_limits_schools() {
        let result = catalog().search("anatomy hartnell").unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.rows[0].local_course, "BIO 5");
    }

    #[test]
    fn title_keywords_widen_to_all_institutions() {
        let result = catalog().search("human physiology").unwrap();
        assert_eq!(result.unique_cids, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.rows[0].institution, HOME);
        assert!(result.rows.iter().any(|r| r.local_titles == "Physiology"));
    }

    #[test]
    fn department_keyword_matches_word_start() {
        let result = catalog().search("CIS").unwrap();
        assert!(result.rows.iter().all(|r| r.cid == "COMP 122"));
        assert_eq!(result.total, 2);
    }

    #[test]
    fn unmatched_query_reports_no_results() {
        assert_eq!(
            catalog().search("xylophone").unwrap_err(),
            LookupError::NoMatches("xylophone".to_string())
        );
    }

    #[test]
    fn unknown_short_keyword_filters_everything_out() {
        for query in ["zzzz", "BIOX", "acct zzzz"] {
            assert_eq!(
                catalog().search(query).unwrap_err(),
                LookupError::NoMatches(query.to_string())
            );
        }
    }

    #[test]
    fn cid_query_with_unmatched_extra_words_reports_no_results() {
        assert_eq!(
            catalog().search("ACCT 110 zzzz").unwrap_err(),
            LookupError::NoMatches("ACCT 110 zzzz".to_string())
        );
    }

    #[test]
    fn duplicate_rows_are_removed() {
        let mut records = sample();
        records.push(rec("ACCT 110", "Foothill College", "Financial Accounting I", "ACTG 1A"));
        let catalog = Catalog::new(records, Some(HOME.to_string()), MAX_DISPLAY_RESULTS);
        let result = catalog.search("financial").unwrap();
        assert_eq!(result.total, 2);
    }
}
