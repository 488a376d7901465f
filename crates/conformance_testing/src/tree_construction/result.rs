//! Line by line comparison of tree dumps
use crate::tree_construction::reader::dump_lines;
use conformance_shared::errors::Error;
use conformance_shared::types::Result;
use std::fmt;

/// Outcome of comparing a single dump line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultStatus {
    /// Lines are equal
    Success,
    /// Actual line differs from the expected line
    Mismatch,
    /// Actual line has no expected counterpart
    Missing,
    /// Expected line was never produced
    Additional,
}

/// Comparison result of a single dump line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeLineResult {
    /// Logical line number in the dump (1-based)
    pub index: usize,
    pub result: ResultStatus,
    pub expected: String,
    pub actual: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestResult {
    pub tree_results: Vec<TreeLineResult>,
}

impl TestResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.tree_results
            .iter()
            .all(|line| line.result == ResultStatus::Success)
    }

    /// Turns a failed comparison into a test error holding the report
    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }

        Err(Error::Test(self.to_string()).into())
    }

    /// Returns all lines that did not match
    pub fn failures(&self) -> impl Iterator<Item = &TreeLineResult> {
        self.tree_results
            .iter()
            .filter(|line| line.result != ResultStatus::Success)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.tree_results {
            match line.result {
                ResultStatus::Success => writeln!(f, "  {:>3}  {}", line.index, line.actual)?,
                ResultStatus::Mismatch => {
                    writeln!(f, "- {:>3}  {}", line.index, line.expected)?;
                    writeln!(f, "+ {:>3}  {}", line.index, line.actual)?;
                }
                ResultStatus::Missing => writeln!(f, "+ {:>3}  {}", line.index, line.actual)?,
                ResultStatus::Additional => writeln!(f, "- {:>3}  {}", line.index, line.expected)?,
            }
        }

        Ok(())
    }
}

/// Compares an actual dump with the expected dump, logical line by logical line
#[must_use]
pub fn compare_dumps(expected: &str, actual: &str) -> TestResult {
    let expected = dump_lines(expected);
    let actual = dump_lines(actual);

    let mut result = TestResult::default();

    for (idx, actual_line) in actual.iter().enumerate() {
        let (status, expected_line) = match expected.get(idx) {
            Some(expected_line) if expected_line == actual_line => (ResultStatus::Success, expected_line.clone()),
            Some(expected_line) => (ResultStatus::Mismatch, expected_line.clone()),
            None => (ResultStatus::Missing, String::new()),
        };

        result.tree_results.push(TreeLineResult {
            index: idx + 1,
            result: status,
            expected: expected_line,
            actual: actual_line.clone(),
        });
    }

    for (idx, expected_line) in expected.iter().enumerate().skip(actual.len()) {
        result.tree_results.push(TreeLineResult {
            index: idx + 1,
            result: ResultStatus::Additional,
            expected: expected_line.clone(),
            actual: String::new(),
        });
    }

    result
}
