// See https://github.com/html5lib/html5lib-tests/tree/master/tree-construction
use crate::escape::decode_escapes;
use crate::tree_construction::{ScriptDirective, TestCase};
use conformance_shared::errors::Error;
use conformance_shared::types::Result;
use log::{debug, trace, warn};
use serde::Deserialize;

const DATA: &str = "#data";
const ERRORS: &str = "#errors";
const NEW_ERRORS: &str = "#new-errors";
const DOCUMENT_FRAGMENT: &str = "#document-fragment";
const SCRIPT_OFF: &str = "#script-off";
const SCRIPT_ON: &str = "#script-on";
const XML_COERCION: &str = "#xml-coercion";
const IFRAME_SRCDOC: &str = "#iframe-srcdoc";
const DOCUMENT: &str = "#document";

/// Options for the fixture parser
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Decode `\xHH` and `\uHHHH` escapes in the data section
    pub decode_escapes: bool,
    /// Log a warning when an unknown line ends the sections of a test case
    pub warn_unknown_sections: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            decode_escapes: true,
            warn_unknown_sections: true,
        }
    }
}

impl ParserOptions {
    /// Reads parser options from a JSON object. Missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let options = serde_json::from_str(json).map_err(Error::Json)?;
        Ok(options)
    }
}

/// Parses all test cases found in the given fixture text, in fixture order
#[must_use]
pub fn parse_fixture(input: &str) -> Vec<TestCase> {
    parse_fixture_with_options(input, None)
}

/// Parses all test cases found in the given fixture text with the given options
#[must_use]
pub fn parse_fixture_with_options(input: &str, options: Option<ParserOptions>) -> Vec<TestCase> {
    let mut reader = FixtureReader::new(input, options.unwrap_or_default());

    let mut tests = Vec::new();
    while let Some(test) = reader.next_test() {
        tests.push(test);
    }

    debug!("parsed {} test cases from fixture", tests.len());
    tests
}

/// Returns true when the line starts a section
fn is_header(line: &str) -> bool {
    line.starts_with('#')
}

/// Trims only a single newline from the string, even if there are multiple newlines present.
fn trim_last_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
    }
    s
}

/// Line based cursor over a fixture
struct FixtureReader<'a> {
    lines: Vec<&'a str>,
    /// Index of the next line to read
    pos: usize,
    options: ParserOptions,
}

impl<'a> FixtureReader<'a> {
    fn new(input: &'a str, options: ParserOptions) -> Self {
        Self {
            lines: input.lines().collect(),
            pos: 0,
            options,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Reads the next test case, skipping everything up to the next `#data` line
    fn next_test(&mut self) -> Option<TestCase> {
        while self.peek()? != DATA {
            self.pos += 1;
        }
        self.pos += 1;

        let mut test = TestCase {
            line: self.pos,
            ..Default::default()
        };

        let data = self.read_data();
        self.read_sections(&mut test);

        test.data = if self.options.decode_escapes {
            decode_escapes(&data).into_owned()
        } else {
            data
        };

        debug!(
            "test case at line {}: {} errors, fragment: {:?}",
            test.line,
            test.errors.len(),
            test.document_fragment
        );
        Some(test)
    }

    /// Reads the data block. Each line keeps its newline, except for the very last one.
    fn read_data(&mut self) -> String {
        let mut data = String::new();
        while let Some(line) = self.peek() {
            if is_header(line) {
                break;
            }
            data.push_str(line);
            data.push('\n');
            self.pos += 1;
        }

        trim_last_newline(data)
    }

    /// Reads all lines up to the next section header
    fn read_section_lines(&mut self) -> Vec<&'a str> {
        let mut lines = Vec::new();
        while let Some(line) = self.peek() {
            if is_header(line) {
                break;
            }
            lines.push(line);
            self.pos += 1;
        }
        lines
    }

    /// Reads the expected document up to the next `#data` line. Trailing empty lines are
    /// dropped.
    fn read_document(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(line) = self.peek() {
            if line == DATA {
                break;
            }
            lines.push(line);
            self.pos += 1;
        }

        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    /// Reads the sections following the data block until `#document`, the end of the input, or
    /// a line that isn't a known section header.
    fn read_sections(&mut self, test: &mut TestCase) {
        while let Some(header) = self.peek() {
            trace!("section {header:?} at line {}", self.pos + 1);

            match header {
                ERRORS => {
                    self.pos += 1;
                    test.errors = self
                        .read_section_lines()
                        .into_iter()
                        .filter(|line| !line.is_empty())
                        .map(str::to_owned)
                        .collect();
                }
                NEW_ERRORS => {
                    self.pos += 1;
                    let discarded = self.read_section_lines();
                    trace!("skipping {} new-errors lines", discarded.len());
                }
                DOCUMENT_FRAGMENT => {
                    self.pos += 1;
                    if let Some(context) = self.peek().filter(|line| !is_header(line)) {
                        test.document_fragment = Some(context.trim().to_owned());
                        self.pos += 1;
                    }
                }
                SCRIPT_OFF => {
                    self.pos += 1;
                    test.script_directive = Some(ScriptDirective::ScriptOff);
                }
                SCRIPT_ON => {
                    self.pos += 1;
                    test.script_directive = Some(ScriptDirective::ScriptOn);
                }
                XML_COERCION => {
                    self.pos += 1;
                    test.xml_coercion = true;
                }
                IFRAME_SRCDOC => {
                    self.pos += 1;
                    test.iframe_srcdoc = true;
                }
                DOCUMENT => {
                    self.pos += 1;
                    test.document = self.read_document();
                    return;
                }
                _ => {
                    if header != DATA && self.options.warn_unknown_sections {
                        warn!(
                            "unknown section {header:?} at line {} ends test case at line {}",
                            self.pos + 1,
                            test.line
                        );
                    }
                    return;
                }
            }
        }
    }
}
