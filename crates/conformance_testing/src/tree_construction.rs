//! Tree construction fixtures
//!
//! See <https://github.com/html5lib/html5lib-tests/tree/master/tree-construction> for the
//! fixture format. A fixture is parsed into [`TestCase`] records; the tree produced by the
//! parser under test is rendered with [`dump_tree`] and compared against
//! [`TestCase::document`].

pub mod error_spec;
mod generator;
pub mod parser;
pub mod reader;
pub mod result;

use conformance_dom::{Namespace, Node};
use error_spec::ErrorSpec;
use result::TestResult;
use serde::{Deserialize, Serialize};

pub use generator::TreeOutputGenerator;
pub use parser::{parse_fixture, parse_fixture_with_options, ParserOptions};
pub use reader::{dump_lines, parse_dump, parse_fragment_dump};
pub use result::compare_dumps;

/// Scripting flag a test case must be parsed with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptDirective {
    ScriptOff,
    ScriptOn,
}

/// A single test case as found in a tree construction fixture
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestCase {
    /// Input for the parser, with escapes decoded
    pub data: String,
    /// Expected parse errors, in fixture order
    pub errors: Vec<String>,
    /// Expected tree dump
    pub document: String,
    /// Context element when this is a fragment parsing test
    pub document_fragment: Option<String>,
    pub script_directive: Option<ScriptDirective>,
    pub xml_coercion: bool,
    pub iframe_srcdoc: bool,
    /// Line number of the `#data` header in the fixture (1-based)
    pub line: usize,
}

impl TestCase {
    /// Returns the scripting flags this test must be run with
    #[must_use]
    pub fn script_modes(&self) -> &'static [bool] {
        match self.script_directive {
            Some(ScriptDirective::ScriptOff) => &[false],
            Some(ScriptDirective::ScriptOn) => &[true],
            None => &[false, true],
        }
    }

    #[must_use]
    pub fn is_fragment(&self) -> bool {
        self.document_fragment.is_some()
    }

    /// Splits the fragment context into its namespace and local name. A context of `svg path`
    /// is the SVG element `path`, plain names are HTML elements.
    #[must_use]
    pub fn fragment_context(&self) -> Option<(Namespace, &str)> {
        let context = self.document_fragment.as_deref()?;

        if let Some(name) = context.strip_prefix("svg ") {
            Some((Namespace::Svg, name))
        } else if let Some(name) = context.strip_prefix("math ") {
            Some((Namespace::MathMl, name))
        } else {
            Some((Namespace::Html, context))
        }
    }

    /// Expected errors with their location prefixes parsed
    #[must_use]
    pub fn error_specs(&self) -> Vec<ErrorSpec> {
        self.errors.iter().map(|line| ErrorSpec::parse(line)).collect()
    }

    /// Rebuilds the expected tree from the expected dump
    #[must_use]
    pub fn expected_tree(&self) -> Node {
        if self.is_fragment() {
            parse_fragment_dump(&self.document)
        } else {
            parse_dump(&self.document)
        }
    }

    /// Dumps the given tree and compares it line by line with the expected dump
    #[must_use]
    pub fn check_tree(&self, actual: &Node) -> TestResult {
        compare_dumps(&self.document, &dump_tree(actual))
    }
}

/// Renders the given tree in the canonical tree dump format
#[must_use]
pub fn dump_tree(root: &Node) -> String {
    TreeOutputGenerator::new(root).generate()
}
