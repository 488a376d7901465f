use crate::tokenizer::test_token::{decode_in_place, TestToken};
use conformance_shared::errors::Error;
use conformance_shared::types::{Position, Result};
use log::debug;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct TokenizerFixture {
    #[serde(default)]
    tests: Vec<TokenizerTest>,
}

/// Parse error expected by a tokenizer test
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenizerError {
    pub code: String,
    pub line: usize,
    pub col: usize,
}

impl TokenizerError {
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }
}

/// A single tokenizer test
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizerTest {
    pub description: String,
    pub input: String,
    pub output: Vec<TestToken>,
    #[serde(default)]
    pub errors: Vec<TokenizerError>,
    #[serde(default)]
    pub double_escaped: bool,
    /// Names of the states the tokenizer must be started in, each one a separate run
    #[serde(default = "default_initial_states")]
    pub initial_states: Vec<String>,
    pub last_start_tag: Option<String>,
}

fn default_initial_states() -> Vec<String> {
    vec![String::from("Data state")]
}

/// Tokenizer states a test can start in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialState {
    Data,
    Plaintext,
    RawText,
    RcData,
    ScriptData,
    CDataSection,
}

impl FromStr for InitialState {
    type Err = Error;

    fn from_str(state: &str) -> std::result::Result<Self, Self::Err> {
        match state {
            "Data state" => Ok(InitialState::Data),
            "PLAINTEXT state" => Ok(InitialState::Plaintext),
            "RAWTEXT state" => Ok(InitialState::RawText),
            "RCDATA state" => Ok(InitialState::RcData),
            "Script data state" => Ok(InitialState::ScriptData),
            "CDATA section state" => Ok(InitialState::CDataSection),
            _ => Err(Error::Fixture(format!("unknown initial state: {state}"))),
        }
    }
}

impl TokenizerTest {
    /// Resolves the initial state names of this test
    pub fn states(&self) -> Result<Vec<InitialState>> {
        let states = self
            .initial_states
            .iter()
            .map(|state| state.parse::<InitialState>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(states)
    }

    fn decode_escapes(&mut self) {
        decode_in_place(&mut self.input);
        for token in &mut self.output {
            token.decode_escapes();
        }
    }
}

/// Parses a tokenizer fixture file (`{"tests": [...]}`). Tests marked as double-escaped have
/// their input and expected output unescaped.
pub fn parse_tokenizer_fixture(input: &str) -> Result<Vec<TokenizerTest>> {
    let fixture: TokenizerFixture = serde_json::from_str(input).map_err(Error::from)?;

    let tests = fixture
        .tests
        .into_iter()
        .map(|mut test| {
            if test.double_escaped {
                test.decode_escapes();
            }
            debug!("tokenizer test: {}", test.description);
            test
        })
        .collect();

    Ok(tests)
}
