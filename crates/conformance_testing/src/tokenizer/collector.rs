use crate::tokenizer::test_token::TestToken;
use crate::tokenizer::token::Token;
use crate::tokenizer::TokenSink;
use conformance_shared::errors::Error;
use conformance_shared::types::Result;
use log::{debug, trace};

/// Collects tokens from a tokenizer into their fixture form, in emission order
#[derive(Debug, Default)]
pub struct TokenCollector {
    tokens: Vec<TestToken>,
    done: bool,
}

impl TokenCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tokens(&self) -> &[TestToken] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<TestToken> {
        self.tokens
    }

    /// Returns true once the EOF token has been seen
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the collected tokens as a JSON token list
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.tokens).map_err(Error::from)?)
    }
}

impl TokenSink for TokenCollector {
    fn process_token(&mut self, token: Token) {
        match TestToken::from_token(token) {
            Some(token) => {
                trace!("collected token: {token:?}");
                self.tokens.push(token);
            }
            None => {
                debug!("end of input reached after {} tokens", self.tokens.len());
                self.done = true;
            }
        }
    }
}

impl Extend<Token> for TokenCollector {
    fn extend<T: IntoIterator<Item = Token>>(&mut self, iter: T) {
        for token in iter {
            self.process_token(token);
        }
    }
}
