//! Tokenizer fixtures and the collector that turns tokenizer output into fixture tokens
//!
//! See <https://github.com/html5lib/html5lib-tests/tree/master/tokenizer> for the fixture format.

pub mod collector;
pub mod fixture;
pub mod test_token;
pub mod token;

pub use collector::TokenCollector;
pub use fixture::{parse_tokenizer_fixture, InitialState, TokenizerError, TokenizerTest};
pub use test_token::{coalesce_characters, TestToken};
pub use token::Token;

/// Receives tokens in the order they are emitted by a tokenizer
pub trait TokenSink {
    fn process_token(&mut self, token: Token);
}
