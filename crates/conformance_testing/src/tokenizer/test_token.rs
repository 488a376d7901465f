//! Tokens in the canonical form used by tokenizer fixtures
//!
//! A token is written as a JSON array, tagged by its first element:
//!
//! ```text
//! ["StartTag", name, {attributes}]          ["StartTag", name, {attributes}, true]
//! ["EndTag", name]                          ["Comment", data]
//! ["DOCTYPE", name, public_id, system_id, correctness]
//! ["Character", data]
//! ```
use crate::escape::decode_escapes;
use crate::tokenizer::token::Token;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Deserialize)]
enum TokenKind {
    StartTag,
    EndTag,
    Comment,
    #[serde(rename = "DOCTYPE")]
    Doctype,
    Character,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestToken {
    StartTag {
        name: String,
        attributes: BTreeMap<String, String>,
        /// Only written out when set
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Comment(String),
    Doctype {
        name: Option<String>,
        public_id: Option<String>,
        system_id: Option<String>,
        /// Inverse of the force-quirks flag
        correctness: bool,
    },
    Character(String),
}

impl TestToken {
    /// Converts a tokenizer token. The EOF token has no fixture form and returns `None`.
    #[must_use]
    pub fn from_token(token: Token) -> Option<Self> {
        let token = match token {
            Token::DocType {
                name,
                force_quirks,
                pub_identifier,
                sys_identifier,
            } => TestToken::Doctype {
                name,
                public_id: pub_identifier,
                system_id: sys_identifier,
                correctness: !force_quirks,
            },
            Token::StartTag {
                name,
                is_self_closing,
                attributes,
            } => TestToken::StartTag {
                name,
                // Later duplicates overwrite earlier ones
                attributes: attributes
                    .into_iter()
                    .map(|attr| (attr.name, attr.value.unwrap_or_default()))
                    .collect(),
                self_closing: is_self_closing,
            },
            Token::EndTag { name, .. } => TestToken::EndTag { name },
            Token::Comment { comment } => TestToken::Comment(comment),
            Token::Text { text } => TestToken::Character(text),
            Token::Eof => return None,
        };

        Some(token)
    }

    pub fn start_tag(name: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
        TestToken::StartTag {
            name: name.into(),
            attributes: attributes
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            self_closing: false,
        }
    }

    pub fn end_tag(name: impl Into<String>) -> Self {
        TestToken::EndTag { name: name.into() }
    }

    pub fn character(data: impl Into<String>) -> Self {
        TestToken::Character(data.into())
    }

    /// Resolves escapes in every string of the token, used for double-escaped fixtures
    pub(crate) fn decode_escapes(&mut self) {
        match self {
            TestToken::Character(data) | TestToken::Comment(data) => decode_in_place(data),
            TestToken::EndTag { name } => decode_in_place(name),
            TestToken::StartTag { name, attributes, .. } => {
                decode_in_place(name);
                *attributes = std::mem::take(attributes)
                    .into_iter()
                    .map(|(mut name, mut value)| {
                        decode_in_place(&mut name);
                        decode_in_place(&mut value);
                        (name, value)
                    })
                    .collect();
            }
            TestToken::Doctype {
                name,
                public_id,
                system_id,
                ..
            } => {
                for value in [name, public_id, system_id].into_iter().flatten() {
                    decode_in_place(value);
                }
            }
        }
    }
}

pub(crate) fn decode_in_place(value: &mut String) {
    let decoded = match decode_escapes(value) {
        Cow::Owned(decoded) => decoded,
        Cow::Borrowed(_) => return,
    };
    *value = decoded;
}

/// Merges runs of adjacent character tokens into single tokens. Fixtures list character data
/// this way, while tokenizers are free to emit it in pieces.
pub fn coalesce_characters(tokens: impl IntoIterator<Item = TestToken>) -> Vec<TestToken> {
    let mut result: Vec<TestToken> = Vec::new();

    for token in tokens {
        if let (Some(TestToken::Character(last)), TestToken::Character(data)) = (result.last_mut(), &token) {
            last.push_str(data);
            continue;
        }
        result.push(token);
    }

    result
}

impl Serialize for TestToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TestToken::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let mut seq = serializer.serialize_seq(Some(if *self_closing { 4 } else { 3 }))?;
                seq.serialize_element("StartTag")?;
                seq.serialize_element(name)?;
                seq.serialize_element(attributes)?;
                if *self_closing {
                    seq.serialize_element(&true)?;
                }
                seq.end()
            }
            TestToken::EndTag { name } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("EndTag")?;
                seq.serialize_element(name)?;
                seq.end()
            }
            TestToken::Comment(data) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("Comment")?;
                seq.serialize_element(data)?;
                seq.end()
            }
            TestToken::Doctype {
                name,
                public_id,
                system_id,
                correctness,
            } => {
                let mut seq = serializer.serialize_seq(Some(5))?;
                seq.serialize_element("DOCTYPE")?;
                seq.serialize_element(name)?;
                seq.serialize_element(public_id)?;
                seq.serialize_element(system_id)?;
                seq.serialize_element(correctness)?;
                seq.end()
            }
            TestToken::Character(data) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("Character")?;
                seq.serialize_element(data)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TestToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TokenVisitor;

        impl<'de> Visitor<'de> for TokenVisitor {
            type Value = TestToken;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("['TokenKind', ...]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut length = 0;

                macro_rules! next {
                    ($expected:expr) => {
                        match seq.next_element()? {
                            Some(value) => {
                                #[allow(unused_assignments)]
                                {
                                    length += 1;
                                }
                                value
                            }
                            None => return Err(de::Error::invalid_length(length, &$expected)),
                        }
                    };
                }

                let kind: TokenKind = next!("2 or more elements");

                Ok(match kind {
                    TokenKind::StartTag => TestToken::StartTag {
                        name: next!("3 or 4 elements"),
                        attributes: next!("3 or 4 elements"),
                        self_closing: seq.next_element()?.unwrap_or(false),
                    },
                    TokenKind::EndTag => TestToken::EndTag {
                        name: next!("2 elements"),
                    },
                    TokenKind::Comment => TestToken::Comment(next!("2 elements")),
                    TokenKind::Doctype => TestToken::Doctype {
                        name: next!("5 elements"),
                        public_id: next!("5 elements"),
                        system_id: next!("5 elements"),
                        correctness: next!("5 elements"),
                    },
                    TokenKind::Character => TestToken::Character(next!("2 elements")),
                })
            }
        }

        deserializer.deserialize_seq(TokenVisitor)
    }
}
