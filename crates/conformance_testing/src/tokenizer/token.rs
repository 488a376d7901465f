use conformance_dom::Attribute;

/// The tokens a tokenizer under test emits
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    DocType {
        name: Option<String>,
        force_quirks: bool,
        pub_identifier: Option<String>,
        sys_identifier: Option<String>,
    },
    StartTag {
        name: String,
        is_self_closing: bool,
        /// Attributes in source order, duplicates included
        attributes: Vec<Attribute>,
    },
    EndTag {
        name: String,
        /// Tokenizers report `</br/>` as a self-closing end tag. The flag has no fixture form.
        is_self_closing: bool,
    },
    Comment {
        comment: String,
    },
    Text {
        text: String,
    },
    Eof,
}

impl Token {
    /// Returns true when the token is an EOF token
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }

    /// Creates a start tag without attributes
    pub fn start_tag(name: impl Into<String>) -> Self {
        Token::StartTag {
            name: name.into(),
            is_self_closing: false,
            attributes: Vec::new(),
        }
    }

    pub fn end_tag(name: impl Into<String>) -> Self {
        Token::EndTag {
            name: name.into(),
            is_self_closing: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Token::Text { text: text.into() }
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        Token::Comment {
            comment: comment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert!(Token::Eof.is_eof());
        assert!(!Token::text("x").is_eof());
        assert_eq!(
            Token::start_tag("div"),
            Token::StartTag {
                name: "div".into(),
                is_self_closing: false,
                attributes: vec![],
            }
        );
        assert_eq!(Token::comment("c"), Token::Comment { comment: "c".into() });
    }
}
