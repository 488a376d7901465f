use conformance::dom::Attribute;
use conformance::testing::tokenizer::{
    parse_tokenizer_fixture, InitialState, TestToken, Token, TokenCollector, TokenSink, TokenizerTest,
};
use std::fs;
use std::path::PathBuf;
use test_case::test_case;

const FIXTURE_ROOT: &str = "tests/data/tokenizer";

fn read_fixture(filename: &str) -> Vec<TokenizerTest> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(FIXTURE_ROOT).join(filename);
    let input = fs::read_to_string(path).expect("fixture");
    parse_tokenizer_fixture(&input).expect("tokenizer fixture")
}

// Every record is also run on its own by the tokenizer test.
#[test_case("test1.test", 12)]
#[test_case("escaped.test", 5)]
fn fixture_sizes(filename: &str, count: usize) {
    let tests = read_fixture(filename);
    assert_eq!(tests.len(), count, "number of tests in {filename}");
    assert!(tests.iter().all(|test| test.states().is_ok()));
}

#[test]
fn fixture_fields() {
    let tests = read_fixture("test1.test");

    assert_eq!(tests[1].errors[0].code, "eof-in-doctype");
    assert_eq!((tests[1].errors[0].line, tests[1].errors[0].col), (1, 15));
    assert_eq!(
        tests[2].output,
        vec![TestToken::Doctype {
            name: Some("html".into()),
            public_id: Some("-//W3C//DTD HTML 4.01//EN".into()),
            system_id: Some("http://www.w3.org/TR/html4/strict.dtd".into()),
            correctness: true,
        }]
    );

    let rawtext = &tests[11];
    assert_eq!(rawtext.states().expect("states"), vec![InitialState::RawText, InitialState::RcData]);
    assert_eq!(rawtext.last_start_tag.as_deref(), Some("xmp"));
}

#[test]
fn double_escaped_fixtures() {
    let tests = read_fixture("escaped.test");

    assert_eq!(tests[0].input, "a\0b");
    assert_eq!(tests[0].output, vec![TestToken::character("a\0b")]);
    assert_eq!(tests[1].output, vec![TestToken::start_tag("a\u{FFFD}", &[])]);
    assert_eq!(tests[3].output, vec![TestToken::start_tag("x", &[("y", "\u{FFFD}")])]);
    assert_eq!(tests[4].states().expect("states"), vec![InitialState::CDataSection]);
}

#[test]
fn duplicate_attributes_keep_last_value() {
    let mut collector = TokenCollector::new();
    collector.process_token(Token::StartTag {
        name: "h".into(),
        is_self_closing: false,
        attributes: vec![
            Attribute::new("a", "1"),
            Attribute::new("b", "2"),
            Attribute::new("a", "3"),
            Attribute::without_value("c"),
        ],
    });

    assert_eq!(
        collector.tokens(),
        &[TestToken::start_tag("h", &[("a", "3"), ("b", "2"), ("c", "")])]
    );
    assert_eq!(collector.to_json().expect("json"), r#"[["StartTag","h",{"a":"3","b":"2","c":""}]]"#);
}
