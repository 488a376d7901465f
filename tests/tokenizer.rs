//! Runs every record of every tokenizer fixture as its own test. The expected tokens are replayed
//! as tokenizer events through the token collector, which must give them back unchanged.
use conformance::dom::Attribute;
use conformance::testing::tokenizer::{
    coalesce_characters, parse_tokenizer_fixture, TestToken, Token, TokenCollector, TokenSink, TokenizerTest,
};
use libtest_mimic::{Arguments, Failed, Trial};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FIXTURE_ROOT: &str = "tests/data/tokenizer";

/// Tokenizer events that produce the given fixture token. Character data is emitted one
/// character at a time, like a streaming tokenizer would.
fn events(token: &TestToken) -> Vec<Token> {
    match token {
        TestToken::Character(data) => data.chars().map(|ch| Token::text(ch.to_string())).collect(),
        TestToken::Comment(data) => vec![Token::comment(data.clone())],
        TestToken::StartTag {
            name,
            attributes,
            self_closing,
        } => vec![Token::StartTag {
            name: name.clone(),
            is_self_closing: *self_closing,
            attributes: attributes
                .iter()
                .map(|(name, value)| Attribute::new(name.clone(), value.clone()))
                .collect(),
        }],
        TestToken::EndTag { name } => vec![Token::end_tag(name.clone())],
        TestToken::Doctype {
            name,
            public_id,
            system_id,
            correctness,
        } => vec![Token::DocType {
            name: name.clone(),
            force_quirks: !correctness,
            pub_identifier: public_id.clone(),
            sys_identifier: system_id.clone(),
        }],
    }
}

fn replay(test: &TokenizerTest) -> Result<(), Failed> {
    test.states().map_err(|err| err.to_string())?;

    let mut collector = TokenCollector::new();
    collector.extend(test.output.iter().flat_map(events));
    collector.process_token(Token::Eof);
    if !collector.is_done() {
        return Err("collector did not see the end of input".into());
    }

    let json = collector.to_json().map_err(|err| err.to_string())?;
    let tokens = coalesce_characters(collector.into_tokens());
    if tokens != test.output {
        return Err(format!("expected {:?}\ngot {tokens:?}", test.output).into());
    }

    let decoded: Vec<TestToken> = serde_json::from_str(&json).map_err(|err| err.to_string())?;
    if coalesce_characters(decoded) != test.output {
        return Err(format!("token list does not decode back: {json}").into());
    }

    Ok(())
}

fn trials(path: &Path) -> Vec<Trial> {
    let name = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();

    let tests = match fs::read_to_string(path).map_err(anyhow::Error::from).and_then(|input| parse_tokenizer_fixture(&input)) {
        Ok(tests) => tests,
        Err(err) => {
            let message = format!("cannot load {}: {err}", path.display());
            return vec![Trial::test(name, move || Err(message.into()))];
        }
    };

    tests
        .into_iter()
        .map(|test| Trial::test(format!("{name}: {}", test.description), move || replay(&test)))
        .collect()
}

fn main() {
    let args = Arguments::from_args();

    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(FIXTURE_ROOT);
    let mut tests = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name().into_iter().flatten() {
        if entry.path().extension().is_some_and(|ext| ext == "test") {
            tests.extend(trials(entry.path()));
        }
    }

    libtest_mimic::run(&args, tests).exit();
}
