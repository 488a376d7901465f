use anyhow::{bail, Result};
use conformance::testing::tokenizer::parse_tokenizer_fixture;
use conformance::testing::tree_construction::{parse_fixture_with_options, ParserOptions};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Holds the results of all checked fixture files
#[derive(Default)]
struct TotalResults {
    files: usize,
    tests: usize,
    failed: Vec<String>,
}

fn main() -> Result<()> {
    let matches = clap::Command::new("Conformance fixture checker")
        .version("0.1.0")
        .about("Checks that html5lib fixture files are well-formed")
        .arg(
            clap::Arg::new("path")
                .help("Fixture file or directory holding fixture files")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("raw")
                .help("Don't decode escapes in #data sections")
                .long("raw")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let Some(path) = matches.get_one::<String>("path") else {
        bail!("Usage: fixture-check <path>");
    };

    let options = ParserOptions {
        decode_escapes: !matches.get_flag("raw"),
        ..ParserOptions::default()
    };

    let mut results = TotalResults::default();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("dat") => check_tree_construction(path, &options, &mut results)?,
            Some("test") => check_tokenizer(path, &mut results)?,
            _ => continue,
        }
    }

    println!(
        "🏁 Checked {} tests in {} files, {} failed",
        results.tests,
        results.files,
        results.failed.len()
    );

    if !results.failed.is_empty() {
        println!("❌ Failed tests:");
        for failure in &results.failed {
            println!("  * {failure}");
        }
        bail!("{} fixture tests failed", results.failed.len());
    }

    Ok(())
}

/// Every expected dump must survive being read back and serialized again
fn check_tree_construction(path: &Path, options: &ParserOptions, results: &mut TotalResults) -> Result<()> {
    let input = fs::read_to_string(path)?;
    let tests = parse_fixture_with_options(&input, Some(options.clone()));
    info!("🗄️ {} tree construction tests in {}", tests.len(), path.display());

    results.files += 1;
    for test in tests {
        results.tests += 1;

        let result = test.check_tree(&test.expected_tree());
        if !result.is_success() {
            results
                .failed
                .push(format!("{}:{} does not round trip\n{result}", path.display(), test.line));
        }
    }

    Ok(())
}

fn check_tokenizer(path: &Path, results: &mut TotalResults) -> Result<()> {
    let input = fs::read_to_string(path)?;
    let tests = parse_tokenizer_fixture(&input)?;
    info!("🗄️ {} tokenizer tests in {}", tests.len(), path.display());

    results.files += 1;
    for test in tests {
        results.tests += 1;

        if let Err(err) = test.states() {
            results
                .failed
                .push(format!("{} \"{}\": {err}", path.display(), test.description));
        }
    }

    Ok(())
}
