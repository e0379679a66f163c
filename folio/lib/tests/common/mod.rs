//! Common test utilities for rendering integration tests.

use std::fs;
use std::path::PathBuf;

/// Loads a markdown fixture from the `tests/fixtures/` directory.
///
/// ## Panics
///
/// Panics if the fixture file cannot be read or does not exist.
pub fn load_fixture(path: &str) -> String {
    let mut fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fixture_path.push("tests");
    fixture_path.push("fixtures");
    fixture_path.push(path);

    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {:?}: {}",
            fixture_path.display(),
            e
        )
    })
}

/// Extracts the raw text of every fenced block from a fixture, in order.
///
/// Only handles unindented ```` ``` ```` fences, which is all the fixtures use.
pub fn fenced_sources(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in content.split_inclusive('\n') {
        match current.as_mut() {
            None if line.starts_with("```") => current = Some(String::new()),
            Some(_) if line.trim_end() == "```" => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            Some(block) => block.push_str(line),
            None => {}
        }
    }

    blocks
}
