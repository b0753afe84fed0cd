use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use crate::classify::ChangeEngine;

/// Line diff of two sentence lists, one sentence per line.
pub fn format_sentence_diff(previous: &[String], current: &[String]) -> String {
    let old_text = join_lines(previous);
    let new_text = join_lines(current);
    let diff = TextDiff::from_lines(&old_text, &new_text);
    let mut output = String::new();

    output.push_str(&"───────────────────────────────────────\n".dimmed().to_string());

    for change in diff.iter_all_changes() {
        let line = change.to_string();
        let formatted = match change.tag() {
            ChangeTag::Delete => format!("- {}", line.trim_end()).red().to_string(),
            ChangeTag::Insert => format!("+ {}", line.trim_end()).green().to_string(),
            ChangeTag::Equal => format!("  {}", line.trim_end()),
        };
        output.push_str(&formatted);
        output.push('\n');
    }

    output.push_str(&"───────────────────────────────────────".dimmed().to_string());

    output
}

/// Sentence-level diff of two raw extractions after normalization.
pub fn format_document_diff(engine: &ChangeEngine, previous: &str, current: &str) -> String {
    format_sentence_diff(&engine.sentences(previous), &engine.sentences(current))
}

/// True when the documents differ after normalization.
pub fn has_changes(engine: &ChangeEngine, previous: &str, current: &str) -> bool {
    let normalizer = engine.normalizer();
    normalizer.normalize(previous) != normalizer.normalize(current)
}

fn join_lines(sentences: &[String]) -> String {
    let mut text = sentences.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}
