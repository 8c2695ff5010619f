//! Summarizer tool — a mock that truncates long text to its first words.

/// Inputs with more words than this are truncated.
const SUMMARY_WORDS: usize = 10;

/// Summarize `text`.
///
/// More than ten words: `"Summary: <first ten words>..."`. Otherwise the
/// text is returned unchanged after the `"Summary: "` prefix.
pub fn summarize(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > SUMMARY_WORDS {
        format!("Summary: {}...", words[..SUMMARY_WORDS].join(" "))
    } else {
        format!("Summary: {text}")
    }
}
