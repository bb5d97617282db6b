use serde::{Deserialize, Serialize};

/// One line of recognized text containing the keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHit {
    /// 1-based line number within the recognized text.
    pub line_number: usize,
    pub line: String,
}

/// Case-sensitive substring presence check. An empty keyword matches any
/// text.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.contains(keyword)
}

/// Every line containing the keyword, in order.
pub fn keyword_hits(text: &str, keyword: &str) -> Vec<KeywordHit> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| line.contains(keyword))
        .map(|(idx, line)| KeywordHit {
            line_number: idx + 1,
            line: line.to_string(),
        })
        .collect()
}
