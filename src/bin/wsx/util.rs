use std::mem;

/// Greedy word wrap. Words longer than `width` keep a line of their own
/// rather than being split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Truncates to `max_len` characters, ending in an ellipsis when cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max_len - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let lines = wrap("failed to fetch the urea archive from the mirror", 20);
        assert_eq!(lines, vec!["failed to fetch the", "urea archive from", "the mirror"]);
    }

    #[test]
    fn wrap_keeps_an_overlong_word_whole() {
        let lines = wrap("see https://zenodo.org/records/7032334 first", 12);
        assert_eq!(lines, vec!["see", "https://zenodo.org/records/7032334", "first"]);
    }

    #[test]
    fn wrap_of_empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_collapses_runs_of_whitespace() {
        let lines = wrap("mean   std\n min", 40);
        assert_eq!(lines, vec!["mean std min"]);
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("vibrational frequencies", 10), "vibration…");
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("urea", 10), "urea");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Ångström units", 7), "Ångstr…");
    }
}
