//! Markdown cleanup for model output
//!
//! The hosted models are instructed to answer in plain paragraphs, but
//! still leak markdown now and then. Responses shown to patients must be
//! plain text, so every completion passes through [`clean_markdown`].

/// Strip markdown artifacts from a completion and normalize whitespace.
///
/// Removes `**bold**` markers, stray `*` emphasis, leading `- `/`* ` list
/// markers, collapses runs of blank lines to a single blank line, and
/// trims the result.
pub fn clean_markdown(text: &str) -> String {
    let mut cleaned_lines: Vec<String> = Vec::with_capacity(text.lines().count());

    for line in text.lines() {
        let line = line.replace("**", "").replace('*', "");
        let trimmed = line.trim_start();
        let line = if let Some(rest) = trimmed.strip_prefix("- ") {
            rest.to_string()
        } else {
            line
        };
        if line.trim().is_empty() {
            cleaned_lines.push(String::new());
        } else {
            cleaned_lines.push(line);
        }
    }

    let mut result: Vec<&str> = Vec::with_capacity(cleaned_lines.len());
    let mut previous_blank = false;
    for line in &cleaned_lines {
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        result.push(line.as_str());
        previous_blank = blank;
    }

    result.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_bold_markers() {
        assert_eq!(clean_markdown("**Diagnosis:** stable"), "Diagnosis: stable");
    }

    #[test]
    fn removes_emphasis_markers() {
        assert_eq!(clean_markdown("patient is *stable* today"), "patient is stable today");
    }

    #[test]
    fn removes_list_markers() {
        let input = "- first finding\n- second finding";
        assert_eq!(clean_markdown(input), "first finding\nsecond finding");
    }

    #[test]
    fn removes_indented_list_markers() {
        assert_eq!(clean_markdown("  - nested item"), "nested item");
    }

    #[test]
    fn collapses_blank_runs_to_one() {
        let input = "first paragraph\n\n\n\nsecond paragraph";
        assert_eq!(clean_markdown(input), "first paragraph\n\nsecond paragraph");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_markdown("\n\n  summary text  \n\n"), "summary text");
    }

    #[test]
    fn mixed_markdown_is_fully_cleaned() {
        let input = "**Summary**\n\n\n- patient reports *mild* headache\n- no fever";
        let cleaned = clean_markdown(input);
        assert!(!cleaned.contains('*'));
        assert!(!cleaned.contains("- "));
        assert!(!cleaned.contains("\n\n\n"));
        assert_eq!(cleaned, "Summary\n\npatient reports mild headache\nno fever");
    }

    #[test]
    fn plain_text_is_unchanged() {
        let input = "Patient reports mild headache.";
        assert_eq!(clean_markdown(input), input);
    }
}
