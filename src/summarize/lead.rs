use super::{truncate_input, Summarizer, SummaryFuture};

/// Offline extractive summarizer.
///
/// Keeps the leading non-empty lines of the input as sentences, up to a
/// character budget. Lines of the form `Key:` with no value are dropped.
pub struct LeadSummarizer {
    max_chars: usize,
}

impl LeadSummarizer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn summarize_text(&self, text: &str) -> String {
        let mut summary = String::new();

        for sentence in text.lines().filter_map(as_sentence) {
            let needed = sentence.chars().count() + usize::from(!summary.is_empty());
            if summary.chars().count() + needed > self.max_chars {
                if summary.is_empty() {
                    return truncate_input(&sentence, self.max_chars).to_string();
                }
                break;
            }
            if !summary.is_empty() {
                summary.push(' ');
            }
            summary.push_str(&sentence);
        }

        summary
    }
}

fn as_sentence(line: &str) -> Option<String> {
    let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.is_empty() || line.ends_with(':') {
        return None;
    }

    if line.ends_with(['.', '!', '?']) {
        Some(line)
    } else {
        Some(format!("{}.", line))
    }
}

impl Summarizer for LeadSummarizer {
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        let summary = self.summarize_text(text);
        Box::pin(async move { Ok(summary) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_empty_fields_and_terminates_sentences() {
        let summarizer = LeadSummarizer::new(200);
        let summary = summarizer.summarize_text(
            "Project: widget\nDescription: Makes   widgets!\nLanguage:\nTopics: \n",
        );
        assert_eq!(summary, "Project: widget. Description: Makes widgets!");
    }

    #[test]
    fn test_stops_at_budget_on_sentence_boundary() {
        let summarizer = LeadSummarizer::new(20);
        assert_eq!(summarizer.summarize_text("First line\nSecond line"), "First line.");
    }

    #[test]
    fn test_truncates_single_long_sentence() {
        let summarizer = LeadSummarizer::new(5);
        assert_eq!(summarizer.summarize_text("Enormous sentence"), "Enorm");
    }

    #[test]
    fn test_deterministic() {
        let summarizer = LeadSummarizer::new(100);
        let text = "Project: a\nDescription: b";
        assert_eq!(summarizer.summarize_text(text), summarizer.summarize_text(text));
    }

    #[tokio::test]
    async fn test_summarize_future() {
        let summarizer = LeadSummarizer::new(100);
        assert_eq!(summarizer.summarize("Project: x").await.unwrap(), "Project: x.");
    }
}
