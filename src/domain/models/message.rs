#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Author;

/// A single rendered row of a chat transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLine {
    pub author: Author,
    pub text: String,
}

/// A question and the response it produced. Both halves are created together
/// once the query resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub query: String,
    pub response: String,
}

fn wrap_lines(text: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for full_line in text.replace('\t', "  ").split('\n') {
        if full_line.trim().is_empty() {
            lines.push(" ".to_string());
            continue;
        }

        let mut char_count = 0;
        let mut current_lines: Vec<&str> = vec![];

        for word in full_line.split(' ') {
            let word_len = word.chars().count();
            if !current_lines.is_empty() && word_len + char_count + 1 > line_max_width {
                lines.push(current_lines.join(" ").trim_end().to_string());
                current_lines = vec![word];
                char_count = word_len + 1;
            } else {
                current_lines.push(word);
                char_count += word_len + 1;
            }
        }
        if !current_lines.is_empty() {
            lines.push(current_lines.join(" ").trim_end().to_string());
        }
    }

    return lines;
}

impl Message {
    pub fn new(query: &str, response: &str) -> Message {
        return Message {
            query: query.to_string(),
            response: response.to_string(),
        };
    }

    /// Formats the pair as `You: ...` followed by `AI: ...`, word wrapped to
    /// `line_max_width` columns.
    pub fn as_transcript(&self, line_max_width: usize) -> Vec<TranscriptLine> {
        let mut lines = vec![];
        for (author, text) in [
            (Author::User, &self.query),
            (Author::Assistant, &self.response),
        ] {
            let labelled = format!("{}: {text}", author.label());
            for line in wrap_lines(&labelled, line_max_width) {
                lines.push(TranscriptLine { author, text: line });
            }
        }

        return lines;
    }
}
