use super::Message;
use crate::domain::models::Author;

#[test]
fn it_labels_query_and_response() {
    let msg = Message::new("What is revenue?", "Revenue is $10M");
    let lines = msg.as_transcript(80);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].author, Author::User);
    assert_eq!(lines[0].text, "You: What is revenue?");
    assert_eq!(lines[1].author, Author::Assistant);
    assert_eq!(lines[1].text, "AI: Revenue is $10M");
}

#[test]
fn it_wraps_long_lines() {
    let msg = Message::new("one two three four five", "ok");
    let lines = msg
        .as_transcript(15)
        .into_iter()
        .map(|line| return line.text)
        .collect::<Vec<String>>();

    assert_eq!(lines, vec!["You: one two", "three four", "five", "AI: ok"]);
}

#[test]
fn it_keeps_multiline_responses() {
    let msg = Message::new("q", "SQL Query Result: {\n  \"a\": 1\n}");
    let lines = msg
        .as_transcript(80)
        .into_iter()
        .filter(|line| return line.author == Author::Assistant)
        .map(|line| return line.text)
        .collect::<Vec<String>>();

    assert_eq!(lines, vec!["AI: SQL Query Result: {", "  \"a\": 1", "}"]);
}

#[test]
fn it_does_not_split_words_longer_than_the_width() {
    let msg = Message::new("supercalifragilistic", "");
    let lines = msg.as_transcript(8);

    assert_eq!(lines[0].text, "You:");
    assert_eq!(lines[1].text, "supercalifragilistic");
}
