use super::*;

#[test]
fn test_empty_buffer_reads_empty() {
    let buffer = TranscriptBuffer::new();
    assert_eq!(buffer.current(), "");
}

#[test]
fn test_interim_stands_in_until_final_arrives() {
    let buffer = TranscriptBuffer::new();
    buffer.set_interim("the quick");
    assert_eq!(buffer.current(), "the quick");

    buffer.set_interim("the quick brown");
    assert_eq!(buffer.current(), "the quick brown");

    buffer.push_final("the quick brown fox");
    assert_eq!(buffer.current(), "the quick brown fox");
}

#[test]
fn test_final_segments_accumulate() {
    let buffer = TranscriptBuffer::new();
    buffer.push_final("the quick ");
    buffer.push_final("brown fox");
    assert_eq!(buffer.current(), "the quick brown fox");
}

#[test]
fn test_final_text_wins_over_later_interim() {
    let buffer = TranscriptBuffer::new();
    buffer.push_final("hello world");
    buffer.set_interim("hello worl");
    assert_eq!(buffer.current(), "hello world");
}

#[test]
fn test_clear_resets_both_layers() {
    let buffer = TranscriptBuffer::new();
    buffer.push_final("something");
    buffer.set_interim("else");
    buffer.clear();
    assert_eq!(buffer.current(), "");
}
