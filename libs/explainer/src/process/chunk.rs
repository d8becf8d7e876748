use std::num::NonZeroUsize;

/// Splits `text` into consecutive windows of at most `chunk_size` characters.
///
/// Cuts fall at fixed character offsets with no regard for words or sentences.
/// Joining the chunks yields `text` again; empty input yields no chunks.
pub fn chunk_text(text: &str, chunk_size: NonZeroUsize) -> Vec<&str> {
    let chunk_size = chunk_size.get();
    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);

    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(chunk_text("", size(1000)).is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_text("hello", size(1000)), vec!["hello"]);
        assert_eq!(chunk_text("hello", size(5)), vec!["hello"]);
    }

    #[test]
    fn test_1200_chars_split_1000_200() {
        let text = "a".repeat(1200);
        let chunks = chunk_text(&text, size(1000));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 200);
    }

    #[test]
    fn test_chunk_count_and_lossless_join() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(37);
        let total = text.chars().count();
        for n in [1, 2, 3, 7, 10, 64, 1000, total, total + 1] {
            let chunks = chunk_text(&text, size(n));
            assert_eq!(chunks.len(), total.div_ceil(n), "chunk_size {}", n);
            assert_eq!(chunks.concat(), text);
            assert!(chunks.iter().all(|c| c.chars().count() <= n));
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "héllo wörld ünïcödé";
        let chunks = chunk_text(text, size(4));
        assert_eq!(chunks[0], "héll");
        assert_eq!(chunks[1], "o wö");
        assert_eq!(chunks.concat(), text);
    }
}
