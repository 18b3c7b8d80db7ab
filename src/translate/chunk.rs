/// Default maximum characters per translation request.
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Split text into chunks of at most `max_len` characters on word boundaries.
///
/// Words are packed greedily with a single space between them. A word longer
/// than `max_len` is emitted alone rather than split.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        if current_len + 1 + word_len <= max_len {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("hola como estas", 4000);
        assert_eq!(chunks, vec!["hola como estas"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 10).is_empty());
        assert!(chunk_text("  \n\t ", 10).is_empty());
    }

    #[test]
    fn test_respects_limit() {
        let text = "aaa bbb ccc ddd eee";
        let chunks = chunk_text(text, 7);
        assert_eq!(chunks, vec!["aaa bbb", "ccc ddd", "eee"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
    }

    #[test]
    fn test_exact_fit() {
        let chunks = chunk_text("ab cd", 5);
        assert_eq!(chunks, vec!["ab cd"]);
    }

    #[test]
    fn test_oversized_word_alone() {
        let chunks = chunk_text("hi supercalifragilistic there", 6);
        assert_eq!(chunks, vec!["hi", "supercalifragilistic", "there"]);
    }

    #[test]
    fn test_rejoin_preserves_words() {
        let text = "Lorem ipsum  dolor\nsit amet,\tconsectetur adipiscing elit, sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua.";
        for max_len in [1, 5, 12, 40, 4000] {
            let chunks = chunk_text(text, max_len);
            let rejoined = chunks.join(" ");
            assert_eq!(words(&rejoined), words(text), "max_len = {}", max_len);

            for chunk in &chunks {
                assert!(!chunk.is_empty());
                let is_single_word = !chunk.contains(' ');
                assert!(chunk.chars().count() <= max_len || is_single_word);
            }
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let chunks = chunk_text("ñandú ñandú", 11);
        assert_eq!(chunks, vec!["ñandú ñandú"]);
    }
}
