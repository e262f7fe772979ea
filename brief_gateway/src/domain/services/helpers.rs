use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Groups sentences finishing by .?! or reaching the end of the content
static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[^.!?]*(?:[.!?]+|$)").expect("Invalid sentence regex"));

/// Splits a text into contiguous sentence slices, whitespace included.
///
/// Concatenating the slices gives back the original text.
fn sentence_slices(content: &str) -> Vec<&str> {
    SENTENCE_RE
        .find_iter(content)
        .map(|m| m.as_str())
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Splits a text into chunks of at most `max_bytes` bytes, cutting between sentences.
///
/// A sentence longer than `max_bytes` is cut between words, and a word longer than
/// `max_bytes` between characters. Chunks are trimmed and never empty.
pub fn chunk_text(content: &str, max_bytes: usize) -> Vec<String> {
    let max_bytes = max_bytes.max(4);
    let mut chunks: Vec<String> = vec![];
    let mut current = String::new();

    let flush = |current: &mut String, chunks: &mut Vec<String>| {
        let chunk = current.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        current.clear();
    };

    for sentence in sentence_slices(content) {
        if current.len() + sentence.len() > max_bytes {
            flush(&mut current, &mut chunks);
        }

        if sentence.trim().len() <= max_bytes {
            current.push_str(sentence);
            continue;
        }

        for word in sentence.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > max_bytes {
                flush(&mut current, &mut chunks);
            }

            if word.len() <= max_bytes {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            for c in word.chars() {
                if current.len() + c.len_utf8() > max_bytes {
                    flush(&mut current, &mut chunks);
                }
                current.push(c);
            }
        }
    }
    flush(&mut current, &mut chunks);

    chunks
}

/// Finds a JSON array of objects embedded in a free text answer.
///
/// Generative models tend to wrap JSON in prose, markdown fences or citation markers such as
/// `[1]`. Parsing is attempted from each `[` in turn and the first array holding at least one
/// object wins. Text after the array is ignored.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    text.match_indices('[').find_map(|(start, _)| {
        let items = serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Vec<Value>>()
            .next()?
            .ok()?;

        items.iter().any(Value::is_object).then_some(items)
    })
}
