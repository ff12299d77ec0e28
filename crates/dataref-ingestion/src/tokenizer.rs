//! Whitespace tokenizer with an offset → token lookup table.
//!
//! Regex matches report byte offsets into the cleaned text; the context
//! windower needs the token that encloses a match start. `TokenIndex` answers
//! that in O(1) with a dense table the size of the text.

/// Tokens of a text plus the token index enclosing every in-token offset.
#[derive(Debug, Clone)]
pub struct TokenIndex<'a> {
    tokens: Vec<&'a str>,
    /// `offsets[i]` is the token containing byte `i`, `None` inside whitespace.
    offsets: Vec<Option<usize>>,
}

impl<'a> TokenIndex<'a> {
    /// Split `text` on runs of whitespace and anchor every token.
    ///
    /// Each token is located at its next occurrence at or after a cursor that
    /// advances past the previous token, so a token repeated verbatim is still
    /// anchored where it actually sits rather than at its first occurrence.
    pub fn build(text: &'a str) -> Self {
        let tokens: Vec<&'a str> = text.split_whitespace().collect();
        let mut offsets = vec![None; text.len()];

        let mut cursor = 0;
        for (i, tok) in tokens.iter().enumerate() {
            let start = match text[cursor..].find(tok) {
                Some(pos) => cursor + pos,
                None => break,
            };
            let end = start + tok.len();
            for slot in &mut offsets[start..end] {
                *slot = Some(i);
            }
            cursor = end;
        }

        Self { tokens, offsets }
    }

    /// Token enclosing byte offset `offset`, or `None` for whitespace and
    /// out-of-range offsets.
    pub fn token_at(&self, offset: usize) -> Option<usize> {
        self.offsets.get(offset).copied().flatten()
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
