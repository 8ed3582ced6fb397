use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the document at three granularities.
///
/// The derived ordering is exactly the hierarchical compare every selection
/// policy uses: token first, then character, then letter. Two positions in
/// different tokens are ordered by token alone, regardless of the finer
/// fields.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct TextPosition {
    /// Token index, document-absolute once the sentence base is applied.
    pub token: u32,
    /// Character index inside the token.
    pub character: u32,
    /// Letter index inside the character, for scripts where a character
    /// decomposes into several letters.
    pub letter: u32,
}

impl TextPosition {
    pub fn new(token: u32, character: u32, letter: u32) -> Self {
        Self {
            token,
            character,
            letter,
        }
    }

    /// Shifts the token component by a sentence's base token offset.
    pub fn offset_tokens(self, base: u32) -> Self {
        Self {
            token: self.token + base,
            ..self
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.token, self.character, self.letter)
    }
}
