//! Twelve-word recovery phrase codec.
//!
//! Each of the first twelve entropy bytes selects one word from the English
//! BIP-39 list (`word[i] = LIST[entropy[i] % 2048]`). This is a reproducible
//! derivation checkpoint, not a BIP-39 mnemonic: there is no checksum word and
//! the phrase text itself is what gets stretched into the seed.
//!
//! Encoding only reaches the first 256 words, but any dictionary word is a
//! valid phrase word, so phrases produced elsewhere import too. Decoding
//! yields dictionary indices; for a phrase this codec produced they equal
//! the original entropy bytes.

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, Zeroizing};

use crate::entropy::Entropy;
use crate::PrimitivesError;

/// Number of words in a recovery phrase.
pub const PHRASE_WORDS: usize = 12;

/// The static dictionary shared by every codec call.
pub fn dictionary() -> &'static [&'static str; 2048] {
    bip39::Language::English.word_list()
}

/// A twelve-word recovery phrase. Wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoveryPhrase {
    words: Vec<String>,
}

impl RecoveryPhrase {
    /// Encode the first twelve entropy bytes as words.
    pub fn encode(entropy: &Entropy) -> Result<Self, PrimitivesError> {
        encode(entropy.as_bytes())
    }

    /// Dictionary index of each word.
    pub fn decode(&self) -> Result<[u16; PHRASE_WORDS], PrimitivesError> {
        decode(&self.words)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The single-space joined phrase, as fed to seed stretching.
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(" "))
    }
}

/// Map entropy bytes to twelve dictionary words.
///
/// # Arguments
/// * `entropy` - At least twelve bytes; bytes past the twelfth are unused.
///
/// # Returns
/// The phrase, or `EntropyTooShort` for fewer than twelve bytes.
pub fn encode(entropy: &[u8]) -> Result<RecoveryPhrase, PrimitivesError> {
    if entropy.len() < PHRASE_WORDS {
        return Err(PrimitivesError::EntropyTooShort {
            min: PHRASE_WORDS,
            got: entropy.len(),
        });
    }
    let list = dictionary();
    let words = entropy[..PHRASE_WORDS]
        .iter()
        .map(|b| list[*b as usize % list.len()].to_string())
        .collect();
    Ok(RecoveryPhrase { words })
}

/// Look each word up by exact match and return its dictionary index.
///
/// # Returns
/// `InvalidPhraseLength` unless exactly twelve words are given,
/// `UnknownWord` for a word outside the dictionary.
pub fn decode<S: AsRef<str>>(words: &[S]) -> Result<[u16; PHRASE_WORDS], PrimitivesError> {
    if words.len() != PHRASE_WORDS {
        return Err(PrimitivesError::InvalidPhraseLength {
            expected: PHRASE_WORDS,
            got: words.len(),
        });
    }
    let list = dictionary();
    let mut out = [0u16; PHRASE_WORDS];
    for (slot, word) in out.iter_mut().zip(words) {
        let word = word.as_ref();
        // The list has 2048 entries, so every position fits in a u16.
        *slot = list
            .iter()
            .position(|w| *w == word)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| PrimitivesError::UnknownWord(word.to_string()))?;
    }
    Ok(out)
}

impl Drop for RecoveryPhrase {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

impl FromStr for RecoveryPhrase {
    type Err = PrimitivesError;

    /// Parse a whitespace-separated phrase, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<String> = s.split_whitespace().map(str::to_lowercase).collect();
        decode(&words)?;
        Ok(RecoveryPhrase { words })
    }
}

impl fmt::Display for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

impl fmt::Debug for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoveryPhrase({} words)", self.words.len())
    }
}
