use std::num::NonZeroUsize;

/// A single supervised sample: the padded words preceding the target, and the target itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub input: Vec<String>,
    pub target: String,
}

/// Right-pads word sequences up to a fixed length.
#[derive(Debug, Clone)]
pub struct Padder {
    seq_len: NonZeroUsize,
    pad_token: String,
}

impl Padder {
    /// Creates a new `Padder`.
    ///
    /// # Arguments
    /// * `seq_len` - The length sequences are padded to.
    /// * `pad_token` - The sentinel filling the unused positions.
    pub fn new(seq_len: NonZeroUsize, pad_token: impl Into<String>) -> Self {
        Self {
            seq_len,
            pad_token: pad_token.into(),
        }
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len.get()
    }

    /// Pads `words` with `seq_len - words.len()` pad tokens.
    ///
    /// Sequences already longer than `seq_len` are returned as they are, never truncated.
    pub fn pad<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let missing = self.seq_len().saturating_sub(words.len());

        words
            .iter()
            .map(|w| w.as_ref().to_string())
            .chain(std::iter::repeat_n(self.pad_token.clone(), missing))
            .collect()
    }
}

/// Turns raw commands into samples, holding out each command's last word as its target.
///
/// Commands with fewer than two words carry no input and are skipped.
///
/// # Arguments
/// * `commands` - The raw command strings.
/// * `padder` - Pads the words preceding the target.
pub fn preprocess<S: AsRef<str>>(commands: &[S], padder: &Padder) -> Vec<Sample> {
    commands
        .iter()
        .filter_map(|cmd| {
            let words: Vec<&str> = cmd.as_ref().split_whitespace().collect();
            let (target, input) = words.split_last()?;
            if input.is_empty() {
                return None;
            }

            Some(Sample {
                input: padder.pad(input),
                target: target.to_string(),
            })
        })
        .collect()
}
