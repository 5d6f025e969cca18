use ndarray::{Array1, Array2, ArrayViewMut1, s};

use super::OneHotEncoder;
use crate::{MlErr, Result};

/// Encodes fixed-length word sequences as the concatenation of one one-hot block per position.
///
/// Every position shares a single vocabulary: the tokens seen anywhere in the fitted sequences.
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    encoder: OneHotEncoder,
    seq_len: usize,
}

impl SequenceEncoder {
    /// Fits the shared vocabulary over every token of `sequences`.
    ///
    /// # Arguments
    /// * `sequences` - The (already padded) training sequences.
    /// * `seq_len` - The number of positions every encoded sequence must have.
    ///
    /// # Errors
    /// Returns `MlErr::EmptyInput` if there are no tokens.
    pub fn fit<S: AsRef<str>>(sequences: &[Vec<S>], seq_len: usize) -> Result<Self> {
        let encoder = OneHotEncoder::fit(sequences.iter().flatten())?;
        Ok(Self { encoder, seq_len })
    }

    pub fn vocabulary(&self) -> &OneHotEncoder {
        &self.encoder
    }

    /// Returns the width of an encoded sequence.
    pub fn width(&self) -> usize {
        self.seq_len * self.encoder.len()
    }

    /// Encodes a single sequence.
    ///
    /// # Errors
    /// Returns `MlErr::SizeMismatch` if `sequence` does not have exactly `seq_len` tokens.
    pub fn transform_one<S: AsRef<str>>(&self, sequence: &[S]) -> Result<Array1<f64>> {
        let mut encoded = Array1::zeros(self.width());
        self.write_row(sequence, encoded.view_mut())?;
        Ok(encoded)
    }

    /// Encodes every sequence as one row of the returned matrix.
    ///
    /// # Errors
    /// Returns `MlErr::SizeMismatch` if any sequence does not have exactly `seq_len` tokens.
    pub fn transform<S: AsRef<str>>(&self, sequences: &[Vec<S>]) -> Result<Array2<f64>> {
        let mut encoded = Array2::zeros((sequences.len(), self.width()));

        for (row, seq) in encoded.rows_mut().into_iter().zip(sequences) {
            self.write_row(seq, row)?;
        }

        Ok(encoded)
    }

    fn write_row<S: AsRef<str>>(&self, sequence: &[S], mut out: ArrayViewMut1<f64>) -> Result<()> {
        if sequence.len() != self.seq_len {
            return Err(MlErr::SizeMismatch {
                what: "sequence length",
                got: sequence.len(),
                expected: self.seq_len,
            });
        }

        let block = self.encoder.len();
        for (pos, token) in sequence.iter().enumerate() {
            let slot = out.slice_mut(s![pos * block..(pos + 1) * block]);
            self.encoder.encode_into(token.as_ref(), slot)?;
        }

        Ok(())
    }
}
