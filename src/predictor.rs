use ndarray::Axis;

use crate::{
    Result,
    dataset::Padder,
    encoding::{OneHotEncoder, SequenceEncoder},
    model::{LinearRegression, Regressor},
};

/// Predicts the word that completes a command, given the words preceding it.
#[derive(Debug, Clone)]
pub struct NextWordPredictor<R: Regressor = LinearRegression> {
    padder: Padder,
    x_encoder: SequenceEncoder,
    y_encoder: OneHotEncoder,
    model: R,
}

impl<R: Regressor> NextWordPredictor<R> {
    /// Creates a new `NextWordPredictor`.
    ///
    /// # Arguments
    /// * `padder` - Pads inputs the same way the training inputs were padded.
    /// * `x_encoder` - The encoder fitted on the training inputs.
    /// * `y_encoder` - The encoder fitted on the training targets.
    /// * `model` - A regressor already fitted on the encoded training data.
    pub fn new(
        padder: Padder,
        x_encoder: SequenceEncoder,
        y_encoder: OneHotEncoder,
        model: R,
    ) -> Self {
        Self {
            padder,
            x_encoder,
            y_encoder,
            model,
        }
    }

    pub fn targets(&self) -> &[String] {
        self.y_encoder.categories()
    }

    /// Predicts the next word after `words`.
    ///
    /// Words never seen during training contribute nothing to the prediction, they do not fail it.
    ///
    /// # Errors
    /// Returns an `MlErr` if `words` does not fit in the padded length or the model is unfitted.
    pub fn predict<S: AsRef<str>>(&self, words: &[S]) -> Result<String> {
        let padded = self.padder.pad(words);
        let x = self.x_encoder.transform_one(&padded)?.insert_axis(Axis(0));
        let scores = self.model.predict(x.view())?;

        let word = self.y_encoder.inverse_transform(scores.row(0))?;
        Ok(word.to_string())
    }
}
