use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Result,
    config::{PipelineConfig, SolverConfig},
    dataset::{Padder, Sample, generate_commands, preprocess, train_test_split},
    encoding::{OneHotEncoder, SequenceEncoder},
    model::{LinearRegression, Regressor, Solver},
    predictor::NextWordPredictor,
};

impl From<SolverConfig> for Solver {
    fn from(value: SolverConfig) -> Self {
        match value {
            SolverConfig::NormalEquations => Solver::NormalEquations,
            SolverConfig::GradientDescent {
                learning_rate,
                epochs,
            } => Solver::GradientDescent {
                learning_rate,
                epochs,
            },
        }
    }
}

/// The outcome of a pipeline run.
#[derive(Debug)]
pub struct Report {
    pub train_r2: f64,
    pub test_r2: f64,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Width of an encoded input, `seq_len` blocks of the input vocabulary.
    pub features: usize,
    pub predictor: NextWordPredictor,
}

/// Generates the command dataset, trains a next word model on it and scores it.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a new `Pipeline`.
    ///
    /// # Arguments
    /// * `config` - The settings for the run.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs every stage once: generation, preprocessing, encoding, splitting, fitting and
    /// scoring.
    ///
    /// # Errors
    /// Returns an `MlErr` if the config is invalid or any stage fails.
    pub fn run(&self) -> Result<Report> {
        let config = &self.config;
        config.validate()?;

        info!("generating commands");
        let commands = generate_commands(config.repetitions.get());
        let padder = Padder::new(config.seq_len, config.pad_token.clone());
        let samples = preprocess(&commands, &padder);
        debug!(commands = commands.len(), samples = samples.len(); "commands preprocessed");

        info!("encoding samples");
        let (inputs, targets): (Vec<_>, Vec<_>) = samples
            .into_iter()
            .map(|Sample { input, target }| (input, target))
            .unzip();

        let x_encoder = SequenceEncoder::fit(&inputs, padder.seq_len())?;
        let y_encoder = OneHotEncoder::fit(&targets)?;
        let x = x_encoder.transform(&inputs)?;
        let y = y_encoder.transform(&targets);
        debug!(
            vocabulary = x_encoder.vocabulary().len(),
            features = x.ncols(),
            targets = y.ncols();
            "samples encoded"
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        let split = train_test_split(x.view(), y.view(), config.test_size, &mut rng)?;
        info!(train = split.x_train.nrows(), test = split.x_test.nrows(); "fitting the model");

        let mut model = LinearRegression::new(config.fit_intercept, config.solver.into());
        model.fit(split.x_train.view(), split.y_train.view())?;

        let train_r2 = model.score(split.x_train.view(), split.y_train.view())?;
        let test_r2 = model.score(split.x_test.view(), split.y_test.view())?;
        info!(train_r2 = train_r2, test_r2 = test_r2; "model scored");

        Ok(Report {
            train_r2,
            test_r2,
            train_samples: split.x_train.nrows(),
            test_samples: split.x_test.nrows(),
            features: x.ncols(),
            predictor: NextWordPredictor::new(padder, x_encoder, y_encoder, model),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MlErr;

    #[test]
    fn default_run_splits_the_fourteen_qualifying_commands() {
        let report = Pipeline::new(PipelineConfig::default()).run().unwrap();
        assert_eq!(report.train_samples + report.test_samples, 140);
        assert_eq!(report.test_samples, 28);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = PipelineConfig {
            test_size: 0.0,
            ..PipelineConfig::default()
        };
        let err = Pipeline::new(config).run().unwrap_err();
        assert!(matches!(err, MlErr::InvalidConfig(_)));
    }

    #[test]
    fn solver_config_maps_onto_the_model_solver() {
        assert_eq!(
            Solver::from(SolverConfig::NormalEquations),
            Solver::NormalEquations
        );
    }
}
