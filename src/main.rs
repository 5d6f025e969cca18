use std::io;

use command_predictor::{Pipeline, PipelineConfig};
use log::info;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = PipelineConfig::from_env()?;
    let example = config.example.clone();
    let report = Pipeline::new(config).run()?;

    println!("Model Performance:");
    println!("Training R² score: {:.4}", report.train_r2);
    println!("Testing R² score: {:.4}", report.test_r2);

    let predicted = report.predictor.predict(&example)?;
    println!("Input: {}", example.join(" "));
    println!("Predicted next word: {predicted}");

    info!(features = report.features, targets = report.predictor.targets().len(); "done");
    Ok(())
}
