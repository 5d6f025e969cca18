mod commands;
mod preprocess;
mod split;

pub use commands::{COMMANDS, generate_commands};
pub use preprocess::{Padder, Sample, preprocess};
pub use split::{Split, train_test_split};
