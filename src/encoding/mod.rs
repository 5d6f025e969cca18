mod one_hot;
mod sequence;

pub use one_hot::OneHotEncoder;
pub use sequence::SequenceEncoder;
