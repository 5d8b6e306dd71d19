pub mod synthetic;

pub use synthetic::SyntheticGenerator;
