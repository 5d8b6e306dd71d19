pub mod dataset_reader;

pub use dataset_reader::{parse_timestamp, DatasetReader};
