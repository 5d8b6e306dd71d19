pub mod dataset;
pub mod observation;
pub mod reading;
pub mod season;

pub use dataset::{Dataset, DatasetSummary};
pub use observation::Observation;
pub use reading::CurrentReading;
pub use season::Season;
