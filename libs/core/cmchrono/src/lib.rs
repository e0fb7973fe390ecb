pub mod duration;
pub mod timepoint;
