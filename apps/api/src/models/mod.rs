pub mod cv;
pub mod jobs;
