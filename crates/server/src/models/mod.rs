pub mod record;
pub mod submission;
pub mod tutorial;
pub mod video;
