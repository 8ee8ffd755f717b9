pub mod experience;
pub mod report;
