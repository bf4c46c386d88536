pub mod report;
pub mod tune;
