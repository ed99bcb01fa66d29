//! Rule-based agents that score jobs, storm-driven leads, and equipment.

pub mod equipment;
pub mod job_matching;
pub mod storm_response;
