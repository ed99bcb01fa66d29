//! Contractor-to-job matching.
//!
//! [`MatchScorer`] blends four factor scores (location, skill, availability,
//! price) into one weighted match score and ranks candidates. The
//! [`JobMatchingService`] loads candidates through a [`ContractorDirectory`]
//! and notifies strong matches through a [`MatchPublisher`].

pub mod domain;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ContractorProfile, FactorScore, JobPosting, MatchFactor, MatchRecommendation, MatchResult,
};
pub use repository::{
    ContractorDirectory, DirectoryError, MatchNotification, MatchPublisher, MatchReport,
    PublishError,
};
pub use router::matching_router;
pub use scoring::{MatchScorer, MatchWeights, MatchingConfig, MatchingError};
pub use service::{JobMatchingService, MatchingServiceError};
