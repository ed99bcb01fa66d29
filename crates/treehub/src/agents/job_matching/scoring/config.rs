use serde::{Deserialize, Serialize};

use super::MatchingError;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Relative importance of each factor. Weights must sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub location: f64,
    pub skill: f64,
    pub availability: f64,
    pub price: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            location: 0.35,
            skill: 0.30,
            availability: 0.20,
            price: 0.15,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.location + self.skill + self.availability + self.price
    }

    pub fn validate(&self) -> Result<(), MatchingError> {
        let weights = [self.location, self.skill, self.availability, self.price];
        if weights
            .iter()
            .any(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err(MatchingError::InvalidWeights { sum: self.sum() });
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(MatchingError::InvalidWeights { sum });
        }

        Ok(())
    }

    /// Weights for urgent jobs: availability counts double, then renormalised.
    pub fn for_urgent_job(&self) -> Self {
        let boosted = Self {
            availability: self.availability * 2.0,
            ..*self
        };
        let sum = boosted.sum();
        if sum <= 0.0 {
            return *self;
        }

        Self {
            location: boosted.location / sum,
            skill: boosted.skill / sum,
            availability: boosted.availability / sum,
            price: boosted.price / sum,
        }
    }
}

/// Rubric configuration for the match scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: MatchWeights,
    pub max_distance_miles: f64,
    pub minimum_match_score: f64,
    pub max_candidates: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            max_distance_miles: 50.0,
            minimum_match_score: 40.0,
            max_candidates: 10,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), MatchingError> {
        self.weights.validate()?;

        if !self.max_distance_miles.is_finite() || self.max_distance_miles < 0.0 {
            return Err(MatchingError::InvalidConfig(format!(
                "max distance {} must be a non-negative number of miles",
                self.max_distance_miles
            )));
        }
        if !(0.0..=100.0).contains(&self.minimum_match_score) {
            return Err(MatchingError::InvalidConfig(format!(
                "minimum match score {} must be within 0..=100",
                self.minimum_match_score
            )));
        }
        if self.max_candidates == 0 {
            return Err(MatchingError::InvalidConfig(
                "max candidates must be at least one".to_string(),
            ));
        }

        Ok(())
    }
}
