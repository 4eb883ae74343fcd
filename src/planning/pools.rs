//! Risk buckets and the monthly capacity pools drawn down during allocation

use crate::household::FinancialProfile;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Shortfalls at or below this are treated as fully funded
pub const FUNDING_TOLERANCE: f64 = 1e-6;

/// Risk-tolerance segment of monthly savings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Conservative,
    Moderate,
    Aggressive,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Conservative, Bucket::Moderate, Bucket::Aggressive];

    /// Capitalized display name
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Conservative => "Conservative",
            Bucket::Moderate => "Moderate",
            Bucket::Aggressive => "Aggressive",
        }
    }
}

/// Join bucket labels the way plans display them ("Moderate + Conservative")
pub fn join_labels(buckets: &[Bucket]) -> String {
    buckets
        .iter()
        .map(Bucket::label)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Remaining monthly capacity per bucket
///
/// A plain value: each allocation step takes the pools by value and returns
/// the updated copy, so nothing outside a single run ever sees them change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BucketPools {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

impl Index<Bucket> for BucketPools {
    type Output = f64;

    fn index(&self, bucket: Bucket) -> &f64 {
        match bucket {
            Bucket::Conservative => &self.conservative,
            Bucket::Moderate => &self.moderate,
            Bucket::Aggressive => &self.aggressive,
        }
    }
}

impl IndexMut<Bucket> for BucketPools {
    fn index_mut(&mut self, bucket: Bucket) -> &mut f64 {
        match bucket {
            Bucket::Conservative => &mut self.conservative,
            Bucket::Moderate => &mut self.moderate,
            Bucket::Aggressive => &mut self.aggressive,
        }
    }
}

/// Outcome of draining pools for one goal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draw {
    /// Monthly amount satisfied, measured in growth-scaled capacity
    pub funded: f64,

    /// Real dollars removed from the pools
    pub real_drawn: f64,

    /// Buckets actually touched, in draw order
    pub buckets: Vec<Bucket>,
}

impl Draw {
    /// `None` when no bucket contributed
    pub fn label(&self) -> Option<String> {
        if self.buckets.is_empty() {
            None
        } else {
            Some(join_labels(&self.buckets))
        }
    }
}

impl BucketPools {
    pub fn new(conservative: f64, moderate: f64, aggressive: f64) -> Self {
        Self { conservative, moderate, aggressive }
    }

    /// Split total monthly capacity by the profile's risk allocation
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        let total = profile.total_monthly_capacity();
        let split = profile.effective_risk_allocation();
        Self {
            conservative: total * split.conservative / 100.0,
            moderate: total * split.moderate / 100.0,
            aggressive: total * split.aggressive / 100.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.conservative + self.moderate + self.aggressive
    }

    /// Buckets outside `allowed` that still hold capacity
    pub fn locked_buckets(&self, allowed: &[Bucket]) -> Vec<Bucket> {
        Bucket::ALL
            .iter()
            .copied()
            .filter(|b| !allowed.contains(b) && self[*b] > 0.0)
            .collect()
    }

    /// Drain buckets in `order` until `need` is met or the permitted buckets run dry
    ///
    /// Each bucket can satisfy up to `balance * multiplier`; its balance drops by
    /// `amount / multiplier` and never goes below zero.
    pub fn draw(mut self, order: &[Bucket], need: f64, multiplier: f64) -> (Self, Draw) {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        let mut remaining = need.max(0.0);
        let mut draw = Draw::default();

        for &bucket in order {
            if remaining <= FUNDING_TOLERANCE {
                break;
            }
            let balance = self[bucket];
            if balance <= 0.0 {
                continue;
            }

            let amount = (balance * multiplier).min(remaining);
            let real = amount / multiplier;
            self[bucket] = (balance - real).max(0.0);

            remaining -= amount;
            draw.funded += amount;
            draw.real_drawn += real;
            draw.buckets.push(bucket);
        }

        (self, draw)
    }
}
