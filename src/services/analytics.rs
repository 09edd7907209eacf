// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lift analytics: one-rep-max estimates and personal records.
//!
//! Everything here is pure. Missing or nonsensical numbers degrade to an
//! absent result instead of failing.

use crate::models::Set;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Estimate a one-rep max with the Epley formula, `w * (1 + r / 30)`,
/// rounded to two decimal places.
///
/// Returns `None` when either input is missing or `reps` is not positive.
pub fn one_rep_max(weight: Option<f64>, reps: Option<i64>) -> Option<f64> {
    match (weight, reps) {
        (Some(weight), Some(reps)) if reps > 0 => {
            Some(round_to_hundredths(weight * (1.0 + reps as f64 / 30.0)))
        }
        _ => None,
    }
}

/// Round the exact binary value to two decimals.
///
/// Scaling by 100 first can push a value just above a half-cent onto the
/// tie and round it down, so the decimal formatter does the rounding.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Heaviest set for a user/exercise pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PersonalRecord {
    pub max_weight_set_id: Option<i64>,
    pub max_weight: f64,
}

/// Find the set with the greatest weight.
///
/// The running maximum starts at 0.0 and only a strictly greater weight
/// replaces it, so the first of several equal maxima wins and a set of
/// weight 0 (or less) never becomes the record. With no positive weight
/// the record id is `None` and the weight 0.0.
pub fn find_personal_record<'a, I>(sets: I) -> PersonalRecord
where
    I: IntoIterator<Item = &'a Set>,
{
    let mut record = PersonalRecord {
        max_weight_set_id: None,
        max_weight: 0.0,
    };

    for set in sets {
        if let Some(weight) = set.weight {
            if weight > record.max_weight {
                record.max_weight = weight;
                record.max_weight_set_id = Some(set.id);
            }
        }
    }

    record
}

/// A set annotated with its one-rep-max estimate.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AnalyticalSet {
    pub id: i64,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub comment: Option<String>,
    pub one_rep_max: Option<f64>,
}

impl From<&Set> for AnalyticalSet {
    fn from(set: &Set) -> Self {
        Self {
            id: set.id,
            weight: set.weight,
            reps: set.reps,
            comment: set.comment.clone(),
            one_rep_max: one_rep_max(set.weight, set.reps),
        }
    }
}

/// Record plus per-set estimates for a user/exercise pair.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseSummary {
    pub personal_record: PersonalRecord,
    pub all_sets: Vec<AnalyticalSet>,
}

/// Build the summary for a user's sets of one exercise.
pub fn summarize(sets: &[Set]) -> ExerciseSummary {
    ExerciseSummary {
        personal_record: find_personal_record(sets),
        all_sets: sets.iter().map(AnalyticalSet::from).collect(),
    }
}
