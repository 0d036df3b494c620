//! Confidence Scorer
//!
//! Framework carries the largest weight because it decides which test
//! templates apply.

use crate::constants::confidence::{FRAMEWORK_WEIGHT, TYPESCRIPT_WEIGHT, TYPE_WEIGHT};
use crate::types::{Framework, ProjectType};

/// Combine the type, framework and TypeScript signals into a score in [0, 1]
pub fn score(project_type: ProjectType, framework: Framework, typescript: bool) -> f64 {
    let mut score = 0.0;
    if project_type.is_known() {
        score += TYPE_WEIGHT;
    }
    if framework.is_known() {
        score += FRAMEWORK_WEIGHT;
    }
    if typescript {
        score += TYPESCRIPT_WEIGHT;
    }
    score.min(1.0)
}
