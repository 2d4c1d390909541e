//! Input normalization
//!
//! Pure functions only: tier derivation from years of experience, free-text
//! categorical parsing, and the role to skill recommendation taxonomy.

mod categorical;
mod experience;
mod taxonomy;

pub use experience::{
    experience_level_for_years, RemoteCategory, ENTRY_MAX_YEARS, MID_MAX_YEARS, SENIOR_MAX_YEARS,
};
pub use taxonomy::{
    match_skill_set, recommend_skills, SkillRecommendation, SkillSet, HEURISTIC_CASCADE,
    ROLE_TAXONOMY,
};
