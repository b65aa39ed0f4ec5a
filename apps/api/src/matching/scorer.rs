//! Career-fit scorer: a deterministic, explainable ranking of the static
//! career catalog for one student profile.
//!
//! Per career the final score is a weighted sum of five components:
//!
//! | component   | weight | value                                              |
//! |-------------|--------|----------------------------------------------------|
//! | GPA         | 0.20   | 1.0 when the bar is met, else `gpa / requiredGPA`  |
//! | personality | 0.15   | full on a preferred type, else fixed 0.05 credit   |
//! | traits      | 0.30   | Σ traitWeight × score/10                           |
//! | skills      | 0.25   | Σ skillWeight × score/10                           |
//! | interests   | 0.10   | `|matched| / |career.relatedInterests|`            |
//!
//! The sum is clamped to 1.0, then per-career challenge rules run.
//! Output is sorted by score descending (ties keep catalog order) and cut to 5.

use serde::{Deserialize, Serialize};

use crate::matching::catalog::{career_catalog, CareerProfile};
use crate::matching::profile::StudentProfile;

pub const GPA_WEIGHT: f64 = 0.20;
pub const PERSONALITY_WEIGHT: f64 = 0.15;
pub const PERSONALITY_PARTIAL_CREDIT: f64 = 0.05;
pub const TRAIT_WEIGHT: f64 = 0.30;
pub const SKILL_WEIGHT: f64 = 0.25;
pub const INTEREST_WEIGHT: f64 = 0.10;

pub const STRONG_TRAIT_THRESHOLD: u8 = 7;
pub const WEAK_SKILL_THRESHOLD: u8 = 5;
/// Only skills the career leans on above this weight are flagged as gaps.
pub const WEAK_SKILL_MIN_WEIGHT: f64 = 0.2;
pub const MAX_MATCHES: usize = 5;

pub const INTERESTS_NOT_ALIGNED: &str = "Interests are not fully aligned with this career";

/// Weighted contribution of each component to `match_score`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub gpa: f64,
    pub personality: f64,
    pub traits: f64,
    pub skills: f64,
    pub interests: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.gpa + self.personality + self.traits + self.skills + self.interests
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerMatch {
    pub career: String,
    pub career_id: String,
    pub match_score: f64,
    pub reasons: Vec<String>,
    pub challenges: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// A hard-coded extra challenge attached to one career.
struct ChallengeRule {
    career_id: &'static str,
    applies: fn(&StudentProfile) -> bool,
    message: &'static str,
}

static CHALLENGE_RULES: &[ChallengeRule] = &[
    ChallengeRule {
        career_id: "ai_engineer",
        applies: gpa_below_ai_bar,
        message: "AI careers demand a strong math foundation (a higher GPA would help)",
    },
    ChallengeRule {
        career_id: "devops_engineer",
        applies: weak_teamwork,
        message: "DevOps requires strong teamwork",
    },
];

fn gpa_below_ai_bar(profile: &StudentProfile) -> bool {
    profile.gpa < 3.5
}

fn weak_teamwork(profile: &StudentProfile) -> bool {
    profile.traits.teamwork < 6
}

/// Ranks the static career catalog for `profile`. Pure: same input, same output.
pub fn score_careers(profile: &StudentProfile) -> Vec<CareerMatch> {
    rank(profile, career_catalog())
}

fn rank(profile: &StudentProfile, careers: &[CareerProfile]) -> Vec<CareerMatch> {
    let profile = profile.clamped();
    let mut matches: Vec<CareerMatch> = careers
        .iter()
        .map(|career| score_clamped(&profile, career))
        .collect();

    // sort_by is stable, so equal scores keep catalog order
    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    matches.truncate(MAX_MATCHES);
    matches
}

/// Scores a single career. Independent of every other career in the table.
pub fn score_career(profile: &StudentProfile, career: &CareerProfile) -> CareerMatch {
    score_clamped(&profile.clamped(), career)
}

fn score_clamped(profile: &StudentProfile, career: &CareerProfile) -> CareerMatch {
    let mut reasons = Vec::new();
    let mut challenges = Vec::new();
    let mut breakdown = ScoreBreakdown::default();

    // 1. GPA
    if profile.gpa >= career.required_gpa {
        breakdown.gpa = GPA_WEIGHT;
        reasons.push(format!(
            "GPA {:.1} meets the requirement for this career",
            profile.gpa
        ));
    } else {
        breakdown.gpa = ratio(profile.gpa, career.required_gpa) * GPA_WEIGHT;
        challenges.push(format!(
            "Current GPA is below the recommended level ({})",
            career.required_gpa
        ));
    }

    // 2. Personality (no challenge on a miss)
    if career.prefers(profile.personality_type) {
        breakdown.personality = PERSONALITY_WEIGHT;
        if let Some(personality) = profile.personality_type {
            reasons.push(format!(
                "Personality type {personality} is a strong fit for this career"
            ));
        }
    } else {
        breakdown.personality = PERSONALITY_PARTIAL_CREDIT;
    }

    // 3. Traits
    breakdown.traits = career.trait_weights.weighted(&profile.traits) * TRAIT_WEIGHT;
    let strong_traits: Vec<&str> = profile
        .traits
        .entries()
        .into_iter()
        .filter(|(_, score)| *score >= STRONG_TRAIT_THRESHOLD)
        .map(|(name, _)| name)
        .collect();
    if !strong_traits.is_empty() {
        reasons.push(format!("Strengths in {}", strong_traits.join(", ")));
    }

    // 4. Skills
    breakdown.skills = career.skill_weights.weighted(&profile.skills) * SKILL_WEIGHT;
    let weak_skills: Vec<&str> = profile
        .skills
        .entries()
        .into_iter()
        .zip(career.skill_weights.entries())
        .filter(|((_, score), (_, weight))| {
            *weight > WEAK_SKILL_MIN_WEIGHT && *score < WEAK_SKILL_THRESHOLD
        })
        .map(|((name, _), _)| name)
        .collect();
    if !weak_skills.is_empty() {
        challenges.push(format!("Skills to improve: {}", weak_skills.join(", ")));
    }

    // 5. Interests
    let matched = matching_interests(&profile.interests, career.related_interests);
    breakdown.interests =
        ratio(matched.len() as f64, career.related_interests.len() as f64) * INTEREST_WEIGHT;
    if matched.is_empty() {
        challenges.push(INTERESTS_NOT_ALIGNED.to_string());
    } else {
        reasons.push(format!("Matching interests: {}", matched.join(", ")));
    }

    // 6. Clamp
    let match_score = breakdown.total().min(1.0);

    // 7. Career-specific rules
    challenges.extend(
        CHALLENGE_RULES
            .iter()
            .filter(|rule| rule.career_id == career.id && (rule.applies)(profile))
            .map(|rule| rule.message.to_string()),
    );

    CareerMatch {
        career: career.name.to_string(),
        career_id: career.id.to_string(),
        match_score,
        reasons,
        challenges,
        breakdown,
    }
}

/// Student interests that the career also lists, in the student's order,
/// each counted once.
fn matching_interests<'a>(interests: &'a [String], related: &[&str]) -> Vec<&'a str> {
    let mut matched: Vec<&str> = Vec::new();
    for interest in interests {
        let interest = interest.as_str();
        if related.contains(&interest) && !matched.contains(&interest) {
            matched.push(interest);
        }
    }
    matched
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
