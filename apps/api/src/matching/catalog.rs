//! Static career reference table. Built at compile time and never mutated.
//!
//! Preconditions on the data (not validated at runtime): `required_gpa > 0`
//! and `related_interests` non-empty for every entry. The scorer guards both
//! divisions anyway and treats a violation as a zero contribution.

use serde::Serialize;

use crate::matching::profile::{PersonalityType, SkillScores, Traits};
use PersonalityType::*;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TraitWeights {
    pub analytical: f64,
    pub creative: f64,
    pub teamwork: f64,
    pub leadership: f64,
    pub technical: f64,
}

impl TraitWeights {
    /// Σ weight × (score / 10) over the five traits.
    pub fn weighted(&self, traits: &Traits) -> f64 {
        self.analytical * normalize(traits.analytical)
            + self.creative * normalize(traits.creative)
            + self.teamwork * normalize(traits.teamwork)
            + self.leadership * normalize(traits.leadership)
            + self.technical * normalize(traits.technical)
    }

    #[cfg(test)]
    pub fn sum(&self) -> f64 {
        self.analytical + self.creative + self.teamwork + self.leadership + self.technical
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillWeights {
    pub programming: f64,
    pub problem_solving: f64,
    pub communication: f64,
    pub system_design: f64,
    pub data_analysis: f64,
}

impl SkillWeights {
    /// Σ weight × (score / 10) over the five skills.
    pub fn weighted(&self, skills: &SkillScores) -> f64 {
        self.programming * normalize(skills.programming)
            + self.problem_solving * normalize(skills.problem_solving)
            + self.communication * normalize(skills.communication)
            + self.system_design * normalize(skills.system_design)
            + self.data_analysis * normalize(skills.data_analysis)
    }

    #[cfg(test)]
    pub fn sum(&self) -> f64 {
        self.programming
            + self.problem_solving
            + self.communication
            + self.system_design
            + self.data_analysis
    }

    /// Weight per skill, keyed by the same names as `SkillScores::entries`.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("programming", self.programming),
            ("problemSolving", self.problem_solving),
            ("communication", self.communication),
            ("systemDesign", self.system_design),
            ("dataAnalysis", self.data_analysis),
        ]
    }
}

fn normalize(score: u8) -> f64 {
    f64::from(score) / 10.0
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "requiredGPA")]
    pub required_gpa: f64,
    pub personality_preference: &'static [PersonalityType],
    pub trait_weights: TraitWeights,
    pub skill_weights: SkillWeights,
    pub related_interests: &'static [&'static str],
}

impl CareerProfile {
    pub fn prefers(&self, personality: Option<PersonalityType>) -> bool {
        personality.is_some_and(|p| self.personality_preference.contains(&p))
    }
}

pub fn career_catalog() -> &'static [CareerProfile] {
    CAREERS
}

pub fn find_career(id: &str) -> Option<&'static CareerProfile> {
    CAREERS.iter().find(|c| c.id == id)
}

/// The first five entries are the core career table. Data Scientist and the
/// four after it extend the table so every job file the advisor targets has
/// a scoring profile; their weights are estimates, not calibrated data.
static CAREERS: &[CareerProfile] = &[
    CareerProfile {
        id: "backend_developer",
        name: "Backend Developer",
        required_gpa: 2.5,
        personality_preference: &[Intj, Intp, Istj, Entj],
        trait_weights: TraitWeights {
            analytical: 0.3,
            creative: 0.1,
            teamwork: 0.2,
            leadership: 0.1,
            technical: 0.3,
        },
        skill_weights: SkillWeights {
            programming: 0.3,
            problem_solving: 0.3,
            communication: 0.1,
            system_design: 0.2,
            data_analysis: 0.1,
        },
        related_interests: &["coding", "data-science", "automation", "cloud", "web-development"],
    },
    CareerProfile {
        id: "frontend_developer",
        name: "Frontend Developer",
        required_gpa: 2.3,
        personality_preference: &[Enfp, Infp, Entp, Intp],
        trait_weights: TraitWeights {
            analytical: 0.2,
            creative: 0.3,
            teamwork: 0.2,
            leadership: 0.1,
            technical: 0.2,
        },
        // Sums to 0.9; kept as-is so scores stay comparable with stored results.
        skill_weights: SkillWeights {
            programming: 0.25,
            problem_solving: 0.2,
            communication: 0.2,
            system_design: 0.15,
            data_analysis: 0.1,
        },
        related_interests: &["design", "web-development", "mobile-apps", "coding"],
    },
    CareerProfile {
        id: "devops_engineer",
        name: "DevOps Engineer",
        required_gpa: 2.7,
        personality_preference: &[Istj, Intj, Estj, Entj],
        trait_weights: TraitWeights {
            analytical: 0.3,
            creative: 0.05,
            teamwork: 0.2,
            leadership: 0.15,
            technical: 0.3,
        },
        skill_weights: SkillWeights {
            programming: 0.2,
            problem_solving: 0.3,
            communication: 0.1,
            system_design: 0.3,
            data_analysis: 0.1,
        },
        related_interests: &["automation", "cloud", "coding", "security"],
    },
    CareerProfile {
        id: "ai_engineer",
        name: "AI Engineer",
        required_gpa: 3.0,
        personality_preference: &[Intj, Intp, Entj, Entp],
        trait_weights: TraitWeights {
            analytical: 0.35,
            creative: 0.2,
            teamwork: 0.1,
            leadership: 0.05,
            technical: 0.3,
        },
        skill_weights: SkillWeights {
            programming: 0.25,
            problem_solving: 0.3,
            communication: 0.0,
            system_design: 0.1,
            data_analysis: 0.35,
        },
        related_interests: &["ai-ml", "data-science", "coding", "automation"],
    },
    CareerProfile {
        id: "iot_engineer",
        name: "IoT Engineer",
        required_gpa: 2.6,
        personality_preference: &[Istp, Intp, Estp, Entp],
        trait_weights: TraitWeights {
            analytical: 0.25,
            creative: 0.2,
            teamwork: 0.15,
            leadership: 0.05,
            technical: 0.35,
        },
        skill_weights: SkillWeights {
            programming: 0.3,
            problem_solving: 0.25,
            communication: 0.1,
            system_design: 0.25,
            data_analysis: 0.1,
        },
        related_interests: &["iot", "hardware", "robotics", "coding", "automation"],
    },
    // Extensions to the core table
    CareerProfile {
        id: "data_scientist",
        name: "Data Scientist",
        required_gpa: 3.2,
        personality_preference: &[Intj, Intp, Istj, Entp],
        trait_weights: TraitWeights {
            analytical: 0.45,
            creative: 0.1,
            teamwork: 0.05,
            leadership: 0.05,
            technical: 0.35,
        },
        skill_weights: SkillWeights {
            programming: 0.2,
            problem_solving: 0.3,
            communication: 0.05,
            system_design: 0.05,
            data_analysis: 0.4,
        },
        related_interests: &["data-science", "ai-ml", "coding", "math"],
    },
    CareerProfile {
        id: "data_analyst",
        name: "Data Analyst",
        required_gpa: 2.5,
        personality_preference: &[Istj, Intj, Estj, Intp],
        trait_weights: TraitWeights {
            analytical: 0.4,
            creative: 0.1,
            teamwork: 0.2,
            leadership: 0.1,
            technical: 0.2,
        },
        skill_weights: SkillWeights {
            programming: 0.15,
            problem_solving: 0.2,
            communication: 0.2,
            system_design: 0.05,
            data_analysis: 0.4,
        },
        related_interests: &["data-science", "math", "business", "statistics"],
    },
    CareerProfile {
        id: "cloud_architect",
        name: "Cloud Architect",
        required_gpa: 3.0,
        personality_preference: &[Intj, Entj, Istj, Estj],
        trait_weights: TraitWeights {
            analytical: 0.3,
            creative: 0.1,
            teamwork: 0.15,
            leadership: 0.2,
            technical: 0.25,
        },
        skill_weights: SkillWeights {
            programming: 0.15,
            problem_solving: 0.25,
            communication: 0.15,
            system_design: 0.35,
            data_analysis: 0.1,
        },
        related_interests: &["cloud", "automation", "security", "networking"],
    },
    CareerProfile {
        id: "information_security_analyst",
        name: "Information Security Analyst",
        required_gpa: 2.8,
        personality_preference: &[Istj, Intj, Istp, Intp],
        trait_weights: TraitWeights {
            analytical: 0.35,
            creative: 0.1,
            teamwork: 0.15,
            leadership: 0.1,
            technical: 0.3,
        },
        skill_weights: SkillWeights {
            programming: 0.2,
            problem_solving: 0.3,
            communication: 0.1,
            system_design: 0.2,
            data_analysis: 0.2,
        },
        related_interests: &["security", "networking", "coding", "automation"],
    },
    CareerProfile {
        id: "mobile_developer",
        name: "Mobile Developer",
        required_gpa: 2.4,
        personality_preference: &[Enfp, Infp, Isfp, Entp],
        trait_weights: TraitWeights {
            analytical: 0.2,
            creative: 0.3,
            teamwork: 0.2,
            leadership: 0.1,
            technical: 0.2,
        },
        skill_weights: SkillWeights {
            programming: 0.3,
            problem_solving: 0.2,
            communication: 0.15,
            system_design: 0.2,
            data_analysis: 0.15,
        },
        related_interests: &["mobile-apps", "design", "coding", "web-development"],
    },
];
