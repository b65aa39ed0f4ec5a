use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MAX_GPA: f64 = 4.0;
pub const MAX_SCORE: u8 = 10;
const NEUTRAL_SCORE: u8 = 5;

/// The 16 four-letter personality labels used by career preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum PersonalityType {
    Intj,
    Intp,
    Entj,
    Entp,
    Infj,
    Infp,
    Enfj,
    Enfp,
    Istj,
    Isfj,
    Estj,
    Esfj,
    Istp,
    Isfp,
    Estp,
    Esfp,
}

impl PersonalityType {
    pub const ALL: [PersonalityType; 16] = [
        PersonalityType::Intj,
        PersonalityType::Intp,
        PersonalityType::Entj,
        PersonalityType::Entp,
        PersonalityType::Infj,
        PersonalityType::Infp,
        PersonalityType::Enfj,
        PersonalityType::Enfp,
        PersonalityType::Istj,
        PersonalityType::Isfj,
        PersonalityType::Estj,
        PersonalityType::Esfj,
        PersonalityType::Istp,
        PersonalityType::Isfp,
        PersonalityType::Estp,
        PersonalityType::Esfp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityType::Intj => "INTJ",
            PersonalityType::Intp => "INTP",
            PersonalityType::Entj => "ENTJ",
            PersonalityType::Entp => "ENTP",
            PersonalityType::Infj => "INFJ",
            PersonalityType::Infp => "INFP",
            PersonalityType::Enfj => "ENFJ",
            PersonalityType::Enfp => "ENFP",
            PersonalityType::Istj => "ISTJ",
            PersonalityType::Isfj => "ISFJ",
            PersonalityType::Estj => "ESTJ",
            PersonalityType::Esfj => "ESFJ",
            PersonalityType::Istp => "ISTP",
            PersonalityType::Isfp => "ISFP",
            PersonalityType::Estp => "ESTP",
            PersonalityType::Esfp => "ESFP",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        PersonalityType::ALL
            .into_iter()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| format!("unknown personality type '{s}'"))
    }
}

impl TryFrom<String> for PersonalityType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Unknown labels become `None` so the scorer gives them partial credit.
fn lenient_personality<'de, D>(deserializer: D) -> Result<Option<PersonalityType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.and_then(|l| l.parse().ok()))
}

fn neutral() -> u8 {
    NEUTRAL_SCORE
}

/// Self-assessed personality traits, each scored 0–10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    #[serde(default = "neutral")]
    pub analytical: u8,
    #[serde(default = "neutral")]
    pub creative: u8,
    #[serde(default = "neutral")]
    pub teamwork: u8,
    #[serde(default = "neutral")]
    pub leadership: u8,
    #[serde(default = "neutral")]
    pub technical: u8,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            analytical: NEUTRAL_SCORE,
            creative: NEUTRAL_SCORE,
            teamwork: NEUTRAL_SCORE,
            leadership: NEUTRAL_SCORE,
            technical: NEUTRAL_SCORE,
        }
    }
}

impl Traits {
    /// Named scores in a fixed order, used for reason strings.
    pub fn entries(&self) -> [(&'static str, u8); 5] {
        [
            ("analytical", self.analytical),
            ("creative", self.creative),
            ("teamwork", self.teamwork),
            ("leadership", self.leadership),
            ("technical", self.technical),
        ]
    }

    fn clamped(self) -> Self {
        Self {
            analytical: self.analytical.min(MAX_SCORE),
            creative: self.creative.min(MAX_SCORE),
            teamwork: self.teamwork.min(MAX_SCORE),
            leadership: self.leadership.min(MAX_SCORE),
            technical: self.technical.min(MAX_SCORE),
        }
    }
}

/// Self-assessed skill proficiencies, each scored 0–10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillScores {
    #[serde(default = "neutral")]
    pub programming: u8,
    #[serde(default = "neutral")]
    pub problem_solving: u8,
    #[serde(default = "neutral")]
    pub communication: u8,
    #[serde(default = "neutral")]
    pub system_design: u8,
    #[serde(default = "neutral")]
    pub data_analysis: u8,
}

impl Default for SkillScores {
    fn default() -> Self {
        Self {
            programming: NEUTRAL_SCORE,
            problem_solving: NEUTRAL_SCORE,
            communication: NEUTRAL_SCORE,
            system_design: NEUTRAL_SCORE,
            data_analysis: NEUTRAL_SCORE,
        }
    }
}

impl SkillScores {
    /// Named scores in a fixed order. Names match the wire format.
    pub fn entries(&self) -> [(&'static str, u8); 5] {
        [
            ("programming", self.programming),
            ("problemSolving", self.problem_solving),
            ("communication", self.communication),
            ("systemDesign", self.system_design),
            ("dataAnalysis", self.data_analysis),
        ]
    }

    fn clamped(self) -> Self {
        Self {
            programming: self.programming.min(MAX_SCORE),
            problem_solving: self.problem_solving.min(MAX_SCORE),
            communication: self.communication.min(MAX_SCORE),
            system_design: self.system_design.min(MAX_SCORE),
            data_analysis: self.data_analysis.min(MAX_SCORE),
        }
    }
}

/// Input to the career-fit scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub gpa: f64,
    #[serde(default, deserialize_with = "lenient_personality")]
    pub personality_type: Option<PersonalityType>,
    #[serde(default)]
    pub traits: Traits,
    #[serde(default)]
    pub skills: SkillScores,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl StudentProfile {
    /// Rejects values outside the documented ranges. Used at the HTTP boundary.
    pub fn validate(&self) -> Result<(), String> {
        if !self.gpa.is_finite() || !(0.0..=MAX_GPA).contains(&self.gpa) {
            return Err(format!("gpa must be between 0.0 and {MAX_GPA}"));
        }
        let out_of_range: Vec<&str> = self
            .traits
            .entries()
            .into_iter()
            .chain(self.skills.entries())
            .filter(|(_, v)| *v > MAX_SCORE)
            .map(|(name, _)| name)
            .collect();
        if !out_of_range.is_empty() {
            return Err(format!(
                "scores must be between 0 and {MAX_SCORE}: {}",
                out_of_range.join(", ")
            ));
        }
        Ok(())
    }

    /// Copy of the profile forced into range: GPA into [0, 4] (NaN becomes 0),
    /// scores capped at 10, interest tags trimmed and lowercased.
    pub fn clamped(&self) -> Self {
        let gpa = if self.gpa.is_nan() {
            0.0
        } else {
            self.gpa.clamp(0.0, MAX_GPA)
        };
        Self {
            gpa,
            personality_type: self.personality_type,
            traits: self.traits.clamped(),
            skills: self.skills.clamped(),
            interests: self
                .interests
                .iter()
                .map(|i| i.trim().to_lowercase())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }
}
