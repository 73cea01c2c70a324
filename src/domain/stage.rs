//! Tournament stage classification of a match label.

use serde::{Deserialize, Serialize};

/// Round a match belongs to.
///
/// Match files carry either a group label (`A`, `B`, ...) or a stage name
/// (`GROUP`, `ROUND_OF_SIXTEEN`, ...). Only the knockout names are
/// recognised; every other label is treated as group play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Group,
    RoundOfSixteen,
    Quarterfinals,
    Semifinals,
    ThirdPlace,
    Final,
}

impl Stage {
    /// Classify a stored stage/group label.
    pub fn classify(label: &str) -> Stage {
        match label.trim().to_ascii_uppercase().as_str() {
            "ROUND_OF_SIXTEEN" => Stage::RoundOfSixteen,
            "QUARTERFINALS" => Stage::Quarterfinals,
            "SEMIFINALS" => Stage::Semifinals,
            "THIRD_PLACE" => Stage::ThirdPlace,
            "FINAL" => Stage::Final,
            _ => Stage::Group,
        }
    }

    pub fn is_knockout(&self) -> bool {
        !matches!(self, Stage::Group)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Group => "GROUP",
            Stage::RoundOfSixteen => "ROUND_OF_SIXTEEN",
            Stage::Quarterfinals => "QUARTERFINALS",
            Stage::Semifinals => "SEMIFINALS",
            Stage::ThirdPlace => "THIRD_PLACE",
            Stage::Final => "FINAL",
        };
        write!(f, "{}", s)
    }
}
