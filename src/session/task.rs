use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Master,
    ];

    /// English name, embedded verbatim in generation prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Master => "Master",
        }
    }

    /// Locale key fragment for UI labels and card descriptions.
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Master => "master",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(name))
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One generated reference snippet plus its metadata. Immutable once
/// created; a regeneration produces a new task rather than mutating this one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub code: String,
    pub explanation: String,
    pub difficulty: Difficulty,
}

/// Scored result of comparing a submission against its task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackResult {
    pub score: u8,
    pub is_correct: bool,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_cycle_wraps() {
        assert_eq!(Difficulty::Master.next(), Difficulty::Beginner);
        assert_eq!(Difficulty::Beginner.prev(), Difficulty::Master);
        assert_eq!(Difficulty::Beginner.next(), Difficulty::Intermediate);
    }

    #[test]
    fn test_difficulty_from_name() {
        assert_eq!(Difficulty::from_name("beginner"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::from_name("Master"), Some(Difficulty::Master));
        assert_eq!(Difficulty::from_name("expert"), None);
    }

    #[test]
    fn test_difficulty_names_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(d.as_str()), Some(d));
        }
    }
}
