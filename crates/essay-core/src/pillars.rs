//! The five evaluative pillars used by heuristic scoring

use serde::{Deserialize, Serialize};

/// Fixed evaluative dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(rename = "Critical Thinking")]
    CriticalThinking,
    Communication,
    Collaboration,
    Creativity,
    #[serde(rename = "Global Perspective")]
    GlobalPerspective,
}

impl Pillar {
    /// All pillars, in scoring and display order
    pub const ALL: [Pillar; 5] = [
        Pillar::CriticalThinking,
        Pillar::Communication,
        Pillar::Collaboration,
        Pillar::Creativity,
        Pillar::GlobalPerspective,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pillar::CriticalThinking => "Critical Thinking",
            Pillar::Communication => "Communication",
            Pillar::Collaboration => "Collaboration",
            Pillar::Creativity => "Creativity",
            Pillar::GlobalPerspective => "Global Perspective",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Pillar::CriticalThinking => {
                "Ability to analyze information objectively and make reasoned judgments"
            }
            Pillar::Communication => "Clarity of expression and effective conveyance of ideas",
            Pillar::Collaboration => {
                "Integration of diverse perspectives and interdisciplinary connections"
            }
            Pillar::Creativity => "Original thinking and innovative approaches to problem-solving",
            Pillar::GlobalPerspective => "Understanding of global contexts and cultural awareness",
        }
    }

    /// Look a pillar up by its display name
    pub fn from_name(name: &str) -> Option<Pillar> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
