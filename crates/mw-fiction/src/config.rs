use serde::{Deserialize, Serialize};

/// Register of generated region and lore text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProseTone {
    /// Plain, gazetteer-style statements.
    #[default]
    Formal,
    /// Adds an ominous or epic closing line.
    Dramatic,
}

/// Configuration for [`crate::TemplateProse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProseConfig {
    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
    pub tone: ProseTone,
}

impl ProseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed so the same calls produce the same text.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tone(mut self, tone: ProseTone) -> Self {
        self.tone = tone;
        self
    }
}
