use std::str::FromStr;

/// Named playback speeds understood by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeedPreset {
    #[default]
    Normal,
    Fast,
    Slow,
    Faster,
    Slower,
    Fastest,
    Slowest,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 7] = [
        SpeedPreset::Normal,
        SpeedPreset::Fast,
        SpeedPreset::Slow,
        SpeedPreset::Faster,
        SpeedPreset::Slower,
        SpeedPreset::Fastest,
        SpeedPreset::Slowest,
    ];

    /// Speed multiplier sent to the inference server
    pub fn value(&self) -> f32 {
        match self {
            SpeedPreset::Normal => 1.0,
            SpeedPreset::Fast => 1.1,
            SpeedPreset::Slow => 0.9,
            SpeedPreset::Faster => 1.2,
            SpeedPreset::Slower => 0.8,
            SpeedPreset::Fastest => 1.3,
            SpeedPreset::Slowest => 0.7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Normal => "normal",
            SpeedPreset::Fast => "fast",
            SpeedPreset::Slow => "slow",
            SpeedPreset::Faster => "faster",
            SpeedPreset::Slower => "slower",
            SpeedPreset::Fastest => "fastest",
            SpeedPreset::Slowest => "slowest",
        }
    }

    /// Resolve an optional label, falling back to `Normal` when it is
    /// absent or unknown.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim).filter(|l| !l.is_empty()) {
            None => SpeedPreset::Normal,
            Some(label) => label.parse().unwrap_or_else(|_| {
                tracing::warn!(label = label, "Unknown speed label, using normal speed");
                SpeedPreset::Normal
            }),
        }
    }
}

impl FromStr for SpeedPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        SpeedPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == lowered)
            .ok_or_else(|| format!("unknown speed label: {}", s))
    }
}

impl std::fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
