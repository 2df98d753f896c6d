use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Camera shooting mode that owns a configuration section.
///
/// Variant order is the order detection walks the modes in, so it is part of
/// the deterministic output of a detection pass.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    #[strum(to_string = "Manual", serialize = "M")]
    Manual,
    #[strum(to_string = "Program", serialize = "P")]
    Program,
    #[strum(to_string = "Aperture", serialize = "A")]
    Aperture,
    #[strum(to_string = "Shutter", serialize = "S")]
    Shutter,
    #[strum(to_string = "Auto")]
    Auto,
    #[strum(to_string = "User1", serialize = "U1")]
    User1,
    #[strum(to_string = "User2", serialize = "U2")]
    User2,
    #[strum(to_string = "User3", serialize = "U3")]
    User3,
}

impl Mode {
    /// Mode-identifier byte the camera stores at `section + 1240`.
    pub fn code(&self) -> u8 {
        match self {
            Self::Program => 29,
            Self::Shutter => 30,
            Self::Aperture => 31,
            Self::Manual => 32,
            Self::Auto => 33,
            Self::User1 => 34,
            Self::User2 => 35,
            Self::User3 => 36,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::iter().find(|mode| mode.code() == code)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Manual => "M",
            Self::Program => "P",
            Self::Aperture => "A",
            Self::Shutter => "S",
            Self::Auto => "AUTO",
            Self::User1 => "U1",
            Self::User2 => "U2",
            Self::User3 => "U3",
        }
    }

    /// Get the name the camera menus use (e.g., "Aperture Priority")
    pub fn expand_name(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Program => "Program",
            Self::Aperture => "Aperture Priority",
            Self::Shutter => "Shutter Priority",
            Self::Auto => "Auto",
            Self::User1 => "User Setting 1",
            Self::User2 => "User Setting 2",
            Self::User3 => "User Setting 3",
        }
    }
}

/// Which detection phase produced a candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
pub enum DetectionPhase {
    #[strum(serialize = "known-offset")]
    KnownOffset,
    #[strum(serialize = "full-scan")]
    FullScan,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoStaticStr,
    Display,
)]
pub enum Confidence {
    #[default]
    #[strum(serialize = "high")]
    High,
    /// Another mode's section overlaps this one.
    #[strum(serialize = "low")]
    Low,
}
