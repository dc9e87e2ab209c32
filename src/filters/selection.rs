use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// The filter the user currently has selected. Exactly one is active.
///
/// Static kinds are baked into the downloaded strip; overlay kinds only
/// decorate the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSelection {
    #[default]
    None,
    Vintage,
    Bright,
    Smooth,
    Hearts,
    Stars,
    Sparkles,
}

/// Per-pixel filters that end up in the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticFilterKind {
    #[default]
    None,
    Vintage,
    Bright,
    Smooth,
}

/// Animated decorations shown over the live feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Hearts,
    Stars,
    Sparkles,
}

impl FilterSelection {
    pub const ALL: [FilterSelection; 7] = [
        FilterSelection::None,
        FilterSelection::Vintage,
        FilterSelection::Bright,
        FilterSelection::Smooth,
        FilterSelection::Hearts,
        FilterSelection::Stars,
        FilterSelection::Sparkles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vintage => "vintage",
            Self::Bright => "bright",
            Self::Smooth => "smooth",
            Self::Hearts => "hearts",
            Self::Stars => "stars",
            Self::Sparkles => "sparkles",
        }
    }

    /// The pixel filter to bake into the strip. Overlay kinds bake nothing.
    pub fn static_kind(&self) -> StaticFilterKind {
        match self {
            Self::Vintage => StaticFilterKind::Vintage,
            Self::Bright => StaticFilterKind::Bright,
            Self::Smooth => StaticFilterKind::Smooth,
            Self::None | Self::Hearts | Self::Stars | Self::Sparkles => StaticFilterKind::None,
        }
    }

    /// The overlay to animate over the live preview, if any
    pub fn overlay_kind(&self) -> Option<OverlayKind> {
        match self {
            Self::Hearts => Some(OverlayKind::Hearts),
            Self::Stars => Some(OverlayKind::Stars),
            Self::Sparkles => Some(OverlayKind::Sparkles),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.static_kind() != StaticFilterKind::None
    }

    pub fn is_animated(&self) -> bool {
        self.overlay_kind().is_some()
    }
}

impl From<StaticFilterKind> for FilterSelection {
    fn from(kind: StaticFilterKind) -> Self {
        match kind {
            StaticFilterKind::None => Self::None,
            StaticFilterKind::Vintage => Self::Vintage,
            StaticFilterKind::Bright => Self::Bright,
            StaticFilterKind::Smooth => Self::Smooth,
        }
    }
}

impl From<OverlayKind> for FilterSelection {
    fn from(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::Hearts => Self::Hearts,
            OverlayKind::Stars => Self::Stars,
            OverlayKind::Sparkles => Self::Sparkles,
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterSelection {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|selection| selection.name() == wanted)
            .ok_or(InvalidInputError::UnknownFilter { name: s.to_string() })
    }
}

impl fmt::Display for StaticFilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FilterSelection::from(*self).fmt(f)
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FilterSelection::from(*self).fmt(f)
    }
}
