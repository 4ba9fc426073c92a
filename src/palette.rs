//! Front/back color pairs shared by papers and ribbons

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A two-sided color: `front` faces the viewer, `back` shows when the entity
/// flips over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub front: String,
    pub back: String,
}

impl ColorPair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// The four built-in pairs used when options carry no palette
pub fn default_palette() -> Vec<ColorPair> {
    vec![
        ColorPair::new("#df0049", "#660671"),
        ColorPair::new("#00e857", "#005291"),
        ColorPair::new("#2bebbc", "#05798a"),
        ColorPair::new("#ffd200", "#b06c00"),
    ]
}

/// Draw a uniformly random pair from `palette`. `palette` must be non-empty.
pub fn random_pair(rng: &mut impl Rng, palette: &[ColorPair]) -> ColorPair {
    palette[rng.random_range(0..palette.len())].clone()
}
