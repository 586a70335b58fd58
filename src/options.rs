use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::GenError;
use crate::grid::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeaStyle {
    #[default]
    Normal,
    /// Currently generated the same way as `Normal`.
    Sharp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LakeStyle {
    #[default]
    Flood,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaOptions {
    pub direction: Direction,
    /// Total sea cells, including the seed.
    pub count: usize,
    pub label: Label,
    pub bias_percent: i32,
    pub style: SeaStyle,
}

impl Default for SeaOptions {
    fn default() -> Self {
        SeaOptions {
            direction: Direction::Top,
            count: 1024,
            label: 1,
            bias_percent: 50,
            style: SeaStyle::Normal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LakeOptions {
    pub count: usize,
    pub label: Label,
    pub min_distance_from_water: usize,
    pub style: LakeStyle,
}

impl Default for LakeOptions {
    fn default() -> Self {
        LakeOptions {
            count: 64,
            label: 2,
            min_distance_from_water: 4,
            style: LakeStyle::Flood,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub seed_warmup_draws: u32,
    pub default_land_label: Label,
    pub sea: SeaOptions,
    pub lake: LakeOptions,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            width: 64,
            height: 64,
            seed: 0,
            seed_warmup_draws: 0,
            default_land_label: 0,
            sea: SeaOptions::default(),
            lake: LakeOptions::default(),
        }
    }
}

impl GenerationOptions {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        GenerationOptions {
            width,
            height,
            seed,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GenError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, GenError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn validate(&self) -> Result<(), GenError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let labels = [
            ("land", self.default_land_label),
            ("sea", self.sea.label),
            ("lake", self.lake.label),
        ];
        for (i, &(first, label)) in labels.iter().enumerate() {
            if let Some(&(second, _)) = labels[i + 1..].iter().find(|(_, other)| *other == label) {
                return Err(GenError::DuplicateLabel { label, first, second });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GenerationOptions::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "width": 32,
            "height": 16,
            "seed": 7,
            "sea": { "direction": "left", "count": 100 },
            "lake": { "min_distance_from_water": 2 }
        }"#;
        let options = GenerationOptions::from_json_str(json).unwrap();
        assert_eq!(options.width, 32);
        assert_eq!(options.cell_count(), 512);
        assert_eq!(options.sea.direction, Direction::Left);
        assert_eq!(options.sea.count, 100);
        assert_eq!(options.sea.label, 1);
        assert_eq!(options.sea.style, SeaStyle::Normal);
        assert_eq!(options.lake.count, 64);
        assert_eq!(options.lake.min_distance_from_water, 2);
    }

    #[test]
    fn test_bad_json() {
        let result = GenerationOptions::from_json_str(r#"{ "sea": { "direction": "up" } }"#);
        assert!(matches!(result, Err(GenError::Options(_))));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let options = GenerationOptions::new(0, 10, 1);
        assert!(matches!(
            options.validate(),
            Err(GenError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_shared_label_rejected() {
        let mut options = GenerationOptions::default();
        options.lake.label = options.sea.label;
        match options.validate() {
            Err(GenError::DuplicateLabel { first, second, .. }) => {
                assert_eq!(first, "sea");
                assert_eq!(second, "lake");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
