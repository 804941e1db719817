use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// Upper bound on steps a single track may take
pub const MAX_STEPS_PER_TRACK: usize = 1_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct EnergyRange {
    pub min: f64,
    pub max: f64,
}

/// Toy transport settings, read from JSON.
/// Any field left out keeps its default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    // Number of per-worker hit buffers the primaries are split over
    pub workers: usize,
    pub primaries: usize,
    pub tracks_per_primary: usize,
    pub steps_per_track: usize,
    // GeV
    pub primary_energy: EnergyRange,
    // cm, calorimeter is centered on the origin and entered through its -z face
    pub half_extent: [f64; 3],
    pub cells: [usize; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed: 1,
            workers: 4,
            primaries: 64,
            tracks_per_primary: 8,
            steps_per_track: 40,
            primary_energy: EnergyRange { min: 1.0, max: 50.0 },
            half_extent: [60.0, 60.0, 20.0],
            cells: [24, 24, 4],
        }
    }
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        SimConfig::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }
        if self.cells.iter().any(|count| *count == 0) {
            return Err(ConfigError::Invalid(format!("every axis needs at least one cell, got {:?}", self.cells)));
        }
        let cell_count = self.cells.iter().try_fold(1usize, |total, count| total.checked_mul(*count));
        if cell_count.map_or(true, |total| total > i32::MAX as usize) {
            return Err(ConfigError::Invalid(format!("{:?} cells do not fit in a detector id", self.cells)));
        }
        // Track ids run over primaries * tracks_per_primary
        if self.primaries.checked_mul(self.tracks_per_primary).map_or(true, |total| total > i32::MAX as usize) {
            return Err(ConfigError::Invalid(format!(
                "{} primaries with {} tracks each do not fit in a track id", self.primaries, self.tracks_per_primary
            )));
        }
        if self.steps_per_track > MAX_STEPS_PER_TRACK {
            return Err(ConfigError::Invalid(format!(
                "{} steps per track is more than the limit of {}", self.steps_per_track, MAX_STEPS_PER_TRACK
            )));
        }
        if self.half_extent.iter().any(|half| half.is_nan() || *half <= 0.0) {
            return Err(ConfigError::Invalid(format!("half extent must be positive, got {:?}", self.half_extent)));
        }
        let energy = self.primary_energy;
        if energy.min.is_nan() || energy.min <= 0.0 || energy.min > energy.max {
            return Err(ConfigError::Invalid(format!("primary energy range {}..{} is not a positive range", energy.min, energy.max)));
        }
        Ok(())
    }

    pub fn total_tracks(&self) -> usize {
        self.primaries.saturating_mul(self.tracks_per_primary)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = SimConfig::from_json("{}").expect("empty config is valid");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_json_overrides() {
        let config = SimConfig::from_json(r#"{"seed": 99, "cells": [2, 3, 4], "primary_energy": {"min": 5.0, "max": 5.0}}"#)
            .expect("config is valid");

        assert_eq!(config.seed, 99);
        assert_eq!(config.cells, [2, 3, 4]);
        assert_eq!(config.primary_energy, EnergyRange { min: 5.0, max: 5.0 });
        assert_eq!(config.workers, SimConfig::default().workers);
    }

    #[test]
    fn rejects_zero_workers() {
        let result = SimConfig::from_json(r#"{"workers": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_axis() {
        let result = SimConfig::from_json(r#"{"cells": [4, 0, 4]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_cell_count_overflow() {
        let result = SimConfig::from_json(r#"{"cells": [4294967296, 4294967296, 4]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_cells_beyond_detector_ids() {
        let result = SimConfig::from_json(r#"{"cells": [65536, 65536, 1]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_track_id_overflow() {
        let result = SimConfig::from_json(r#"{"primaries": 4294967296, "tracks_per_primary": 4294967296}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SimConfig::from_json(r#"{"primaries": 65536, "tracks_per_primary": 65536}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_excessive_steps() {
        let result = SimConfig::from_json(r#"{"primaries": 1, "tracks_per_primary": 1, "steps_per_track": 18446744073709551615}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.steps_per_track = MAX_STEPS_PER_TRACK;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_flat_calorimeter() {
        let result = SimConfig::from_json(r#"{"half_extent": [10.0, 10.0, 0.0]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_inverted_energy_range() {
        let result = SimConfig::from_json(r#"{"primary_energy": {"min": 10.0, "max": 1.0}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = SimConfig::from_json(r#"{"workers": "many"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SimConfig::load("this/config/does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
