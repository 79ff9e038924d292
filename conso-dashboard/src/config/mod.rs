//! Configuration du tableau de bord

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use conso_gaz::{Hour, PipelineOptions};
use serde::{Deserialize, Serialize};

/// Fichiers historiques du tableau de bord
pub const DEFAULT_CSV: &str = "courbe-de-charge-eldgrd-regional-grtgaz-terega.csv";
pub const DEFAULT_GEOJSON: &str = "regions.geojson";

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Préparation des données (colonnes, séparateur, opérateur)
    pub pipeline: PipelineOptions,

    /// Rendu de la carte
    pub map: MapStyle,

    /// Bornes du sélecteur d'année
    pub years: YearBounds,

    /// Valeurs initiales des sélecteurs
    pub defaults: SelectionDefaults,
}

/// Style de la carte choroplèthe
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapStyle {
    /// Fond de carte mapbox
    pub style: String,

    /// Centre de la France métropolitaine
    pub center: Center,

    /// Zoom sans heure sélectionnée
    pub zoom: f64,

    /// Zoom quand une heure est sélectionnée
    pub zoom_hourly: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            style: "carto-positron".to_string(),
            center: Center {
                lat: 46.232192999999995,
                lon: 2.209666999999996,
            },
            zoom: 4.0,
            zoom_hourly: 3.0,
        }
    }
}

impl MapStyle {
    /// Zoom à appliquer selon la présence d'une heure
    pub fn zoom_for(&self, hour: Option<Hour>) -> f64 {
        match hour {
            Some(_) => self.zoom_hourly,
            None => self.zoom,
        }
    }
}

/// Coordonnées du centre de la carte
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// Bornes du sélecteur d'année
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 2018,
            max: 2023,
        }
    }
}

impl YearBounds {
    pub fn range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

/// Valeurs initiales des sélecteurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectionDefaults {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            year: 2018,
            month: 8,
            day: 16,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::load_embedded(include_str!("presets/default.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: default", preset),
        }
    }

    /// Nom de preset ou chemin vers un fichier JSON
    pub fn resolve(name: &str) -> Result<Self> {
        let path = Path::new(name);
        if path.extension().is_some_and(|ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(name)
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }
}

/// Chemins des deux fichiers sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub consumption: PathBuf,
    pub regions: PathBuf,
}

impl DataSources {
    /// Argument explicite, puis variables d'environnement
    /// (`CONSO_CSV`, `CONSO_GEOJSON`), puis fichiers historiques
    pub fn resolve(consumption: Option<PathBuf>, regions: Option<PathBuf>) -> Self {
        Self {
            consumption: consumption
                .or_else(|| std::env::var_os("CONSO_CSV").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV)),
            regions: regions
                .or_else(|| std::env::var_os("CONSO_GEOJSON").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GEOJSON)),
        }
    }
}
