//! Modèle de figure Plotly (`{"data": [...], "layout": {...}}`)

use serde::Serialize;

use crate::config::Center;

/// Figure prête à être passée à `Plotly.newPlot`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Première (et unique) trace de la figure
    pub fn trace(&self) -> Option<&Trace> {
        self.data.first()
    }

    /// Nombre de points tracés (régions, barres ou parts)
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Trace Plotly, discriminée par son champ `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choroplethmapbox(ChoroplethTrace),
    Bar(BarTrace),
    Pie(PieTrace),
}

impl Trace {
    pub fn len(&self) -> usize {
        match self {
            Trace::Choroplethmapbox(trace) => trace.locations.len(),
            Trace::Bar(trace) => trace.y.len(),
            Trace::Pie(trace) => trace.labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    /// FeatureCollection des régions du sous-ensemble
    pub geojson: serde_json::Value,
    /// Codes région, reliés à l'`id` des features
    pub locations: Vec<String>,
    pub z: Vec<Option<f64>>,
    /// Noms des régions (survol)
    pub text: Vec<String>,
    pub featureidkey: String,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<Option<f64>>,
    pub y: Vec<String>,
    pub orientation: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub values: Vec<Option<f64>>,
    pub labels: Vec<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    pub margin: Margin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub center: Center,
    pub zoom: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: 0,
            r: 0,
            t: 40,
            b: 0,
        }
    }
}
