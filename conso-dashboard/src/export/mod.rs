//! Écriture des figures (JSON Plotly) et du tableau de bord HTML

pub mod html;
pub mod json;

pub use html::{render_dashboard, write_dashboard, Panel};
pub use json::write_figure;
