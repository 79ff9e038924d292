//! Tableau de bord HTML autonome (Plotly chargé depuis le CDN)

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::charts::{ChartKind, Figure};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Un panneau du tableau de bord
#[derive(Debug, Clone)]
pub struct Panel {
    pub kind: ChartKind,
    /// Sélection affichée sous le titre ("2018/8/16", "2020/1", ...)
    pub caption: String,
    pub figure: Figure,
}

/// Page HTML avec un panneau par figure
pub fn render_dashboard(title: &str, panels: &[Panel]) -> Result<String> {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, r#"<html lang="fr">"#)?;
    writeln!(html, "<head>")?;
    writeln!(html, r#"<meta charset="utf-8">"#)?;
    writeln!(html, "<title>{}</title>", escape_html(title))?;
    writeln!(html, r#"<script src="{}"></script>"#, PLOTLY_CDN)?;
    writeln!(
        html,
        "<style>body{{font-family:sans-serif;margin:2em}}.panel{{margin-bottom:3em}}.chart{{height:600px}}</style>"
    )?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<h1>{}</h1>", escape_html(title))?;

    for (i, panel) in panels.iter().enumerate() {
        let id = format!("{}-{}", panel.kind, i);
        let figure = serde_json::to_string(&panel.figure)
            .context(format!("Failed to serialize {} figure", panel.kind))?;

        writeln!(html, r#"<section class="panel">"#)?;
        writeln!(
            html,
            "<h2>{} <small>{}</small></h2>",
            escape_html(panel.kind.heading()),
            escape_html(&panel.caption)
        )?;
        if panel.figure.is_empty() {
            writeln!(html, "<p>Aucune donnée pour cette sélection.</p>")?;
        }
        writeln!(html, r#"<div id="{}" class="chart"></div>"#, id)?;
        writeln!(html, "<script>")?;
        writeln!(html, "var fig = {};", escape_script(&figure))?;
        writeln!(
            html,
            "Plotly.newPlot('{}', fig.data, fig.layout, {{responsive: true}});",
            id
        )?;
        writeln!(html, "</script>")?;
        writeln!(html, "</section>")?;
    }

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

/// Écrit le tableau de bord dans un fichier
pub fn write_dashboard(path: &Path, title: &str, panels: &[Panel]) -> Result<()> {
    let html = render_dashboard(title, panels)?;
    std::fs::write(path, html).context(format!("Failed to write file: {}", path.display()))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Empêche une chaîne JSON de fermer la balise `<script>`
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::{Layout, PieTrace, Trace};

    #[test]
    fn test_escape_script() {
        assert_eq!(escape_script(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }

    #[test]
    fn test_render_dashboard() {
        let panels = vec![Panel {
            kind: ChartKind::Pie,
            caption: "2020/1".to_string(),
            figure: Figure {
                data: vec![Trace::Pie(PieTrace {
                    values: vec![Some(1.0)],
                    labels: vec!["Bretagne".to_string()],
                    name: "x".to_string(),
                })],
                layout: Layout::default(),
            },
        }];

        let html = render_dashboard("Consommation <gaz>", &panels).unwrap();
        assert!(html.contains("Consommation &lt;gaz&gt;"));
        assert!(html.contains(r#"<div id="pie-0" class="chart">"#));
        assert!(html.contains("Plotly.newPlot('pie-0'"));
        assert!(!html.contains("Aucune donnée"));
    }
}
