//! Export d'une figure en JSON Plotly

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::charts::Figure;

/// Écrit la figure dans un fichier, ou sur la sortie standard sans chemin
pub fn write_figure(figure: &Figure, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Failed to create file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, figure)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, figure)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::Layout;

    #[test]
    fn test_write_figure_file() {
        let figure = Figure {
            data: Vec::new(),
            layout: Layout::default(),
        };
        let path = std::env::temp_dir().join(format!("conso-figure-{}.json", std::process::id()));

        write_figure(&figure, Some(&path)).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(json["data"].as_array().unwrap().is_empty());
        assert_eq!(json["layout"]["margin"]["t"], 40);
    }
}
