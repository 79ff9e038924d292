//! Lecture des deux sources : CSV de consommation et GeoJSON des régions

pub mod consumption;
pub mod regions;

/// Normalise un code région ("11", " 11 ", "11.0") en entier
pub(crate) fn parse_code(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(code) = value.parse::<u32>() {
        return Some(code);
    }
    // Codes exportés en flottant par certains outils
    let float = value.parse::<f64>().ok()?;
    if float.fract() == 0.0 && float >= 0.0 && float <= f64::from(u32::MAX) {
        Some(float as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("11"), Some(11));
        assert_eq!(parse_code(" 84 "), Some(84));
        assert_eq!(parse_code("24.0"), Some(24));
        assert_eq!(parse_code("24.5"), None);
        assert_eq!(parse_code("2A"), None);
        assert_eq!(parse_code(""), None);
    }
}
