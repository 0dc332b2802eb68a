/// Colour cycle for countdown frames, embedded at build time
use crossterm::style::Color;
use serde::Deserialize;

use crate::error::PaletteError;
use crate::terminal::parse_color;

const EMBEDDED: &str = include_str!("palette.json");

#[derive(Debug, Deserialize)]
struct PaletteFile {
    colors: Vec<String>,
}

/// Loads the built-in palette.
pub fn load() -> Result<Vec<Color>, PaletteError> {
    from_json(EMBEDDED)
}

/// Parses `{"colors": [...]}` where each entry is anything `parse_color`
/// accepts. The result is never empty.
pub fn from_json(json: &str) -> Result<Vec<Color>, PaletteError> {
    let file: PaletteFile = serde_json::from_str(json)?;
    if file.colors.is_empty() {
        return Err(PaletteError::Empty);
    }
    file.colors
        .iter()
        .map(|spec| parse_color(spec).ok_or_else(|| PaletteError::UnknownColor(spec.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_palette_loads() {
        let colors = load().unwrap();
        assert!(colors.len() > 2);
        assert!(colors.iter().all(|c| matches!(c, Color::Rgb { .. })));
    }

    #[test]
    fn mixed_color_forms() {
        let colors = from_json(r##"{"colors": ["#ff0000", "214", "blue"]}"##).unwrap();
        assert_eq!(
            colors,
            [
                Color::Rgb { r: 255, g: 0, b: 0 },
                Color::AnsiValue(214),
                Color::Blue
            ]
        );
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            from_json(r#"{"colors": []}"#),
            Err(PaletteError::Empty)
        ));
    }

    #[test]
    fn unknown_color_is_named() {
        match from_json(r#"{"colors": ["red", "sparkly"]}"#) {
            Err(PaletteError::UnknownColor(name)) => assert_eq!(name, "sparkly"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(from_json("colors: red"), Err(PaletteError::Json(_))));
    }
}
