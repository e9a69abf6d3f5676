//! Terminal styling utilities
//!
//! Uses crossterm for cross-platform terminal colors.

use crate::color::HexColor;
use crossterm::style::{Color, StyledContent, Stylize};

fn rgb(color: &HexColor) -> Color {
    let (r, g, b) = color.channels();
    Color::Rgb { r, g, b }
}

/// Group name painted like its graph node: group color behind, readable text on top
pub fn group(name: &str, color: Option<&HexColor>) -> StyledContent<String> {
    match color {
        Some(color) => {
            let text = if color.readable_text_color() == crate::color::DARK_TEXT {
                Color::Black
            } else {
                Color::White
            };
            format!(" {} ", name).with(text).on(rgb(color)).bold()
        }
        None => name.to_string().bold(),
    }
}

/// Person handle
pub fn person(uid: &str) -> StyledContent<String> {
    uid.to_string().cyan()
}

/// Counts: dim when zero
pub fn count(n: usize) -> StyledContent<String> {
    if n == 0 {
        n.to_string().dark_grey()
    } else {
        n.to_string().green()
    }
}

/// Section headers
pub fn header(text: &str) -> StyledContent<String> {
    text.to_string().bold()
}

/// Dim/muted text
pub fn dim(text: &str) -> StyledContent<String> {
    text.to_string().dark_grey()
}

/// Success text
pub fn success(text: &str) -> StyledContent<String> {
    text.to_string().green()
}

/// Warning text
pub fn warning(text: &str) -> StyledContent<String> {
    text.to_string().yellow()
}

/// Error text
pub fn error(text: &str) -> StyledContent<String> {
    text.to_string().red()
}

/// Path styling
pub fn path(p: &str) -> StyledContent<String> {
    p.to_string().blue()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_uses_node_colors() {
        let styled = group("BDE", Some(&HexColor::new(255, 0, 0)));
        assert_eq!(styled.content(), " BDE ");
        assert_eq!(styled.style().background_color, Some(Color::Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(styled.style().foreground_color, Some(Color::White));

        let styled = group("BDS", Some(&HexColor::new(0xba, 0xba, 0xba)));
        assert_eq!(styled.style().foreground_color, Some(Color::Black));
    }

    #[test]
    fn test_group_without_color() {
        let styled = group("BDA", None);
        assert_eq!(styled.content(), "BDA");
        assert_eq!(styled.style().background_color, None);
    }

    #[test]
    fn test_count() {
        assert_eq!(count(0).style().foreground_color, Some(Color::DarkGrey));
        assert_eq!(count(3).style().foreground_color, Some(Color::Green));
    }
}
