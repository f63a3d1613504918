use ratatui::style::{Color, Modifier, Style};

/// Parses markup-like style strings such as `"bold cyan"`, `"italic dim"` or
/// `"bright_blue"`. Words that are neither a modifier nor a color are skipped.
pub fn parse_style(value: &str) -> Style {
    let mut style = Style::default();
    for word in value.split_whitespace() {
        if let Some(modifier) = parse_modifier(word) {
            style = style.add_modifier(modifier);
        } else if let Some(color) = parse_color(word) {
            style = style.fg(color);
        }
    }
    style
}

fn parse_modifier(word: &str) -> Option<Modifier> {
    let m = match word.to_ascii_lowercase().as_str() {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underline" => Modifier::UNDERLINED,
        "reverse" => Modifier::REVERSED,
        "blink" => Modifier::SLOW_BLINK,
        "strike" => Modifier::CROSSED_OUT,
        _ => return None,
    };
    Some(m)
}

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" | "white" => Color::Indexed(7),
        "dark_gray" | "darkgrey" | "bright_black" => Color::Indexed(8),
        "light_red" | "bright_red" => Color::Indexed(9),
        "light_green" | "bright_green" => Color::Indexed(10),
        "light_yellow" | "bright_yellow" => Color::Indexed(11),
        "light_blue" | "bright_blue" => Color::Indexed(12),
        "light_magenta" | "bright_magenta" => Color::Indexed(13),
        "light_cyan" | "bright_cyan" => Color::Indexed(14),
        "bright_white" => Color::Indexed(15),
        _ => return None,
    };

    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/style.rs"]
mod tests;
