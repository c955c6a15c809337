/// Glyphs and colours for each board element.

use crossterm::style::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Style {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Style { fg, bg }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::new(Color::White, Color::Reset)
    }
}

pub const HEAD_GLYPH: char = '@';
pub const BODY_GLYPH: char = '#';
pub const FOOD_GLYPH: char = '$';

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub head: Style,
    pub body: Style,
    pub food: Style,
    pub text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            border: Style::new(Color::White, Color::DarkBlue),
            head: Style::new(Color::Magenta, Color::Black),
            body: Style::new(Color::Blue, Color::Black),
            food: Style::new(Color::Green, Color::Black),
            text: Style::new(Color::White, Color::Black),
        }
    }
}
