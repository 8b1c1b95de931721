use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 24-bit sRGB color.  The canonical textual form is uppercase `#RRGGBB`,
/// which is what gradient stops and CSS declarations are built from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Rgb {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Rgb {
    pub(crate) const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { red, green, blue } = *self;
        write!(f, "#{red:02X}{green:02X}{blue:02X}")
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Color {
        Color::Rgb(value.red, value.green, value.blue)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Rgb, ParseColorError> {
        let err = || ParseColorError(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                    let nibble = digit.to_digit(16).ok_or_else(err)?;
                    *slot = u8::try_from(nibble * 0x11)
                        .expect("a doubled hex digit should fit in a u8");
                }
                let [red, green, blue] = channels;
                Ok(Rgb::new(red, green, blue))
            }
            6 => {
                let channel =
                    |from: usize, to: usize| u8::from_str_radix(&hex[from..to], 16).map_err(|_| err());
                Ok(Rgb::new(channel(0, 2)?, channel(2, 4)?, channel(4, 6)?))
            }
            _ => Err(err()),
        }
    }
}

/// A color value that is not `#RGB` or `#RRGGBB` hex notation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid color {0:?}; expected #RGB or #RRGGBB")]
pub(crate) struct ParseColorError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        assert_eq!("#FF8000".parse(), Ok(Rgb::new(255, 128, 0)));
        assert_eq!("#ff8000".parse(), Ok(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!("#F80".parse(), Ok(Rgb::new(0xFF, 0x88, 0x00)));
        assert_eq!("#000".parse(), Ok(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#", "FF8000", "#FF80", "#GGGGGG", "#12345", "#€€"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Rgb::new(255, 0, 10).to_string(), "#FF000A");
    }

    #[test]
    fn test_display_round_trips() {
        let color = Rgb::new(1, 2, 3);
        assert_eq!(color.to_string().parse(), Ok(color));
    }

    #[test]
    fn test_into_terminal_color() {
        assert_eq!(Color::from(Rgb::new(9, 8, 7)), Color::Rgb(9, 8, 7));
    }
}
