use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color of a symbology or a draw primitive.
///
/// Colors are written and parsed as hex strings: `#RRGGBB` (opaque) or `#RRGGBBAA`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color([u8; 4]);

impl Color {
    /// Transparent color: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Red color: `#FF0000FF`
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    /// Green color: `#00FF00FF`
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    /// Blue color: `#0000FFFF`
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Channels of the color in RGBA order.
    pub fn to_u8_array(&self) -> [u8; 4] {
        self.0
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    /// Parses a color from a HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`) string.
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        let digits = hex_string.strip_prefix('#')?;
        if (digits.len() != 6 && digits.len() != 8) || !digits.is_ascii() {
            return None;
        }

        let mut channels = [255; 4];
        for (channel, i) in channels.iter_mut().zip((0..digits.len()).step_by(2)) {
            *channel = u8::from_str_radix(&digits[i..i + 2], 16).ok()?;
        }

        Some(Self(channels))
    }

    /// Same as [`Color::try_from_hex`], usable in constants.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid hex color.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        if (bytes.len() != 7 && bytes.len() != 9) || bytes[0] != b'#' {
            panic!("Invalid color hex string");
        }

        let mut channels = [255; 4];
        let mut i = 0;
        while 1 + i * 2 < bytes.len() {
            channels[i] = hex_digit(bytes[1 + i * 2]) * 16 + hex_digit(bytes[2 + i * 2]);
            i += 1;
        }

        Self(channels)
    }
}

const fn hex_digit(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_hex(s).ok_or_else(|| format!("invalid color `{s}`, expected #RRGGBB or #RRGGBBAA"))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}
