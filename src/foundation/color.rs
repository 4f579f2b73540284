use crate::foundation::{
    core::Rgba8,
    error::{CardError, CardResult},
};

/// Parse a `#RRGGBB` or `#RRGGBBAA` hex color (leading `#` optional).
pub fn parse_hex(s: &str) -> CardResult<Rgba8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    // Length is checked in bytes below; non-ASCII input would slice inside
    // a char boundary.
    if !s.is_ascii() {
        return Err(CardError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        ));
    }

    fn hex_byte(pair: &str) -> CardResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CardError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match s.len() {
        6 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: 255,
        }),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err(CardError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

/// Format as lowercase `#rrggbb` (alpha suffix only when not opaque).
pub fn to_hex(c: Rgba8) -> String {
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

/// Serde adapter for hex-string color fields: `#[serde(with = "serde_hex")]`.
pub mod serde_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::foundation::core::Rgba8;

    pub fn serialize<S: Serializer>(c: &Rgba8, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::to_hex(*c))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Rgba8, D::Error> {
        let s = String::deserialize(de)?;
        super::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
