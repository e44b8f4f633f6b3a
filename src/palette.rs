/// sRGB color with straight alpha, as written in style sheets
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = value.to_ascii_lowercase();
        let (body, wants_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        fn channel(s: &str) -> Option<u8> {
            s.parse().ok()
        }

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        match (wants_alpha, parts.as_slice()) {
            (false, [r, g, b]) => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            (true, [r, g, b, a]) => {
                let a = a.parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?;
                Some(Self::rgba(channel(r)?, channel(g)?, channel(b)?, a))
            }
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
                Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }

    /// Linear-space RGBA for an sRGB render target, alpha scaled by `opacity`
    pub fn to_linear(self, opacity: f32) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            (self.a * opacity).clamp(0.0, 1.0),
        ]
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Where named style variables come from
pub trait StyleSource {
    fn property(&self, name: &str) -> Option<String>;
}

impl<F> StyleSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn property(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads `--accent-blue` from `STARDRIFT_ACCENT_BLUE`, and so on
pub struct EnvStyle;

impl EnvStyle {
    pub fn variable_name(property: &str) -> String {
        let name = property.trim_start_matches('-').replace('-', "_").to_uppercase();
        format!("STARDRIFT_{}", name)
    }
}

impl StyleSource for EnvStyle {
    fn property(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name)).ok()
    }
}

/// Reads custom properties from the page root's computed style
#[cfg(target_arch = "wasm32")]
pub struct PageStyle;

#[cfg(target_arch = "wasm32")]
impl StyleSource for PageStyle {
    fn property(&self, name: &str) -> Option<String> {
        let window = web_sys::window()?;
        let root = window.document()?.document_element()?;
        let computed = window.get_computed_style(&root).ok()??;
        // Computed custom properties keep the whitespace after the colon
        let value = computed.get_property_value(name).ok()?;
        Some(value.trim().to_string())
    }
}

pub const ACCENT_BLUE: Color = Color::rgb(0x3B, 0x82, 0xF6);
pub const ACCENT_PURPLE: Color = Color::rgb(0x93, 0x33, 0xEA);
pub const SOFT_BLUE: Color = Color::rgb(0xEA, 0xF4, 0xFC);
pub const MAIN_BG_BLUE: Color = Color::rgb(0xD0, 0xE0, 0xF0);
pub const CYAN: Color = Color::rgba(6, 182, 212, 0.5);

/// Named colors the backdrop paints with
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub accent_blue: Color,
    pub accent_purple: Color,
    pub soft_blue: Color,
    pub main_bg_blue: Color,
    pub cyan: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent_blue: ACCENT_BLUE,
            accent_purple: ACCENT_PURPLE,
            soft_blue: SOFT_BLUE,
            main_bg_blue: MAIN_BG_BLUE,
            cyan: CYAN,
        }
    }
}

impl Palette {
    /// Read the palette, falling back per color on missing or malformed values
    pub fn from_style<S: StyleSource>(style: &S) -> Self {
        let read = |name: &str, fallback: Color| {
            match style.property(name) {
                Some(raw) if !raw.trim().is_empty() => Color::parse(&raw).unwrap_or_else(|| {
                    log::warn!("Style variable {} has unusable value {:?}", name, raw);
                    fallback
                }),
                _ => fallback,
            }
        };

        Self {
            accent_blue: read("--accent-blue", ACCENT_BLUE),
            accent_purple: read("--accent-purple", ACCENT_PURPLE),
            soft_blue: read("--soft-blue", SOFT_BLUE),
            main_bg_blue: read("--main-bg-blue", MAIN_BG_BLUE),
            cyan: CYAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#3B82F6"), Some(ACCENT_BLUE));
        assert_eq!(Color::parse("  #fff "), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#GGGGGG"), None);
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(Color::parse("rgba(6, 182, 212, 0.5)"), Some(CYAN));
        assert_eq!(Color::parse("RGB(1,2,3)"), Some(Color::rgb(1, 2, 3)));
        assert_eq!(Color::parse("rgb(1, 2)"), None);
        assert_eq!(Color::parse("rgba(1, 2, 3, 1.5)"), None);
        assert_eq!(Color::parse("rgb(300, 0, 0)"), None);
        assert_eq!(Color::parse("blue"), None);
    }

    #[test]
    fn test_palette_fallbacks() {
        let mut vars = HashMap::new();
        vars.insert("--accent-blue", "#000000");
        vars.insert("--soft-blue", "   ");
        vars.insert("--main-bg-blue", "not-a-color");
        let style = |name: &str| vars.get(name).map(|v| v.to_string());

        let palette = Palette::from_style(&style);
        assert_eq!(palette.accent_blue, Color::rgb(0, 0, 0));
        assert_eq!(palette.accent_purple, ACCENT_PURPLE);
        assert_eq!(palette.soft_blue, SOFT_BLUE);
        assert_eq!(palette.main_bg_blue, MAIN_BG_BLUE);
        assert_eq!(palette.cyan, CYAN);
    }

    #[test]
    fn test_padded_computed_values_parse() {
        let style = |name: &str| match name {
            "--accent-blue" => Some(" #112233".to_string()),
            "--main-bg-blue" => Some("  rgb(1, 2, 3) ".to_string()),
            _ => Some(String::new()),
        };

        let palette = Palette::from_style(&style);
        assert_eq!(palette.accent_blue, Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(palette.main_bg_blue, Color::rgb(1, 2, 3));
        assert_eq!(palette.accent_purple, ACCENT_PURPLE);
        assert_eq!(palette.soft_blue, SOFT_BLUE);
    }

    #[test]
    fn test_env_variable_name() {
        assert_eq!(EnvStyle::variable_name("--main-bg-blue"), "STARDRIFT_MAIN_BG_BLUE");
    }

    #[test]
    fn test_to_linear_scales_alpha() {
        let [r, g, b, a] = CYAN.to_linear(0.5);
        assert!((a - 0.25).abs() < 1e-6);
        assert!(r < g && g < b);
        let white = Color::rgb(255, 255, 255).to_linear(1.0);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-4));
    }
}
