//! Environment-driven settings.
//!
//! Everything is read once at startup. The binary loads a `.env` file from
//! the working directory first, so the same keys can live there:
//!
//! ```text
//! STARDRIFT_REDUCED_MOTION=true
//! STARDRIFT_WIDTH=1280
//! STARDRIFT_HEIGHT=800
//! STARDRIFT_FORM_ENDPOINT=https://formspree.io/f/abcd1234
//! STARDRIFT_FORM_HASHID=portfolio-form
//! ```
//!
//! Colors are read separately through [`crate::palette::EnvStyle`].

pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 800;
pub const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/YOUR_FORMSPREE_ID";
pub const DEFAULT_FORM_HASHID: &str = "portfolio-form";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub reduced_motion: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub form_endpoint: String,
    pub form_hashid: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            form_hashid: DEFAULT_FORM_HASHID.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let dimension = |key: &str, fallback: u32| match lookup(key) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => {
                    log::warn!("Ignoring {}={:?}; using {}", key, raw, fallback);
                    fallback
                }
            },
            None => fallback,
        };
        let text = |key: &str, fallback: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        Self {
            reduced_motion: lookup("STARDRIFT_REDUCED_MOTION")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.reduced_motion),
            window_width: dimension("STARDRIFT_WIDTH", defaults.window_width),
            window_height: dimension("STARDRIFT_HEIGHT", defaults.window_height),
            form_endpoint: text("STARDRIFT_FORM_ENDPOINT", defaults.form_endpoint),
            form_hashid: text("STARDRIFT_FORM_HASHID", defaults.form_hashid),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
