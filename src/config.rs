use log::warn;
use std::env;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_VOTES_PER_PERSON: u32 = 3;
pub const MAX_IMAGES: usize = 99;
pub const MAX_DIMENSION: u32 = 400;
pub const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Origin and path the share link is built on.
    pub base_url: String,
    pub default_votes_per_person: u32,
    pub max_images: usize,
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_votes_per_person: DEFAULT_VOTES_PER_PERSON,
            max_images: MAX_IMAGES,
            max_dimension: MAX_DIMENSION,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl Settings {
    /// Reads overrides from the process environment. Call after
    /// `dotenvy::dotenv()` so a `.env` file is honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(v) = lookup("VOTE_BASE_URL") {
            settings.base_url = v;
        }
        parse_into(&lookup, "VOTE_DEFAULT_BUDGET", &mut settings.default_votes_per_person);
        parse_into(&lookup, "VOTE_MAX_IMAGES", &mut settings.max_images);
        parse_into(&lookup, "VOTE_MAX_DIMENSION", &mut settings.max_dimension);
        parse_into(&lookup, "VOTE_JPEG_QUALITY", &mut settings.jpeg_quality);

        if settings.default_votes_per_person == 0 {
            warn!("VOTE_DEFAULT_BUDGET must be positive, using {}", DEFAULT_VOTES_PER_PERSON);
            settings.default_votes_per_person = DEFAULT_VOTES_PER_PERSON;
        }
        if settings.max_dimension == 0 {
            warn!("VOTE_MAX_DIMENSION must be positive, using {}", MAX_DIMENSION);
            settings.max_dimension = MAX_DIMENSION;
        }
        if !(1..=100).contains(&settings.jpeg_quality) {
            warn!("VOTE_JPEG_QUALITY must be within 1..=100, using {}", JPEG_QUALITY);
            settings.jpeg_quality = JPEG_QUALITY;
        }

        settings
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!("Ignoring unparseable {}={:?}", key, raw),
    }
}
