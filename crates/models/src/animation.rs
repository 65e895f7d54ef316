use crate::config::{AnimationConfig, Config};
use crate::error::StreamerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Banner drawn under every frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    /// The fixed multi-line logo.
    #[default]
    Big,
    /// A single line of scrolling text.
    Ticker,
}

impl FromStr for BannerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big" => Ok(BannerKind::Big),
            "ticker" => Ok(BannerKind::Ticker),
            _ => Err(format!("expected 'big' or 'ticker', got '{}'", s)),
        }
    }
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BannerKind::Big => write!(f, "big"),
            BannerKind::Ticker => write!(f, "ticker"),
        }
    }
}

/// 24-bit foreground color, written as `r,g,b` in config and markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("color must be 'r,g,b', got '{}'", s));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| format!("invalid color channel '{}' in '{}'", p, s))
        };
        Ok(Rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// A registry entry with its asset path resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    pub json_path: PathBuf,
    pub banner_kind: BannerKind,
    pub banner_text: String,
    pub color: Rgb,
}

/// Per-request stream options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamParams {
    pub delay_secs: f64,
    pub alt_screen: bool,
    pub banner: Option<BannerKind>,
    pub loops: Option<u32>,
}

impl StreamParams {
    pub fn defaults(config: &Config) -> Self {
        Self {
            delay_secs: config.stream.default_delay_secs,
            alt_screen: config.stream.alt_screen_default,
            banner: None,
            loops: None,
        }
    }
}

/// Named animations in configuration order.
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    entries: Vec<AnimationSpec>,
}

impl AnimationRegistry {
    pub fn new(entries: Vec<AnimationSpec>) -> Self {
        Self { entries }
    }

    /// Resolves every configured animation against `base_dir`.
    ///
    /// Relative `json_path`s are joined onto the assets directory, which is
    /// itself joined onto `base_dir` when relative.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self, StreamerError> {
        let assets_dir = base_dir.join(&config.assets.dir);
        let default_color: Rgb = config
            .stream
            .default_banner_color
            .parse()
            .map_err(|reason| StreamerError::Config { reason })?;

        let mut entries = Vec::with_capacity(config.animations.len());
        for anim in &config.animations {
            if entries.iter().any(|e: &AnimationSpec| e.name == anim.name) {
                return Err(StreamerError::Config {
                    reason: format!("duplicate animation name '{}'", anim.name),
                });
            }
            entries.push(Self::resolve(anim, &assets_dir, default_color)?);
        }

        Ok(Self { entries })
    }

    fn resolve(
        anim: &AnimationConfig,
        assets_dir: &Path,
        default_color: Rgb,
    ) -> Result<AnimationSpec, StreamerError> {
        let color = match &anim.color {
            Some(c) => c.parse().map_err(|reason: String| StreamerError::Config {
                reason: format!("animation '{}': {}", anim.name, reason),
            })?,
            None => default_color,
        };

        Ok(AnimationSpec {
            name: anim.name.clone(),
            json_path: assets_dir.join(&anim.json_path),
            banner_kind: anim.banner_kind,
            banner_text: anim.banner_text.clone(),
            color,
        })
    }

    pub fn get(&self, name: &str) -> Option<&AnimationSpec> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every asset path must be absolute.
    pub fn validate(&self) -> Result<(), StreamerError> {
        for entry in &self.entries {
            ensure_absolute(entry)?;
        }
        Ok(())
    }
}

pub fn ensure_absolute(entry: &AnimationSpec) -> Result<(), StreamerError> {
    if entry.json_path.is_absolute() {
        Ok(())
    } else {
        Err(StreamerError::NonAbsolutePath {
            name: entry.name.clone(),
            path: entry.json_path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_parses_with_spaces() {
        assert_eq!("0, 255 ,180".parse::<Rgb>().unwrap(), Rgb(0, 255, 180));
        assert!("0,255".parse::<Rgb>().is_err());
        assert!("0,256,1".parse::<Rgb>().is_err());
        assert_eq!(Rgb(1, 2, 3).to_string(), "1,2,3");
    }

    #[test]
    fn banner_kind_is_case_sensitive() {
        assert_eq!("big".parse::<BannerKind>().unwrap(), BannerKind::Big);
        assert_eq!("ticker".parse::<BannerKind>().unwrap(), BannerKind::Ticker);
        assert!("BIG".parse::<BannerKind>().is_err());
    }

    #[test]
    fn registry_resolves_relative_paths_against_assets_dir() {
        let config = Config::default();
        let registry = AnimationRegistry::from_config(&config, Path::new("/srv/app")).unwrap();

        let woohoo = registry.get("woohoo").unwrap();
        assert_eq!(
            woohoo.json_path,
            PathBuf::from("/srv/app/assets/mellstroy2_ascii.json")
        );
        assert_eq!(woohoo.color, Rgb(0, 255, 180));
        assert!(registry.validate().is_ok());
        assert_eq!(registry.names(), vec!["woohoo", "clap", "blyat", "demo"]);
    }

    #[test]
    fn registry_reports_relative_base() {
        let config = Config::default();
        let registry = AnimationRegistry::from_config(&config, Path::new("relative")).unwrap();
        match registry.validate() {
            Err(StreamerError::NonAbsolutePath { name, .. }) => assert_eq!(name, "woohoo"),
            other => panic!("expected NonAbsolutePath, got {:?}", other),
        }
    }

    #[test]
    fn registry_rejects_duplicates_and_bad_colors() {
        let mut config = Config::default();
        let dup = config.animations[0].clone();
        config.animations.push(dup);
        assert!(AnimationRegistry::from_config(&config, Path::new("/srv")).is_err());

        let mut config = Config::default();
        config.animations[0].color = Some("red".to_string());
        assert!(matches!(
            AnimationRegistry::from_config(&config, Path::new("/srv")),
            Err(StreamerError::Config { .. })
        ));
    }

    #[test]
    fn missing_color_uses_default() {
        let mut config = Config::default();
        config.animations[0].color = None;
        let registry = AnimationRegistry::from_config(&config, Path::new("/srv")).unwrap();
        assert_eq!(registry.get("woohoo").unwrap().color, Rgb(255, 215, 0));
    }
}
