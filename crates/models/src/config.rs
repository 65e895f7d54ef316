use crate::animation::BannerKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub stream: StreamConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
    pub animations: Vec<AnimationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Runtime worker threads.
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    pub default_delay_secs: f64,
    pub max_delay_secs: f64,
    pub alt_screen_default: bool,
    pub banner_padding: usize,
    pub frame_cache_capacity: usize,
    pub default_banner_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    pub name: String,
    pub json_path: String,
    #[serde(default)]
    pub banner_kind: BannerKind,
    #[serde(default)]
    pub banner_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

const MELLSTROY_BANNER: &str = "MELLSTROY • STREAM • ASCII";

fn big_animation(name: &str, file: &str, color: &str) -> AnimationConfig {
    AnimationConfig {
        name: name.to_string(),
        json_path: file.to_string(),
        banner_kind: BannerKind::Big,
        banner_text: MELLSTROY_BANNER.to_string(),
        color: Some(color.to_string()),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "0.0.0.0".to_string(),
                port: 8000,
                workers: 10,
            },
            stream: StreamConfig {
                default_delay_secs: 0.04,
                max_delay_secs: 1.0,
                // Off so terminal zoom and scrollback keep working.
                alt_screen_default: false,
                banner_padding: 10,
                frame_cache_capacity: 32,
                default_banner_color: "255,215,0".to_string(),
            },
            assets: AssetsConfig {
                dir: "assets".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            animations: vec![
                big_animation("woohoo", "mellstroy2_ascii.json", "0,255,180"),
                big_animation("clap", "mellstroy3_ascii.json", "255,165,0"),
                big_animation("blyat", "mellstroy4_ascii.json", "255,0,0"),
                AnimationConfig {
                    name: "demo".to_string(),
                    json_path: "demo_ascii.json".to_string(),
                    banner_kind: BannerKind::Ticker,
                    banner_text: "ASCII STREAMER • DEMO".to_string(),
                    color: Some("0,200,255".to_string()),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.workers, 10);
        assert_eq!(config.stream.default_delay_secs, 0.04);
        assert!(!config.stream.alt_screen_default);
        assert_eq!(config.stream.banner_padding, 10);
        assert_eq!(config.stream.frame_cache_capacity, 32);
    }

    #[test]
    fn animation_entry_defaults() {
        let anim: AnimationConfig =
            serde_json::from_str(r#"{"name":"x","json_path":"x.json"}"#).unwrap();
        assert_eq!(anim.banner_kind, BannerKind::Big);
        assert_eq!(anim.banner_text, "");
        assert_eq!(anim.color, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<AnimationConfig, _> =
            serde_json::from_str(r#"{"name":"x","json_path":"x.json","speed":2}"#);
        assert!(res.is_err());
    }
}
