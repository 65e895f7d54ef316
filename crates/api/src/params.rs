use ascii_models::{BannerKind, StreamParams, StreamConfig, StreamerError};
use std::collections::HashMap;

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validates the stream query string. Missing keys fall back to config.
pub fn parse_stream_params(
    query: &HashMap<String, String>,
    config: &StreamConfig,
) -> Result<StreamParams, StreamerError> {
    let mut params = StreamParams {
        delay_secs: config.default_delay_secs,
        alt_screen: config.alt_screen_default,
        banner: None,
        loops: None,
    };

    if let Some(raw) = query.get("delay") {
        let delay: f64 = raw
            .trim()
            .parse()
            .map_err(|_| StreamerError::invalid_parameter("delay", "must be a number"))?;
        if !delay.is_finite() || delay <= 0.0 || delay > config.max_delay_secs {
            return Err(StreamerError::invalid_parameter(
                "delay",
                format!("must be > 0 and <= {}", config.max_delay_secs),
            ));
        }
        params.delay_secs = delay;
    }

    if let Some(raw) = query.get("alt") {
        params.alt_screen = parse_bool(raw.trim())
            .ok_or_else(|| StreamerError::invalid_parameter("alt", "must be a boolean"))?;
    }

    if let Some(raw) = query.get("banner") {
        let kind: BannerKind = raw
            .parse()
            .map_err(|reason: String| StreamerError::invalid_parameter("banner", reason))?;
        params.banner = Some(kind);
    }

    if let Some(raw) = query.get("loops") {
        let loops: u32 = raw
            .trim()
            .parse()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                StreamerError::invalid_parameter("loops", "must be a positive integer")
            })?;
        params.loops = Some(loops);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_models::Config;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn stream_config() -> StreamConfig {
        Config::default().stream
    }

    #[test]
    fn defaults_when_empty() {
        let params = parse_stream_params(&HashMap::new(), &stream_config()).unwrap();
        assert_eq!(params.delay_secs, 0.04);
        assert!(!params.alt_screen);
        assert_eq!(params.banner, None);
        assert_eq!(params.loops, None);
    }

    #[test]
    fn parses_all_fields() {
        let q = query(&[("delay", "1.0"), ("alt", "Yes"), ("banner", "ticker"), ("loops", "3")]);
        let params = parse_stream_params(&q, &stream_config()).unwrap();
        assert_eq!(params.delay_secs, 1.0);
        assert!(params.alt_screen);
        assert_eq!(params.banner, Some(BannerKind::Ticker));
        assert_eq!(params.loops, Some(3));
    }

    #[test]
    fn rejects_out_of_range_delay() {
        for bad in ["0", "-1", "1.01", "abc", "NaN", "inf"] {
            let err = parse_stream_params(&query(&[("delay", bad)]), &stream_config()).unwrap_err();
            assert_eq!(err.http_status(), 422, "delay={}", bad);
        }
    }

    #[test]
    fn rejects_bad_flags() {
        let config = stream_config();
        assert!(parse_stream_params(&query(&[("alt", "maybe")]), &config).is_err());
        assert!(parse_stream_params(&query(&[("banner", "huge")]), &config).is_err());
        assert!(parse_stream_params(&query(&[("loops", "0")]), &config).is_err());
        assert!(parse_stream_params(&query(&[("loops", "-2")]), &config).is_err());
    }
}
