use ascii_models::{AnimationRegistry, BannerKind, Config, Rgb};
use ascii_render::FrameStore;
use ascii_streamer::config::figment;
use ascii_streamer::validate_config;
use std::path::Path;

fn shipped() -> Config {
    figment(Some(Path::new("config/default.toml")))
        .extract()
        .expect("config/default.toml should parse")
}

#[test]
fn shipped_config_matches_defaults() {
    let config = shipped();
    assert_eq!(config, Config::default());
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.workers, 10);
}

#[tokio::test]
async fn demo_asset_loads() {
    let config = shipped();
    let registry =
        AnimationRegistry::from_config(&config, Path::new(env!("CARGO_MANIFEST_DIR"))).unwrap();
    registry.validate().unwrap();

    let demo = registry.get("demo").unwrap();
    assert_eq!(demo.banner_kind, BannerKind::Ticker);
    assert_eq!(demo.color, Rgb(0, 200, 255));

    let store = FrameStore::new(config.stream.frame_cache_capacity);
    let frames = store.load(&demo.json_path).await.unwrap();
    assert_eq!(frames.len(), 8);
    assert!(frames.iter().all(|f| f.lines().count() == 9));
}
