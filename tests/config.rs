use anyhow::Result;
use traffic_canvas::{
    config::{Background, HudStyle, SceneConfig, TrafficPreset, Validate, WrapEdge},
    Color,
};

#[test]
fn test_default_is_enhanced_preset() {
    let config = SceneConfig::default();

    assert_eq!(config.traffic.vehicle_count, 8);
    assert!(config.traffic.fleet.is_empty());
    assert_eq!(config.traffic.wrap_edge, WrapEdge::Trailing);
    assert_eq!(config.road.hud, HudStyle::Panel);
    assert_eq!(config.particles.count, 100);
    assert_eq!(config.feed.max_repos, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_basic_preset_uses_roster() {
    let config = SceneConfig::preset(TrafficPreset::Basic);

    assert_eq!(config.traffic.fleet.len(), 5);
    assert_eq!(config.traffic.lane_count, 3);
    assert_eq!(config.traffic.lane_y(2), 390.0);
    assert_eq!(config.traffic.wrap_edge, WrapEdge::Leading);
    assert_eq!(config.traffic.following_distance, 0.0);
    assert_eq!(config.road.hud, HudStyle::Corner);
    assert!(matches!(config.road.background, Background::Solid { .. }));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() -> Result<()> {
    let config = SceneConfig::from_toml_str(
        r##"
        [traffic]
        vehicle_count = 12
        wrap_edge = "leading"

        [road.background]
        kind = "solid"
        color = "#202020"

        [particles]
        color = "#4F46E580"

        [random]
        seed = 7
        "##,
    )?;

    assert_eq!(config.traffic.vehicle_count, 12);
    assert_eq!(config.traffic.lane_count, 4);
    assert_eq!(config.traffic.wrap_edge, WrapEdge::Leading);
    assert!(matches!(
        config.road.background,
        Background::Solid { color } if color == Color::rgb(0x20, 0x20, 0x20)
    ));
    assert_eq!(config.particles.color, Color::rgba(0x4F, 0x46, 0xE5, 0x80));
    assert_eq!(config.random.seed, Some(7));
    Ok(())
}

#[test]
fn test_roster_from_toml() -> Result<()> {
    let config = SceneConfig::from_toml_str(
        r##"
        [traffic]
        lane_count = 2

        [[traffic.fleet]]
        x = 10.0
        y = 130.0
        width = 60.0
        height = 40.0
        speed = 3.0
        lane = 1
        color = "#FF0000"
        kind = "taxi"
        "##,
    )?;

    assert_eq!(config.traffic.fleet.len(), 1);
    assert_eq!(config.traffic.fleet[0].lane, 1);
    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "[traffic]\nvehicle_count = 0",
        "[traffic]\nlane_count = 0",
        "[traffic]\nspeed_min = 5.0\nspeed_max = 1.0",
        "[traffic]\nretarget_probability = 1.5",
        "[traffic]\nspeed_smoothing = 0.0",
        "[particles]\nnear = 10.0\nfar = 5.0",
        "[feed]\nusername = \"\"",
        "[road]\nframes_per_second = 0",
        "[particles]\ncolor = \"not-a-color\"",
        "[[traffic.fleet]]\nx = 0.0\ny = 0.0\nwidth = 60.0\nheight = 40.0\nspeed = 3.0\nlane = 9\ncolor = \"#FFFFFF\"\nkind = \"car\"",
    ];

    for case in cases {
        assert!(SceneConfig::from_toml_str(case).is_err(), "accepted: {}", case);
    }
}

#[test]
fn test_load_shipped_scene_file() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scene.toml");
    let config = SceneConfig::load_from_file(path)?;
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let err = SceneConfig::load_from_file("does/not/exist.toml").unwrap_err();
    assert!(format!("{:#}", err).contains("does/not/exist.toml"));
}

#[test]
fn test_feed_urls() {
    let config = SceneConfig::default();
    assert_eq!(config.feed.profile_url(), "https://api.github.com/users/shanskarBansal");
    assert_eq!(
        config.feed.repos_url(),
        "https://api.github.com/users/shanskarBansal/repos?sort=stars&per_page=30"
    );
}
