use anyhow::{Context, Result};
use glam::Vec2;
use std::time::Duration;

use crate::cli::Cli;
use crate::core::{AnimationClock, AnimationDriver};
use crate::error::ConfigError;
use crate::geo::{Address, MercatorProjector};
use crate::loaders::{AssetSource, ModelLoader};
use crate::map::MapOptions;
use crate::scene::{SceneController, SceneGraph, TrackRenderer, TrackStyle};
use crate::services::google::GoogleRouteFetcher;
use crate::services::{GoogleMapsClient, TravelMode};

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub origin: Address,
    pub destination: Address,
    pub mode: TravelMode,
    pub model: AssetSource,
    pub model_scale: f32,
    pub period: Duration,
    pub track_style: TrackStyle,
    pub track_density: usize,
    pub map: MapOptions,
    pub api_key: String,
    pub headless: bool,
    pub frames: u64,
    pub window_size: (u32, u32),
}

impl Config {
    pub fn from_cli(cli: &Cli) -> std::result::Result<Self, ConfigError> {
        if cli.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if cli.track_density == 0 {
            return Err(ConfigError::ZeroDensity);
        }
        positive("line width", cli.line_width)?;
        positive("model scale", cli.model_scale)?;

        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();

        Ok(Self {
            origin: Address::new(cli.origin.as_str()),
            destination: Address::new(cli.destination.as_str()),
            mode: cli.mode.parse()?,
            model: AssetSource::parse(&cli.model),
            model_scale: cli.model_scale,
            period: Duration::from_millis(cli.period_ms),
            track_style: TrackStyle {
                color: parse_hex_color(&cli.track_color)?,
                line_width: cli.line_width,
            },
            track_density: cli.track_density,
            map: MapOptions {
                map_id: cli.map_id.clone(),
                ..MapOptions::default()
            },
            api_key,
            headless: cli.headless,
            frames: cli.frames,
            window_size: (cli.width.max(1), cli.height.max(1)),
        })
    }

    pub fn route_fetcher(&self) -> Result<GoogleRouteFetcher> {
        let client = GoogleMapsClient::new(self.api_key.as_str()).context("failed to build maps client")?;
        Ok(client.route_fetcher(self.mode))
    }

    pub fn model_loader(&self) -> Result<ModelLoader> {
        ModelLoader::new(self.model_scale).context("failed to build model loader")
    }

    /// Controller anchored at the map's initial center
    pub fn scene_controller(&self, viewport: Vec2) -> SceneController<SceneGraph> {
        SceneController::new(
            SceneGraph::new(viewport),
            MercatorProjector::new(self.map.center),
            TrackRenderer::new(self.track_style, self.track_density),
            AnimationDriver::new(AnimationClock::new(self.period)),
        )
    }
}

fn positive(name: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// `RRGGBB`, optionally prefixed with `#` or `0x`
pub fn parse_hex_color(text: &str) -> std::result::Result<u32, ConfigError> {
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .unwrap_or(text);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(text.to_string()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidColor(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["route-walker", "--api-key", "test-key"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_cli(&cli(&[])).unwrap();
        assert_eq!(config.mode, TravelMode::Walking);
        assert_eq!(config.period, Duration::from_secs(20));
        assert_eq!(config.track_style, TrackStyle::default());
        assert_eq!(config.track_density, 10);
        assert_eq!(config.model_scale, 0.5);
        assert_eq!(config.origin.as_str(), crate::cli::DEFAULT_ORIGIN);
    }

    #[test]
    fn test_rejects_zero_period() {
        let err = Config::from_cli(&cli(&["--period-ms", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroPeriod);
    }

    #[test]
    fn test_rejects_zero_density() {
        let err = Config::from_cli(&cli(&["--track-density", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDensity);
    }

    #[test]
    fn test_rejects_negative_line_width() {
        let err = Config::from_cli(&cli(&["--line-width=-2"])).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { name: "line width", .. }));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = Config::from_cli(&cli(&["--mode", "flying"])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTravelMode("flying".into()));
    }

    #[test]
    fn test_missing_api_key() {
        let mut args = Cli::parse_from(["route-walker"]);
        args.api_key = Some("   ".into());
        assert_eq!(Config::from_cli(&args).unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("ffb703"), Ok(0xffb703));
        assert_eq!(parse_hex_color("#219EBC"), Ok(0x219ebc));
        assert_eq!(parse_hex_color("0x000000"), Ok(0));
        assert!(parse_hex_color("fff").is_err());
        assert!(parse_hex_color("gggggg").is_err());
    }
}
