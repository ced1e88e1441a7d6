// cli.rs - Command-line interface configuration
use clap::Parser;

pub const DEFAULT_ORIGIN: &str =
    "Raj Embassy, Ambedkar Nagar, Kanjurmarg West, Bhandup West, Mumbai, Maharashtra 400078";
pub const DEFAULT_DESTINATION: &str =
    "62, Lal Bahadur Shastri Marg, Laxmi Udyog Nagar, Kanjurmarg West, Bhandup West, Mumbai, Maharashtra 400078";

#[derive(Parser, Debug, Clone)]
#[command(name = "route-walker")]
#[command(about = "Animates a walking figure along a map route", long_about = None)]
pub struct Cli {
    /// Start address
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// End address
    #[arg(long, default_value = DEFAULT_DESTINATION)]
    pub destination: String,

    /// walking, driving, bicycling or transit
    #[arg(long, default_value = "walking")]
    pub mode: String,

    /// glTF asset path or http(s) URL
    #[arg(long, default_value = "assets/low_poly_person/scene.gltf")]
    pub model: String,

    #[arg(long = "model-scale", default_value_t = 0.5)]
    pub model_scale: f32,

    /// Duration of one walk along the route, in milliseconds
    #[arg(long = "period-ms", default_value_t = 20_000)]
    pub period_ms: u64,

    /// Track color as RRGGBB
    #[arg(long = "track-color", default_value = "ffb703")]
    pub track_color: String,

    /// Track width in pixels
    #[arg(long = "line-width", default_value_t = 8.0)]
    pub line_width: f32,

    /// Track samples per route waypoint
    #[arg(long = "track-density", default_value_t = 10)]
    pub track_density: usize,

    /// Run without a window and log poses
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Maps platform API key
    #[arg(long = "api-key", env = "MAP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Vector map style id
    #[arg(long = "map-id", env = "MAP_ID")]
    pub map_id: Option<String>,
}
