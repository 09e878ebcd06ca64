use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub views_base_path: String,
    pub service_worker_path: String,
    pub vapid_public_key: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub view_transition_ms: u32,
    pub toast_duration_ms: u32,
    pub max_photo_bytes: u64,
    pub map_config: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://story-api.dicoding.dev/v1".to_string(),
            views_base_path: "views".to_string(),
            service_worker_path: "/sw.js".to_string(),
            vapid_public_key: DEFAULT_VAPID_PUBLIC_KEY.to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            view_transition_ms: 300,
            toast_duration_ms: 3000,
            max_photo_bytes: 1024 * 1024,
            map_config: MapConfig::default(),
        }
    }
}

const DEFAULT_VAPID_PUBLIC_KEY: &str =
    "BCCs2eonMI-6H2ctvFaWg-UYdDv387Vno_bzUzALpB442r2lCnsHmtrx8biyPi_E-1fSGABK_Qs_GlvPoJJqxbk";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lon: f64,
    pub default_zoom: f64,
    /// Paso del cursor de teclado, en grados
    pub cursor_step: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: -6.2,
            default_center_lon: 106.8,
            default_zoom: 5.0,
            cursor_step: 0.01,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let map_defaults = MapConfig::default();

        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            views_base_path: option_env!("VIEWS_BASE_PATH")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.views_base_path),
            service_worker_path: option_env!("SERVICE_WORKER_PATH")
                .map(|s| s.to_string())
                .unwrap_or(defaults.service_worker_path),
            vapid_public_key: option_env!("VAPID_PUBLIC_KEY")
                .map(|s| s.to_string())
                .unwrap_or(defaults.vapid_public_key),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            log_level: option_env!("LOG_LEVEL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.log_level),
            view_transition_ms: parse_or(option_env!("VIEW_TRANSITION_MS"), defaults.view_transition_ms),
            toast_duration_ms: parse_or(option_env!("TOAST_DURATION_MS"), defaults.toast_duration_ms),
            max_photo_bytes: parse_or(option_env!("MAX_PHOTO_BYTES"), defaults.max_photo_bytes),
            map_config: MapConfig {
                default_center_lat: parse_or(option_env!("DEFAULT_MAP_CENTER_LAT"), map_defaults.default_center_lat),
                default_center_lon: parse_or(option_env!("DEFAULT_MAP_CENTER_LON"), map_defaults.default_center_lon),
                default_zoom: parse_or(option_env!("DEFAULT_MAP_ZOOM"), map_defaults.default_zoom),
                cursor_step: parse_or(option_env!("MAP_CURSOR_STEP"), map_defaults.cursor_step),
            },
        }
    }

    /// Ruta de la plantilla HTML de una vista
    pub fn view_url(&self, view_name: &str) -> String {
        format!("{}/{}.html", self.views_base_path, view_name)
    }

    /// Nivel de log efectivo (Off si el logging está deshabilitado)
    pub fn log_level_filter(&self) -> log::LevelFilter {
        if !self.enable_logging {
            return log::LevelFilter::Off;
        }
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
