use crate::config::CONFIG;
use crate::models::Coordinates;

/// Marcador listo para pintar (popup en HTML ya escapado)
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: String,
    pub position: Coordinates,
    pub popup_html: String,
}

/// Capa de marcadores de un mapa
pub trait MarkerLayer {
    /// Quitar todos los marcadores
    fn clear_markers(&mut self) -> Result<(), MapError>;

    fn add_marker(&mut self, marker: &MapMarker) -> Result<(), MapError>;

    fn marker_count(&self) -> usize;
}

/// Vista inicial del mapa
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: Coordinates::new(
                CONFIG.map_config.default_center_lat,
                CONFIG.map_config.default_center_lon,
            ),
            zoom: CONFIG.map_config.default_zoom,
        }
    }
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    NotReady,
    ContainerMissing(String),
    InvalidCoordinates,
    Library(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::NotReady => write!(f, "Map is not ready"),
            MapError::ContainerMissing(id) => write!(f, "Map container #{} not found", id),
            MapError::InvalidCoordinates => write!(f, "Invalid coordinates"),
            MapError::Library(msg) => write!(f, "Leaflet error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
