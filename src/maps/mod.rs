// Módulo de mapas: trait común + implementación Leaflet para web

pub mod leaflet;
pub mod traits;

pub use leaflet::LeafletMap;
pub use traits::{MapError, MapMarker, MapViewport, MarkerLayer};
