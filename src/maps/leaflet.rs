use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;
use crate::models::Coordinates;
use crate::utils::leaflet_ffi::{self, js_options, lat_lng, Map, Marker};
use super::{MapError, MapMarker, MapViewport, MarkerLayer};

const MIN_MAP_HEIGHT: &str = "300px";

const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const POSITRON_TILES: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
const IMAGERY_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

const CURSOR_HTML: &str =
    "<div style=\"width: 12px; height: 12px; background: red; border-radius: 50%; border: 2px solid white;\"></div>";
const CURSOR_TITLE: &str = "Gunakan panah ↑↓←→ untuk bergerak, Enter untuk memilih";

/// Mapa Leaflet montado en un contenedor del DOM.
///
/// Lo posee el `MountScope` de la vista; `destroy` libera la instancia.
pub struct LeafletMap {
    map: Map,
    markers: Vec<Marker>,
    cursor: Option<Marker>,
    selected: Option<Marker>,
    destroyed: bool,
}

impl LeafletMap {
    /// Crear el mapa en `#container_id` con la vista inicial
    pub fn mount(container_id: &str, viewport: MapViewport) -> Result<Self, MapError> {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| MapError::ContainerMissing(container_id.to_string()))?;

        if let Some(element) = container.dyn_ref::<HtmlElement>() {
            let style = element.style();
            if style.get_property_value("height").unwrap_or_default().is_empty() {
                let _ = style.set_property("height", MIN_MAP_HEIGHT);
            }
        }

        let map = leaflet_ffi::create_map(container_id)
            .map_err(|e| MapError::Library(format!("{:?}", e)))?;
        map.set_view(&lat_lng(viewport.center.lat, viewport.center.lon), viewport.zoom);
        log::info!("🗺️ [MAP] Mapa creado en #{}", container_id);

        Ok(Self {
            map,
            markers: Vec::new(),
            cursor: None,
            selected: None,
            destroyed: false,
        })
    }

    /// OpenStreetMap, CartoDB Positron y satélite con control de capas
    pub fn with_base_layers(self) -> Self {
        let osm = leaflet_ffi::tile_layer(
            OSM_TILES,
            &js_options(&[(
                "attribution",
                JsValue::from_str("&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"),
            )]),
        );
        let positron = leaflet_ffi::tile_layer(
            POSITRON_TILES,
            &js_options(&[(
                "attribution",
                JsValue::from_str("&copy; <a href=\"https://carto.com/attributions\">CARTO</a>"),
            )]),
        );
        let imagery = leaflet_ffi::tile_layer(
            IMAGERY_TILES,
            &js_options(&[(
                "attribution",
                JsValue::from_str("Esri, HERE, Garmin, © OpenStreetMap contributors, and the GIS User Community"),
            )]),
        );

        let base_layers = js_options(&[
            ("OpenStreetMap", osm.clone().into()),
            ("CartoDB Positron", positron.into()),
            ("Satellite", imagery.into()),
        ]);
        leaflet_ffi::control_layers(&base_layers).add_to(&self.map);
        osm.add_to(&self.map);
        self
    }

    /// Solo OpenStreetMap (selector de ubicación)
    pub fn with_street_layer(self) -> Self {
        leaflet_ffi::tile_layer(
            OSM_TILES,
            &js_options(&[("attribution", JsValue::from_str("&copy; OpenStreetMap"))]),
        )
        .add_to(&self.map);
        self
    }

    pub fn container(&self) -> HtmlElement {
        self.map.get_container()
    }

    /// Registrar un handler de evento de Leaflet (`click`, `focus`, `blur`)
    pub fn on(&self, event: &str, handler: &js_sys::Function) {
        self.map.on(event, handler);
    }

    /// Mostrar el marcador virtual del cursor de teclado
    pub fn show_cursor(&mut self, at: Coordinates) {
        if self.cursor.is_some() {
            return;
        }
        let icon = leaflet_ffi::div_icon(&js_options(&[
            ("className", JsValue::from_str("virtual-marker")),
            ("html", JsValue::from_str(CURSOR_HTML)),
            ("iconSize", lat_lng(12.0, 12.0)),
            ("iconAnchor", lat_lng(6.0, 6.0)),
        ]));
        let marker = leaflet_ffi::marker(
            &lat_lng(at.lat, at.lon),
            &js_options(&[
                ("draggable", JsValue::FALSE),
                ("title", JsValue::from_str(CURSOR_TITLE)),
                ("icon", icon),
            ]),
        );
        marker.add_to(&self.map);
        self.cursor = Some(marker);
    }

    /// Mover el cursor y centrar el mapa en él
    pub fn move_cursor(&self, at: Coordinates, pan: bool) {
        let position = lat_lng(at.lat, at.lon);
        if let Some(cursor) = &self.cursor {
            cursor.set_lat_lng(&position);
        }
        if pan {
            self.map.pan_to(&position, &js_options(&[("animate", JsValue::TRUE)]));
        }
    }

    pub fn hide_cursor(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            self.map.remove_layer(&cursor);
        }
    }

    /// Sustituir el marcador de la ubicación elegida (popup abierto)
    pub fn select(&mut self, at: Coordinates) {
        if let Some(previous) = self.selected.take() {
            self.map.remove_layer(&previous);
        }
        let marker = leaflet_ffi::marker(&lat_lng(at.lat, at.lon), &JsValue::UNDEFINED);
        marker.add_to(&self.map);
        marker.bind_popup(&at.popup_label()).open_popup();
        self.selected = Some(marker);
    }

    /// Liberar la instancia (idempotente)
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.markers.clear();
        self.cursor = None;
        self.selected = None;
        self.map.remove();
        self.destroyed = true;
        log::debug!("🧹 [MAP] Mapa liberado");
    }
}

impl MarkerLayer for LeafletMap {
    fn clear_markers(&mut self) -> Result<(), MapError> {
        if self.destroyed {
            return Err(MapError::NotReady);
        }
        for marker in self.markers.drain(..) {
            self.map.remove_layer(&marker);
        }
        Ok(())
    }

    fn add_marker(&mut self, marker: &MapMarker) -> Result<(), MapError> {
        if self.destroyed {
            return Err(MapError::NotReady);
        }
        if !marker.position.lat.is_finite() || !marker.position.lon.is_finite() {
            return Err(MapError::InvalidCoordinates);
        }
        let leaflet_marker = leaflet_ffi::marker(
            &lat_lng(marker.position.lat, marker.position.lon),
            &JsValue::UNDEFINED,
        );
        leaflet_marker.add_to(&self.map);
        leaflet_marker.bind_popup(&marker.popup_html);
        self.markers.push(leaflet_marker);
        Ok(())
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
