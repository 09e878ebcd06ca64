// ============================================================================
// LOCATION PICKER - Cursor de teclado + click sobre el mapa de add-story
// ============================================================================
// Máquina de estados pura: la vista traduce cada PickerAction a Leaflet/DOM.
// Teclado y ratón terminan en el mismo Commit, y por tanto en el mismo texto
// de #lat-input / #lon-input.
// ============================================================================

use crate::config::CONFIG;
use crate::models::Coordinates;

pub const MAP_ARIA_LABEL: &str =
    "Peta interaktif untuk memilih lokasi. Gunakan panah untuk bergerak, Enter untuk memilih.";
pub const SELECTED_MESSAGE: &str = "Lokasi berhasil dipilih!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Other,
}

impl PickerKey {
    /// Desde `KeyboardEvent.key`
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowUp" => PickerKey::Up,
            "ArrowDown" => PickerKey::Down,
            "ArrowLeft" => PickerKey::Left,
            "ArrowRight" => PickerKey::Right,
            "Enter" => PickerKey::Enter,
            _ => PickerKey::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerAction {
    None,
    ShowCursor(Coordinates),
    HideCursor,
    /// Mover el marcador virtual y centrar el mapa
    MoveCursor(Coordinates),
    /// Rellenar inputs y sustituir el marcador elegido.
    /// `announce` = mostrar el toast de confirmación (solo teclado).
    Commit { at: Coordinates, announce: bool },
}

impl PickerAction {
    /// ¿La tecla fue consumida? (preventDefault)
    pub fn consumes_key(&self) -> bool {
        !matches!(self, PickerAction::None)
    }
}

#[derive(Debug, Clone)]
pub struct LocationPicker {
    cursor: Coordinates,
    step: f64,
    cursor_visible: bool,
    selected: Option<Coordinates>,
}

impl LocationPicker {
    pub fn new(start: Coordinates, step: f64) -> Self {
        Self {
            cursor: start,
            step,
            cursor_visible: false,
            selected: None,
        }
    }

    pub fn cursor(&self) -> Coordinates {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn selected(&self) -> Option<Coordinates> {
        self.selected
    }

    /// El mapa recibe el foco: aparece el marcador virtual
    pub fn focus(&mut self) -> PickerAction {
        if self.cursor_visible {
            return PickerAction::None;
        }
        self.cursor_visible = true;
        PickerAction::ShowCursor(self.cursor)
    }

    pub fn blur(&mut self) -> PickerAction {
        if !self.cursor_visible {
            return PickerAction::None;
        }
        self.cursor_visible = false;
        PickerAction::HideCursor
    }

    /// Teclas sin marcador virtual visible se ignoran
    pub fn handle_key(&mut self, key: PickerKey) -> PickerAction {
        if !self.cursor_visible {
            return PickerAction::None;
        }

        match key {
            PickerKey::Up => self.cursor.lat += self.step,
            PickerKey::Down => self.cursor.lat -= self.step,
            PickerKey::Left => self.cursor.lon -= self.step,
            PickerKey::Right => self.cursor.lon += self.step,
            PickerKey::Enter => {
                self.selected = Some(self.cursor);
                return PickerAction::Commit { at: self.cursor, announce: true };
            }
            PickerKey::Other => return PickerAction::None,
        }
        self.cursor = clamp_to_world(self.cursor);
        PickerAction::MoveCursor(self.cursor)
    }

    /// Click: elige el punto y lleva el cursor allí
    pub fn click(&mut self, at: Coordinates) -> PickerAction {
        let at = clamp_to_world(at);
        self.cursor = at;
        self.selected = Some(at);
        PickerAction::Commit { at, announce: false }
    }
}

impl Default for LocationPicker {
    fn default() -> Self {
        Self::new(
            Coordinates::new(CONFIG.map_config.default_center_lat, CONFIG.map_config.default_center_lon),
            CONFIG.map_config.cursor_step,
        )
    }
}

/// Latitud en [-90, 90] y longitud en [-180, 180]
fn clamp_to_world(at: Coordinates) -> Coordinates {
    Coordinates::new(at.lat.clamp(-90.0, 90.0), at.lon.clamp(-180.0, 180.0))
}
