// ============================================================================
// CAMERA VIEWMODEL - Estado de la captura con getUserMedia
// ============================================================================

pub const CAPTURE_FILE_NAME: &str = "captured.jpg";
pub const CAPTURE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq)]
pub enum CameraState {
    Idle,
    Requesting,
    Streaming,
    Failed(String),
}

/// Qué controles se ven en cada estado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraControls {
    pub video: bool,
    pub capture_button: bool,
    pub cancel_button: bool,
    pub photo_input: bool,
    pub preview: bool,
}

impl CameraState {
    pub fn controls(&self) -> CameraControls {
        let streaming = matches!(self, CameraState::Streaming);
        CameraControls {
            video: streaming,
            capture_button: streaming,
            cancel_button: streaming,
            photo_input: !streaming,
            preview: !streaming,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraViewModel {
    state: CameraState,
}

impl CameraViewModel {
    pub fn new() -> Self {
        Self {
            state: CameraState::Idle,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// false si ya hay una petición o un stream activo
    pub fn request_start(&mut self) -> bool {
        match self.state {
            CameraState::Requesting | CameraState::Streaming => false,
            _ => {
                self.state = CameraState::Requesting;
                true
            }
        }
    }

    pub fn stream_started(&mut self) {
        self.state = CameraState::Streaming;
    }

    /// Devuelve el mensaje para el alert
    pub fn stream_failed(&mut self, reason: &str) -> String {
        self.state = CameraState::Failed(reason.to_string());
        format!("Gagal mengakses kamera: {}", reason)
    }

    pub fn can_capture(&self) -> bool {
        self.state == CameraState::Streaming
    }

    /// Tras capturar, cancelar o desmontar la vista
    pub fn stopped(&mut self) {
        self.state = CameraState::Idle;
    }
}

impl Default for CameraViewModel {
    fn default() -> Self {
        Self::new()
    }
}
