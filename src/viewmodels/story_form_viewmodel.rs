// ============================================================================
// STORY FORM VIEWMODEL - Validación y envío de una historia nueva
// ============================================================================
// SOLO lógica - la vista lee los inputs y pinta los errores
// ============================================================================

use crate::models::{ApiError, Coordinates, Session, StoryUpload};
use crate::services::api_client::{StoryGateway, UploadAuth};

pub const SUCCESS_MESSAGE: &str = "Cerita berhasil dibuat!";

/// Campo del formulario (cada uno con su input en el DOM)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Photo,
    Latitude,
    Longitude,
}

impl FormField {
    pub fn input_id(&self) -> &'static str {
        match self {
            FormField::Description => "description-input",
            FormField::Photo => "photo-input",
            FormField::Latitude => "lat-input",
            FormField::Longitude => "lon-input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormError {
    pub field: FormField,
    pub message: String,
}

impl FormError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.input_id(), self.message)
    }
}

/// Foto elegida (archivo o captura de cámara) y su tamaño en bytes
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoInput<P> {
    pub file: P,
    pub size: u64,
}

/// Valores crudos del formulario
#[derive(Debug, Clone, PartialEq)]
pub struct StoryForm<P> {
    pub description: String,
    pub photo: Option<PhotoInput<P>>,
    pub lat: String,
    pub lon: String,
}

impl<P> StoryForm<P> {
    /// Validar en orden: descripción, foto, tamaño, coordenadas.
    /// Devuelve el primer error encontrado.
    pub fn validate(self, max_photo_bytes: u64) -> Result<StoryUpload<P>, FormError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::new(FormField::Description, "Deskripsi harus diisi."));
        }

        let photo = self
            .photo
            .ok_or_else(|| FormError::new(FormField::Photo, "Silakan pilih foto."))?;
        if photo.size > max_photo_bytes {
            return Err(FormError::new(FormField::Photo, "Ukuran foto maksimal 1MB."));
        }

        let location = parse_location(&self.lat, &self.lon)?;

        Ok(StoryUpload {
            description: description.to_string(),
            photo: photo.file,
            location,
        })
    }
}

/// Solo hay ubicación si ambos campos tienen texto
fn parse_location(lat: &str, lon: &str) -> Result<Option<Coordinates>, FormError> {
    let (lat, lon) = (lat.trim(), lon.trim());
    if lat.is_empty() || lon.is_empty() {
        return Ok(None);
    }

    let lat: f64 = lat
        .parse()
        .ok()
        .filter(|v: &f64| (-90.0..=90.0).contains(v))
        .ok_or_else(|| FormError::new(FormField::Latitude, "Latitude tidak valid."))?;
    let lon: f64 = lon
        .parse()
        .ok()
        .filter(|v: &f64| (-180.0..=180.0).contains(v))
        .ok_or_else(|| FormError::new(FormField::Longitude, "Longitude tidak valid."))?;

    Ok(Some(Coordinates::new(lat, lon)))
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    Invalid(FormError),
    Api(ApiError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Invalid(e) => write!(f, "{}", e.message),
            SubmitError::Api(e) => write!(f, "Gagal menambahkan cerita: {}", e.message()),
        }
    }
}

impl From<FormError> for SubmitError {
    fn from(err: FormError) -> Self {
        SubmitError::Invalid(err)
    }
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        SubmitError::Api(err)
    }
}

/// Validar y enviar. Con un formulario inválido el gateway no se llama.
pub async fn submit<G: StoryGateway>(
    gateway: &G,
    session: &Session,
    form: StoryForm<G::Photo>,
    max_photo_bytes: u64,
    guest: bool,
) -> Result<String, SubmitError> {
    let upload = form.validate(max_photo_bytes)?;
    let auth = UploadAuth::for_session(session, guest)?;
    let message = gateway.add_story(upload, auth).await?;
    log::info!("✅ [FORM] Historia enviada: {}", message);
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Story, StoryFilter};
    use futures::executor::block_on;
    use std::cell::RefCell;

    const MAX: u64 = 1024 * 1024;

    #[derive(Default)]
    struct FakeStories {
        uploads: RefCell<Vec<(StoryUpload<&'static str>, UploadAuth)>>,
    }

    impl StoryGateway for FakeStories {
        type Photo = &'static str;

        async fn list_stories(&self, _token: &str, _filter: StoryFilter) -> Result<Vec<Story>, ApiError> {
            Ok(Vec::new())
        }

        async fn add_story(&self, upload: StoryUpload<&'static str>, auth: UploadAuth) -> Result<String, ApiError> {
            self.uploads.borrow_mut().push((upload, auth));
            Ok("Story created successfully".to_string())
        }
    }

    fn form(description: &str, photo_size: Option<u64>) -> StoryForm<&'static str> {
        StoryForm {
            description: description.to_string(),
            photo: photo_size.map(|size| PhotoInput { file: "photo.jpg", size }),
            lat: String::new(),
            lon: String::new(),
        }
    }

    fn session() -> Session {
        Session::new("tok", "Budi")
    }

    #[test]
    fn test_empty_description_never_reaches_gateway() {
        let gateway = FakeStories::default();
        let result = block_on(submit(&gateway, &session(), form("   ", Some(10)), MAX, false));
        match result {
            Err(SubmitError::Invalid(e)) => {
                assert_eq!(e.field, FormField::Description);
                assert_eq!(e.message, "Deskripsi harus diisi.");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(gateway.uploads.borrow().is_empty());
    }

    #[test]
    fn test_missing_photo_never_reaches_gateway() {
        let gateway = FakeStories::default();
        let result = block_on(submit(&gateway, &session(), form("Pantai", None), MAX, false));
        assert!(matches!(result, Err(SubmitError::Invalid(FormError { field: FormField::Photo, .. }))));
        assert!(gateway.uploads.borrow().is_empty());
    }

    #[test]
    fn test_oversized_photo_never_reaches_gateway() {
        let gateway = FakeStories::default();
        let result = block_on(submit(&gateway, &session(), form("Pantai", Some(MAX + 1)), MAX, false));
        match result {
            Err(SubmitError::Invalid(e)) => assert_eq!(e.message, "Ukuran foto maksimal 1MB."),
            other => panic!("unexpected {:?}", other),
        }
        assert!(gateway.uploads.borrow().is_empty());
    }

    #[test]
    fn test_photo_at_limit_is_accepted() {
        let gateway = FakeStories::default();
        let result = block_on(submit(&gateway, &session(), form("Pantai", Some(MAX)), MAX, false));
        assert_eq!(result, Ok("Story created successfully".to_string()));

        let uploads = gateway.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0.description, "Pantai");
        assert_eq!(uploads[0].0.location, None);
        assert_eq!(uploads[0].1, UploadAuth::Bearer("tok".to_string()));
    }

    #[test]
    fn test_location_sent_only_when_both_fields_present() {
        let mut with_both = form("Pantai", Some(10));
        with_both.lat = "-6.200000".to_string();
        with_both.lon = "106.800000".to_string();
        let upload = with_both.validate(MAX).unwrap();
        assert_eq!(upload.location, Some(Coordinates::new(-6.2, 106.8)));

        let mut lat_only = form("Pantai", Some(10));
        lat_only.lat = "-6.2".to_string();
        assert_eq!(lat_only.validate(MAX).unwrap().location, None);
    }

    #[test]
    fn test_invalid_coordinates_name_the_field() {
        let mut bad = form("Pantai", Some(10));
        bad.lat = "-6.2".to_string();
        bad.lon = "abc".to_string();
        assert_eq!(bad.validate(MAX).unwrap_err().field, FormField::Longitude);

        let mut out_of_range = form("Pantai", Some(10));
        out_of_range.lat = "91".to_string();
        out_of_range.lon = "0".to_string();
        assert_eq!(out_of_range.validate(MAX).unwrap_err().field, FormField::Latitude);
    }

    #[test]
    fn test_anonymous_upload_requires_guest_mode() {
        let gateway = FakeStories::default();
        let result = block_on(submit(&gateway, &Session::default(), form("Pantai", Some(10)), MAX, false));
        assert!(matches!(result, Err(SubmitError::Api(ApiError::Unauthorized(_)))));
        assert!(gateway.uploads.borrow().is_empty());

        block_on(submit(&gateway, &Session::default(), form("Pantai", Some(10)), MAX, true)).unwrap();
        assert_eq!(gateway.uploads.borrow()[0].1, UploadAuth::Guest);
    }

    #[test]
    fn test_submit_error_messages() {
        let err = SubmitError::Api(ApiError::Server("Payload too large".to_string()));
        assert_eq!(err.to_string(), "Gagal menambahkan cerita: Payload too large");
    }
}
