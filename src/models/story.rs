use serde::{Deserialize, Serialize};

/// Historia tal como la devuelve la API (`listStory[]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub photo_url: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    pub created_at: String,
}

impl Story {
    /// Solo hay ubicación si vienen lat y lon
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Texto de los inputs #lat-input / #lon-input
    pub fn to_fields(&self) -> (String, String) {
        (format!("{:.6}", self.lat), format!("{:.6}", self.lon))
    }

    /// Etiqueta del popup del marcador elegido
    pub fn popup_label(&self) -> String {
        format!("Lokasi: {:.4}, {:.4}", self.lat, self.lon)
    }

    /// Etiqueta corta de las tarjetas de historia
    pub fn short_label(&self) -> String {
        format!("{:.2}, {:.2}", self.lat, self.lon)
    }
}

/// Filtro de la lista de historias (`?location=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryFilter {
    #[default]
    All,
    WithLocation,
}

impl StoryFilter {
    pub fn query_value(&self) -> &'static str {
        match self {
            StoryFilter::All => "0",
            StoryFilter::WithLocation => "1",
        }
    }

    pub fn accepts(&self, story: &Story) -> bool {
        match self {
            StoryFilter::All => true,
            StoryFilter::WithLocation => story.coordinates().is_some(),
        }
    }
}

/// Historia validada lista para enviar (multipart)
#[derive(Debug, Clone, PartialEq)]
pub struct StoryUpload<P> {
    pub description: String,
    pub photo: P,
    pub location: Option<Coordinates>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(lat: Option<f64>, lon: Option<f64>) -> Story {
        Story {
            id: "story-1".to_string(),
            name: Some("Budi".to_string()),
            description: Some("Pantai".to_string()),
            photo_url: "https://example.com/a.jpg".to_string(),
            lat,
            lon,
            created_at: "2024-03-01T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "story-FvU4u0Vp2S3PMsFg",
            "name": "Dimas",
            "description": "Lorem Ipsum",
            "photoUrl": "https://story-api.dicoding.dev/images/stories/photos.jpg",
            "createdAt": "2022-01-08T06:34:18.598Z",
            "lat": -10.212,
            "lon": -16.002
        }"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.photo_url, "https://story-api.dicoding.dev/images/stories/photos.jpg");
        assert_eq!(story.coordinates(), Some(Coordinates::new(-10.212, -16.002)));
    }

    #[test]
    fn test_null_coordinates() {
        let json = r#"{"id":"s","name":"A","description":"B","photoUrl":"u","createdAt":"c","lat":null,"lon":null}"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.coordinates(), None);
    }

    #[test]
    fn test_half_coordinates_is_no_location() {
        assert_eq!(story(Some(1.0), None).coordinates(), None);
        assert!(!StoryFilter::WithLocation.accepts(&story(None, Some(2.0))));
        assert!(StoryFilter::All.accepts(&story(None, None)));
    }

    #[test]
    fn test_coordinate_formatting() {
        let c = Coordinates::new(-6.2, 106.8);
        assert_eq!(c.to_fields(), ("-6.200000".to_string(), "106.800000".to_string()));
        assert_eq!(c.popup_label(), "Lokasi: -6.2000, 106.8000");
        assert_eq!(c.short_label(), "-6.20, 106.80");
    }

    #[test]
    fn test_filter_query_value() {
        assert_eq!(StoryFilter::All.query_value(), "0");
        assert_eq!(StoryFilter::WithLocation.query_value(), "1");
    }
}
