// ============================================================================
// STORY LIST VIEWMODEL - Tarjetas y marcadores de la lista de historias
// ============================================================================
// Preparación de datos + contador de peticiones (solo la última se pinta)
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use chrono::DateTime;
use crate::maps::{MapError, MapMarker, MarkerLayer};
use crate::models::{ApiError, Session, Story, StoryFilter};
use crate::services::api_client::StoryGateway;
use crate::utils::escape_html;

pub const LOADING_HTML: &str = r#"<div class="loading-indicator">
  <div class="loading-spinner"></div>
  <p>Memuat cerita...</p>
</div>"#;

pub const EMPTY_HTML: &str = "<p>Tidak ada cerita yang ditemukan.</p>";

pub const LOGIN_PROMPT_HTML: &str = r##"<div class="login-prompt">
  <h3>Anda harus login untuk melihat daftar cerita.</h3>
  <p>Silakan <a href="#/login">login</a> terlebih dahulu.</p>
</div>"##;

pub fn error_html(error: &ApiError) -> String {
    format!("<p class=\"error\">Gagal memuat cerita: {}</p>", escape_html(error.message()))
}

/// `createdAt` ISO-8601 -> "Mar 1, 2024". Si no se puede parsear, el texto tal cual.
pub fn format_created_at(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// Datos de una tarjeta, ya con los valores por defecto aplicados
#[derive(Debug, Clone, PartialEq)]
pub struct StoryCard {
    pub photo_url: String,
    pub alt: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: Option<String>,
}

impl StoryCard {
    pub fn from_story(story: &Story) -> Self {
        let description = story.description.as_deref().filter(|d| !d.is_empty());
        Self {
            photo_url: story.photo_url.clone(),
            alt: description.unwrap_or("Foto cerita").to_string(),
            name: story
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or("Anonim")
                .to_string(),
            description: description.unwrap_or("—").to_string(),
            date: format_created_at(&story.created_at),
            location: story.coordinates().map(|c| format!("📍 {}", c.short_label())),
        }
    }

    pub fn to_html(&self) -> String {
        let location = self
            .location
            .as_ref()
            .map(|l| format!("<span class=\"story-location\">{}</span>", l))
            .unwrap_or_default();
        format!(
            r#"<article class="story-card">
  <img src="{}" alt="{}" class="story-image">
  <div class="story-info">
    <h3>{}</h3>
    <p>{}</p>
    <small>— {}</small>
    {}
  </div>
</article>"#,
            escape_html(&self.photo_url),
            escape_html(&self.alt),
            escape_html(&self.name),
            escape_html(&self.description),
            self.date,
            location
        )
    }
}

/// HTML de `#story-list-container`
pub fn render_cards(stories: &[Story]) -> String {
    if stories.is_empty() {
        return EMPTY_HTML.to_string();
    }
    stories
        .iter()
        .map(|story| StoryCard::from_story(story).to_html())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Un marcador por historia con coordenadas que pase el filtro
pub fn markers_for(stories: &[Story], filter: StoryFilter) -> Vec<MapMarker> {
    let markers: Vec<MapMarker> = stories
        .iter()
        .filter(|story| filter.accepts(story))
        .filter_map(|story| {
            let position = story.coordinates()?;
            Some(MapMarker {
                id: story.id.clone(),
                position,
                popup_html: popup_html(story),
            })
        })
        .collect();

    log::info!("📍 [STORIES] {} marcadores (de {} historias)", markers.len(), stories.len());
    markers
}

fn popup_html(story: &Story) -> String {
    let name = story.name.as_deref().unwrap_or("Anonim");
    let description = story.description.as_deref().unwrap_or("Tidak ada deskripsi");
    format!(
        "<strong>{}</strong><br>{}<br><img src=\"{}\" alt=\"{}\" style=\"max-width:100px; max-height:100px;\">",
        escape_html(name),
        escape_html(description),
        escape_html(&story.photo_url),
        escape_html(story.description.as_deref().unwrap_or("Foto story")),
    )
}

/// Sustituir los marcadores de la capa
pub fn show_markers<L: MarkerLayer>(layer: &mut L, markers: &[MapMarker]) -> Result<usize, MapError> {
    layer.clear_markers()?;
    for marker in markers {
        layer.add_marker(marker)?;
    }
    Ok(layer.marker_count())
}

/// Peticiones de historias de un montaje. Cada cambio de filtro abre una
/// nueva; una respuesta solo se pinta si nadie la ha superado.
#[derive(Debug, Clone, Default)]
pub struct StoryRequests {
    latest: Rc<Cell<u64>>,
}

impl StoryRequests {
    pub fn begin(&self) -> u64 {
        let id = self.latest.get() + 1;
        self.latest.set(id);
        id
    }

    pub fn is_latest(&self, id: u64) -> bool {
        self.latest.get() == id
    }
}

/// Cargar historias (requiere sesión)
pub async fn load_stories<G: StoryGateway>(
    gateway: &G,
    session: &Session,
    filter: StoryFilter,
) -> Result<Vec<Story>, ApiError> {
    let token = session.token().ok_or_else(ApiError::missing_token)?;
    gateway.list_stories(token, filter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, StoryUpload};
    use crate::services::api_client::UploadAuth;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    fn story(id: &str, coords: Option<(f64, f64)>) -> Story {
        Story {
            id: id.to_string(),
            name: Some("Dimas".to_string()),
            description: Some("Lorem Ipsum".to_string()),
            photo_url: format!("https://story-api.dicoding.dev/images/{}.jpg", id),
            lat: coords.map(|c| c.0),
            lon: coords.map(|c| c.1),
            created_at: "2022-01-08T06:34:18.598Z".to_string(),
        }
    }

    #[derive(Default)]
    struct FakeLayer {
        markers: Vec<MapMarker>,
        clears: usize,
    }

    impl MarkerLayer for FakeLayer {
        fn clear_markers(&mut self) -> Result<(), MapError> {
            self.markers.clear();
            self.clears += 1;
            Ok(())
        }

        fn add_marker(&mut self, marker: &MapMarker) -> Result<(), MapError> {
            self.markers.push(marker.clone());
            Ok(())
        }

        fn marker_count(&self) -> usize {
            self.markers.len()
        }
    }

    #[test]
    fn test_two_located_stories_give_two_markers() {
        let stories = vec![story("a", Some((-6.2, 106.8))), story("b", Some((-7.25, 112.75)))];
        let mut layer = FakeLayer::default();
        let count = show_markers(&mut layer, &markers_for(&stories, StoryFilter::All)).unwrap();
        assert_eq!(count, 2);
        assert_eq!(layer.markers[1].position, Coordinates::new(-7.25, 112.75));
    }

    #[test]
    fn test_location_filter_skips_story_without_coordinates() {
        let stories = vec![story("a", Some((-6.2, 106.8))), story("b", None)];
        let markers = markers_for(&stories, StoryFilter::WithLocation);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, "a");
    }

    #[test]
    fn test_show_markers_replaces_previous_set() {
        let mut layer = FakeLayer::default();
        show_markers(&mut layer, &markers_for(&[story("a", Some((1.0, 2.0)))], StoryFilter::All)).unwrap();
        show_markers(&mut layer, &markers_for(&[story("b", None)], StoryFilter::All)).unwrap();
        assert_eq!(layer.marker_count(), 0);
        assert_eq!(layer.clears, 2);
    }

    #[test]
    fn test_card_defaults_and_date() {
        let mut anonymous = story("a", Some((-6.2049, 106.8456)));
        anonymous.name = None;
        anonymous.description = None;

        let card = StoryCard::from_story(&anonymous);
        assert_eq!(card.name, "Anonim");
        assert_eq!(card.description, "—");
        assert_eq!(card.date, "Jan 8, 2022");
        assert_eq!(card.location.as_deref(), Some("📍 -6.20, 106.85"));
    }

    #[test]
    fn test_card_escapes_user_text() {
        let mut hostile = story("a", None);
        hostile.name = Some("<script>".to_string());
        let html = StoryCard::from_story(&hostile).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("story-location"));
    }

    #[test]
    fn test_unparseable_date_is_shown_raw() {
        assert_eq!(format_created_at("kemarin"), "kemarin");
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(render_cards(&[]), EMPTY_HTML);
    }

    struct CountingStories {
        calls: Cell<usize>,
        last_filter: RefCell<Option<StoryFilter>>,
    }

    impl StoryGateway for CountingStories {
        type Photo = ();

        async fn list_stories(&self, _token: &str, filter: StoryFilter) -> Result<Vec<Story>, ApiError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_filter.borrow_mut() = Some(filter);
            Ok(vec![story("a", None)])
        }

        async fn add_story(&self, _upload: StoryUpload<()>, _auth: UploadAuth) -> Result<String, ApiError> {
            unreachable!()
        }
    }

    #[test]
    fn test_load_stories_requires_token() {
        let gateway = CountingStories { calls: Cell::new(0), last_filter: RefCell::new(None) };

        let result = block_on(load_stories(&gateway, &Session::default(), StoryFilter::All));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
        assert_eq!(gateway.calls.get(), 0);

        let stories = block_on(load_stories(&gateway, &Session::new("tok", "Budi"), StoryFilter::WithLocation)).unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(*gateway.last_filter.borrow(), Some(StoryFilter::WithLocation));
    }

    #[test]
    fn test_superseded_request_is_not_latest() {
        let requests = StoryRequests::default();
        let with_location = requests.begin();
        let all = requests.clone().begin();

        // La respuesta de "con ubicación" llega la última: se descarta
        assert!(!requests.is_latest(with_location));
        assert!(requests.is_latest(all));
    }

    #[test]
    fn test_single_request_is_latest() {
        let requests = StoryRequests::default();
        let id = requests.begin();
        assert!(requests.is_latest(id));
    }
}
