// ============================================================================
// ROUTER - Máquina de estados de navegación
// ============================================================================
// Idle -> Resolving -> (GuardedRedirect | Loading -> (Mounted | Error)) -> Idle
//
// No toca el DOM: decide qué hacer y la App lo ejecuta. Cada carga recibe un
// ticket; solo el resultado del ticket más reciente se monta.
// ============================================================================

use crate::models::Session;
use super::pending::PendingRedirect;
use super::route::{Route, ViewName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Resolving,
    GuardedRedirect,
    Loading,
    Mounted,
    Error,
}

/// Identifica un ciclo de navegación
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NavigationTicket(u64);

/// Decisión tras resolver un fragmento
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Cambiar `location.hash` sin montar nada en este ciclo
    Redirect(Route),
    /// Cerrar sesión y volver a Home
    Logout,
    /// Transición de salida + descarga del markup de la vista
    Load {
        route: Route,
        view: ViewName,
        ticket: NavigationTicket,
    },
}

/// Qué hacer con el resultado de la descarga del markup
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Mount { view: ViewName, markup: String },
    ShowError { view: ViewName, message: String },
    /// Otra navegación empezó después: se descarta
    Stale,
}

pub struct Router {
    state: NavState,
    pending: PendingRedirect,
    next_ticket: u64,
    in_flight: Option<(NavigationTicket, ViewName)>,
    mounted: Option<ViewName>,
}

impl Router {
    pub fn new(pending: PendingRedirect) -> Self {
        Self {
            state: NavState::Idle,
            pending,
            next_ticket: 0,
            in_flight: None,
            mounted: None,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Vista actualmente montada en la región de contenido
    pub fn mounted_view(&self) -> Option<ViewName> {
        self.mounted
    }

    pub fn pending(&self) -> &PendingRedirect {
        &self.pending
    }

    pub fn is_current(&self, ticket: NavigationTicket) -> bool {
        matches!(self.in_flight, Some((current, _)) if current == ticket)
    }

    /// Resolver un cambio de fragmento (incluida la carga inicial)
    pub fn resolve(&mut self, fragment: &str, session: &Session) -> Resolution {
        self.state = NavState::Resolving;
        let route = Route::from_fragment(fragment);
        log::info!("🧭 [ROUTER] Resolviendo '{}' -> {:?}", fragment, route);

        if route.requires_auth() && !session.is_authenticated() {
            log::warn!("🔒 [ROUTER] Acceso a {} denegado, redirigiendo a login", route.pattern());
            self.pending.record(route);
            self.state = NavState::GuardedRedirect;
            return self.finish(Resolution::Redirect(Route::Login));
        }

        match route {
            Route::Login if session.is_authenticated() => {
                log::info!("🔁 [ROUTER] Ya hay sesión, login -> home");
                self.finish(Resolution::Redirect(Route::Home))
            }
            Route::Logout => self.finish(Resolution::Logout),
            _ => {
                let view = route.view().unwrap_or(ViewName::Home);
                let ticket = NavigationTicket(self.next_ticket);
                self.next_ticket += 1;
                self.in_flight = Some((ticket, view));
                self.state = NavState::Loading;
                Resolution::Load { route, view, ticket }
            }
        }
    }

    /// Resultado de la descarga del markup de `ticket`
    pub fn complete(&mut self, ticket: NavigationTicket, result: Result<String, String>) -> Completion {
        let view = match self.in_flight {
            Some((current, view)) if current == ticket => view,
            _ => {
                log::info!("⏭️ [ROUTER] Resultado de navegación obsoleto ({:?}), descartado", ticket);
                return Completion::Stale;
            }
        };
        self.in_flight = None;

        let completion = match result {
            Ok(markup) => {
                self.state = NavState::Mounted;
                self.mounted = Some(view);
                log::info!("✅ [ROUTER] Vista '{}' montada", view.as_str());
                Completion::Mount { view, markup }
            }
            Err(message) => {
                // El error sustituye a la vista anterior en #main-content
                self.state = NavState::Error;
                self.mounted = None;
                log::error!("❌ [ROUTER] Error cargando '{}': {}", view.as_str(), message);
                Completion::ShowError { view, message }
            }
        };

        self.state = NavState::Idle;
        completion
    }

    fn finish(&mut self, resolution: Resolution) -> Resolution {
        // Un redirect invalida la carga en vuelo
        self.in_flight = None;
        self.state = NavState::Idle;
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> Session {
        Session::default()
    }

    fn logged_in() -> Session {
        Session::new("token-123", "Budi")
    }

    fn router() -> Router {
        Router::new(PendingRedirect::new())
    }

    fn load_ticket(resolution: Resolution) -> (ViewName, NavigationTicket) {
        match resolution {
            Resolution::Load { view, ticket, .. } => (view, ticket),
            other => panic!("expected Load, got {:?}", other),
        }
    }

    #[test]
    fn test_protected_routes_redirect_without_token() {
        for fragment in ["#/story-list", "#/add-story", "#/profile", "#/profile?tab=push"] {
            let mut router = router();
            let resolution = router.resolve(fragment, &anonymous());
            assert_eq!(resolution, Resolution::Redirect(Route::Login));
            assert_eq!(router.state(), NavState::Idle);
            assert_eq!(router.mounted_view(), None);
            assert_eq!(router.pending().peek(), Some(Route::from_fragment(fragment)));
        }
    }

    #[test]
    fn test_protected_route_loads_with_token() {
        let mut router = router();
        let (view, _) = load_ticket(router.resolve("#/add-story", &logged_in()));
        assert_eq!(view, ViewName::AddStory);
        assert_eq!(router.state(), NavState::Loading);
        assert_eq!(router.pending().peek(), None);
    }

    #[test]
    fn test_login_with_session_redirects_home() {
        let mut router = router();
        assert_eq!(router.resolve("#/login", &logged_in()), Resolution::Redirect(Route::Home));
        assert_eq!(router.mounted_view(), None);
    }

    #[test]
    fn test_login_without_session_loads() {
        let mut router = router();
        let (view, _) = load_ticket(router.resolve("#/login", &anonymous()));
        assert_eq!(view, ViewName::Login);
    }

    #[test]
    fn test_logout_never_mounts() {
        let mut router = router();
        assert_eq!(router.resolve("#/logout", &logged_in()), Resolution::Logout);
        assert_eq!(router.resolve("#/logout", &anonymous()), Resolution::Logout);
        assert_eq!(router.state(), NavState::Idle);
        assert_eq!(router.mounted_view(), None);
    }

    #[test]
    fn test_unknown_route_loads_home() {
        let mut router = router();
        let (view, _) = load_ticket(router.resolve("#/nope", &anonymous()));
        assert_eq!(view, ViewName::Home);
    }

    #[test]
    fn test_mount_cycle_returns_to_idle() {
        let mut router = router();
        let (_, ticket) = load_ticket(router.resolve("#/about", &anonymous()));
        let completion = router.complete(ticket, Ok("<h2>About</h2>".to_string()));
        assert_eq!(
            completion,
            Completion::Mount { view: ViewName::About, markup: "<h2>About</h2>".to_string() }
        );
        assert_eq!(router.state(), NavState::Idle);
        assert_eq!(router.mounted_view(), Some(ViewName::About));
    }

    #[test]
    fn test_fetch_error_replaces_previous_view() {
        let mut router = router();
        let (_, first) = load_ticket(router.resolve("#/", &anonymous()));
        router.complete(first, Ok("home".to_string()));

        let (_, second) = load_ticket(router.resolve("#/about", &anonymous()));
        let completion = router.complete(second, Err("Halaman about tidak ditemukan.".to_string()));
        assert!(matches!(completion, Completion::ShowError { view: ViewName::About, .. }));
        assert_eq!(router.state(), NavState::Idle);
        // La vista anterior se desmonta y el 404 ocupa su lugar
        assert_eq!(router.mounted_view(), None);
    }

    #[test]
    fn test_superseded_result_is_stale() {
        let mut router = router();
        let (_, slow) = load_ticket(router.resolve("#/about", &anonymous()));
        let (_, fast) = load_ticket(router.resolve("#/register", &anonymous()));

        assert_eq!(
            router.complete(fast, Ok("register".to_string())),
            Completion::Mount { view: ViewName::Register, markup: "register".to_string() }
        );
        assert_eq!(router.complete(slow, Ok("about".to_string())), Completion::Stale);
        assert_eq!(router.mounted_view(), Some(ViewName::Register));
    }

    #[test]
    fn test_redirect_invalidates_in_flight_load() {
        let mut router = router();
        let (_, ticket) = load_ticket(router.resolve("#/about", &anonymous()));
        router.resolve("#/profile", &anonymous());
        assert!(!router.is_current(ticket));
        assert_eq!(router.complete(ticket, Ok("about".to_string())), Completion::Stale);
    }

    #[test]
    fn test_remount_same_view_gets_new_ticket() {
        let mut router = router();
        let (_, a) = load_ticket(router.resolve("#/story-list", &logged_in()));
        router.complete(a, Ok("list".to_string()));
        let (_, b) = load_ticket(router.resolve("#/story-list", &logged_in()));
        assert!(b > a);
        assert!(matches!(router.complete(b, Ok("list".to_string())), Completion::Mount { .. }));
    }

    #[test]
    fn test_logout_round_trip() {
        let mut router = router();
        let session = logged_in();
        let (view, _) = load_ticket(router.resolve("#/profile", &session));
        assert_eq!(view, ViewName::Profile);

        assert_eq!(router.resolve("#/logout", &session), Resolution::Logout);
        let cleared = Session::default();
        assert_eq!(router.resolve("#/profile", &cleared), Resolution::Redirect(Route::Login));
    }
}
