// ============================================================================
// ROUTES - Tabla estática de rutas por hash
// ============================================================================

/// Vista montable (nombre de la plantilla `views/<name>.html`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    Home,
    StoryList,
    AddStory,
    About,
    Login,
    Register,
    Profile,
}

impl ViewName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Home => "home",
            ViewName::StoryList => "story-list",
            ViewName::AddStory => "add-story",
            ViewName::About => "about",
            ViewName::Login => "login",
            ViewName::Register => "register",
            ViewName::Profile => "profile",
        }
    }

    /// Nombre con la primera letra en mayúscula, para `document.title`
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    StoryList,
    AddStory,
    About,
    Login,
    Register,
    Profile,
    Logout,
}

/// Entrada de la tabla: patrón -> vista + guard
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub route: Route,
    /// `None` para rutas que nunca montan vista (logout)
    pub view: Option<ViewName>,
    pub requires_auth: bool,
}

pub const ROUTES: [RouteEntry; 8] = [
    RouteEntry { pattern: "/", route: Route::Home, view: Some(ViewName::Home), requires_auth: false },
    RouteEntry { pattern: "/story-list", route: Route::StoryList, view: Some(ViewName::StoryList), requires_auth: true },
    RouteEntry { pattern: "/add-story", route: Route::AddStory, view: Some(ViewName::AddStory), requires_auth: true },
    RouteEntry { pattern: "/about", route: Route::About, view: Some(ViewName::About), requires_auth: false },
    RouteEntry { pattern: "/login", route: Route::Login, view: Some(ViewName::Login), requires_auth: false },
    RouteEntry { pattern: "/register", route: Route::Register, view: Some(ViewName::Register), requires_auth: false },
    RouteEntry { pattern: "/profile", route: Route::Profile, view: Some(ViewName::Profile), requires_auth: true },
    RouteEntry { pattern: "/logout", route: Route::Logout, view: None, requires_auth: false },
];

impl Route {
    /// Resolver un fragmento (`#/story-list?x=1`, `/about`, `""`).
    /// El query string se ignora; lo desconocido cae en Home.
    pub fn from_fragment(fragment: &str) -> Route {
        let path = fragment.trim_start_matches('#');
        let path = path.split('?').next().unwrap_or("");
        let path = if path.is_empty() { "/" } else { path };

        ROUTES
            .iter()
            .find(|entry| entry.pattern == path)
            .map(|entry| entry.route)
            .unwrap_or(Route::Home)
    }

    pub fn entry(&self) -> &'static RouteEntry {
        // La tabla cubre todas las variantes
        ROUTES
            .iter()
            .find(|entry| entry.route == *self)
            .unwrap_or(&ROUTES[0])
    }

    pub fn pattern(&self) -> &'static str {
        self.entry().pattern
    }

    /// Fragmento completo para `location.hash`
    pub fn fragment(&self) -> String {
        format!("#{}", self.pattern())
    }

    pub fn view(&self) -> Option<ViewName> {
        self.entry().view
    }

    pub fn requires_auth(&self) -> bool {
        self.entry().requires_auth
    }
}
