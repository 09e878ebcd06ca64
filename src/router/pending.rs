use std::cell::RefCell;
use std::rc::Rc;
use super::route::Route;

/// Ruta protegida a la que se intentó entrar sin sesión.
///
/// Como máximo una: un segundo rechazo sobrescribe. `take` la consume.
#[derive(Clone, Default)]
pub struct PendingRedirect {
    target: Rc<RefCell<Option<Route>>>,
}

impl PendingRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, route: Route) {
        *self.target.borrow_mut() = Some(route);
    }

    pub fn take(&self) -> Option<Route> {
        self.target.borrow_mut().take()
    }

    pub fn peek(&self) -> Option<Route> {
        *self.target.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_once() {
        let pending = PendingRedirect::new();
        pending.record(Route::AddStory);
        assert_eq!(pending.take(), Some(Route::AddStory));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn test_second_record_overwrites() {
        let pending = PendingRedirect::new();
        pending.record(Route::AddStory);
        pending.record(Route::Profile);
        assert_eq!(pending.take(), Some(Route::Profile));
        assert_eq!(pending.peek(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let pending = PendingRedirect::new();
        let other = pending.clone();
        pending.record(Route::StoryList);
        assert_eq!(other.take(), Some(Route::StoryList));
        assert_eq!(pending.peek(), None);
    }
}
