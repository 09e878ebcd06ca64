// ============================================================================
// MOUNT SCOPE - Recursos que pertenecen a una vista montada
// ============================================================================
// El mapa y el stream de la cámara se registran aquí y se liberan al
// desmontar la vista (antes de montar la siguiente).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use super::route::ViewName;

type Teardown = Box<dyn FnOnce()>;

struct ScopeInner {
    view: ViewName,
    teardown: Vec<Teardown>,
    unmounted: bool,
}

#[derive(Clone)]
pub struct MountScope {
    inner: Rc<RefCell<ScopeInner>>,
}

impl MountScope {
    pub fn new(view: ViewName) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScopeInner {
                view,
                teardown: Vec::new(),
                unmounted: false,
            })),
        }
    }

    pub fn view(&self) -> ViewName {
        self.inner.borrow().view
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.borrow().unmounted
    }

    /// Registrar limpieza. Si la vista ya se desmontó (p.ej. la cámara
    /// terminó de arrancar después de navegar) se ejecuta en el acto.
    pub fn on_unmount<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        let already_unmounted = self.inner.borrow().unmounted;
        if already_unmounted {
            f();
        } else {
            self.inner.borrow_mut().teardown.push(Box::new(f));
        }
    }

    /// Ejecutar la limpieza en orden inverso de registro. Idempotente.
    pub fn unmount(&self) {
        let hooks = {
            let mut inner = self.inner.borrow_mut();
            if inner.unmounted {
                return;
            }
            inner.unmounted = true;
            std::mem::take(&mut inner.teardown)
        };
        log::debug!("🧹 [MOUNT] Desmontando {} ({} recursos)", self.view().as_str(), hooks.len());
        for hook in hooks.into_iter().rev() {
            hook();
        }
    }
}
