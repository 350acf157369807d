//! Browser entry point: mounts the board into a page and wires DOM events.
//!
//! `mousedown` is listened for on the board root for the board's whole
//! lifetime. The window-level listeners a drag needs (`mousemove`, `mouseup`,
//! `blur`, `keydown`, and `mouseleave` on the document element) are held by a
//! [`ListenerGuard`] that exists only while the engine is dragging. Every
//! exit from the dragging state releases it, and dropping the guard removes
//! any listeners still attached.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

use crate::engine::Engine;

struct Shared {
    engine: Engine,
    listeners: Option<ListenerGuard>,
    /// A released guard whose closures may still be on the call stack; it is
    /// dropped when the next drag begins.
    retired: Option<ListenerGuard>,
}

/// A mounted board. Dropping it (or calling `free()` from JS) detaches every
/// listener it installed.
#[wasm_bindgen]
pub struct BoardApp {
    shared: Rc<RefCell<Shared>>,
    root: HtmlElement,
    on_down: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl BoardApp {
    /// Mount a freshly seeded board into the element with id `root_id`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no such element or the first paint fails.
    #[wasm_bindgen(constructor)]
    pub fn new(root_id: &str) -> Result<BoardApp, JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("logger already installed");
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {root_id:?}")))?
            .dyn_into::<HtmlElement>()?;

        let engine = Engine::new(root.clone(), js_sys::Date::now().to_bits());
        engine.render()?;

        let shared = Rc::new(RefCell::new(Shared { engine, listeners: None, retired: None }));
        let weak = Rc::downgrade(&shared);
        let on_down = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            dispatch(&weak, |engine| engine.on_mouse_down(&ev));
        });
        root.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;

        log::info!("board mounted into #{root_id}");
        Ok(Self { shared, root, on_down })
    }

    /// Current column order as JSON: `{"a": [ids..], "b": [ids..]}`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board is mid-update or serialization fails.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let shared = self
            .shared
            .try_borrow()
            .map_err(|_| JsValue::from_str("board is busy"))?;
        let snapshot = shared.engine.core.board().snapshot();
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Whether a drag is in progress. Reports `false` while the board is
    /// mid-update.
    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.shared
            .try_borrow()
            .map_or(false, |shared| shared.engine.core.is_dragging())
    }

    /// Abandon any drag in progress.
    pub fn cancel(&self) {
        dispatch(&Rc::downgrade(&self.shared), Engine::cancel);
    }
}

impl Drop for BoardApp {
    fn drop(&mut self) {
        if let Err(err) = self
            .root
            .remove_event_listener_with_callback("mousedown", self.on_down.as_ref().unchecked_ref())
        {
            log::warn!("failed to detach mousedown: {err:?}");
        }
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.listeners.take();
            shared.retired.take();
        }
    }
}

/// Run one event through the engine, then attach or release the drag
/// listeners to match the engine's state.
fn dispatch(shared: &Weak<RefCell<Shared>>, f: impl FnOnce(&mut Engine) -> Result<(), JsValue>) {
    let Some(strong) = shared.upgrade() else {
        return;
    };
    let Ok(mut state) = strong.try_borrow_mut() else {
        log::warn!("re-entrant board event ignored");
        return;
    };
    if let Err(err) = f(&mut state.engine) {
        log::error!("board event failed: {err:?}");
    }
    sync_listeners(&mut state, shared);
}

fn sync_listeners(state: &mut Shared, shared: &Weak<RefCell<Shared>>) {
    let dragging = state.engine.core.is_dragging();
    if dragging && state.listeners.is_none() {
        state.retired = None;
        match ListenerGuard::attach(shared) {
            Ok(guard) => state.listeners = Some(guard),
            Err(err) => {
                log::error!("failed to attach drag listeners: {err:?}");
                if let Err(err) = state.engine.cancel() {
                    log::error!("cancel after listener failure: {err:?}");
                }
            }
        }
    } else if !dragging {
        if let Some(mut guard) = state.listeners.take() {
            guard.release();
            state.retired = Some(guard);
        }
    }
}

type Handler = fn(&mut Engine, &Event) -> Result<(), JsValue>;

/// Window listeners held for the duration of one drag.
struct ListenerGuard {
    handlers: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
    released: bool,
}

impl ListenerGuard {
    fn attach(shared: &Weak<RefCell<Shared>>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let mut guard = Self { handlers: Vec::new(), released: false };

        guard.listen(&window, "mousemove", shared, |engine, ev| match ev.dyn_ref::<MouseEvent>() {
            Some(ev) => engine.on_mouse_move(ev),
            None => Ok(()),
        })?;
        guard.listen(&window, "mouseup", shared, |engine, ev| match ev.dyn_ref::<MouseEvent>() {
            Some(ev) => engine.on_mouse_up(ev),
            None => Ok(()),
        })?;
        guard.listen(&window, "blur", shared, |engine, _| engine.cancel())?;
        guard.listen(&window, "keydown", shared, |engine, ev| match ev.dyn_ref::<KeyboardEvent>() {
            Some(key) if key.key() == "Escape" => engine.cancel(),
            _ => Ok(()),
        })?;
        if let Some(html) = window.document().and_then(|d| d.document_element()) {
            guard.listen(&html, "mouseleave", shared, |engine, _| engine.cancel())?;
        }
        Ok(guard)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        shared: &Weak<RefCell<Shared>>,
        handler: Handler,
    ) -> Result<(), JsValue> {
        let shared = shared.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            dispatch(&shared, |engine| handler(engine, &ev));
        });
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.handlers.push((target.clone(), kind, closure));
        Ok(())
    }

    /// Detach every listener. The closures stay alive until the guard drops.
    fn release(&mut self) {
        if self.released {
            return;
        }
        for (target, kind, closure) in &self.handlers {
            if let Err(err) = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
                log::warn!("failed to detach {kind}: {err:?}");
            }
        }
        self.released = true;
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}
