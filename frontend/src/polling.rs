//! Browser binding of [`PollSchedule`].
//!
//! A [`Poller`] owns the interval timer and a `visibilitychange` listener on
//! the document and feeds both into the schedule. Dropping the poller stops
//! it, so a component only has to keep it in its state and let it go in
//! `destroy`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use common::polling::{PollAction, PollSchedule};
use gloo_timers::callback::Interval;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::Callback;

const VISIBILITY_EVENT: &str = "visibilitychange";

struct Inner {
    schedule: PollSchedule,
    timer: Option<Interval>,
    on_fetch: Callback<()>,
}

pub struct Poller {
    inner: Rc<RefCell<Inner>>,
    listener: Option<Closure<dyn FnMut()>>,
}

fn page_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.hidden())
        .unwrap_or(false)
}

fn arm(inner: &Rc<RefCell<Inner>>) {
    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    let millis = u32::try_from(inner.borrow().schedule.interval().as_millis()).unwrap_or(u32::MAX);
    let interval = Interval::new(millis, move || {
        if let Some(inner) = weak.upgrade() {
            let action = inner.borrow_mut().schedule.tick();
            apply(&inner, action);
        }
    });
    inner.borrow_mut().timer = Some(interval);
}

/// Carries out an action. The fetch callback runs after every borrow is
/// released so it may re-enter the poller.
fn apply(inner: &Rc<RefCell<Inner>>, action: PollAction) {
    match action.timer {
        Some(true) => arm(inner),
        Some(false) => {
            let timer = inner.borrow_mut().timer.take();
            drop(timer);
        }
        None => {}
    }
    if action.fetch {
        let on_fetch = inner.borrow().on_fetch.clone();
        on_fetch.emit(());
    }
}

impl Poller {
    /// Starts polling right away: `on_fetch` is called once immediately and
    /// then every `interval` while the page is visible.
    pub fn start(name: &'static str, interval: Duration, on_fetch: Callback<()>) -> Self {
        let inner = Rc::new(RefCell::new(Inner {
            schedule: PollSchedule::new(name, interval),
            timer: None,
            on_fetch,
        }));

        let listener = Self::listen_visibility(&inner);
        let action = inner.borrow_mut().schedule.start(page_hidden());
        apply(&inner, action);

        Self { inner, listener }
    }

    fn listen_visibility(inner: &Rc<RefCell<Inner>>) -> Option<Closure<dyn FnMut()>> {
        let document = web_sys::window()?.document()?;
        let weak = Rc::downgrade(inner);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(inner) = weak.upgrade() {
                let action = inner.borrow_mut().schedule.visibility_changed(page_hidden());
                apply(&inner, action);
            }
        });
        if let Err(err) = document
            .add_event_listener_with_callback(VISIBILITY_EVENT, closure.as_ref().unchecked_ref())
        {
            warn!("could not watch page visibility: {err:?}");
            return None;
        }
        Some(closure)
    }

    pub fn stop(&mut self) {
        let action = self.inner.borrow_mut().schedule.stop();
        apply(&self.inner, action);
        self.inner.borrow_mut().timer = None;
        if let Some(closure) = self.listener.take() {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    VISIBILITY_EVENT,
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
