//! The application context as seen by components.
//!
//! `App` owns the one [`AppContext`] and hands every page a [`Session`]
//! prop. Mutations go through the session, which saves the touched part of
//! the context and tells `App` to re-render with a bumped revision, so
//! props comparison notices the change.

use std::cell::RefCell;
use std::rc::Rc;

use common::cart::Cart;
use common::model::order::Location;
use common::model::user::User;
use common::store::AppContext;
use log::error;
use yew::Callback;

use crate::api::ApiClient;
use crate::components::helpers::show_toast;
use crate::storage::BrowserStore;

pub type SharedContext = Rc<RefCell<AppContext<BrowserStore>>>;

#[derive(Clone)]
pub struct Session {
    context: SharedContext,
    revision: u64,
    api: ApiClient,
    on_change: Callback<()>,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.context, &other.context)
            && self.revision == other.revision
            && self.api == other.api
    }
}

impl Session {
    pub fn new(
        context: SharedContext,
        revision: u64,
        api: ApiClient,
        on_change: Callback<()>,
    ) -> Self {
        let token = context.borrow().token.clone();
        Self {
            api: api.with_token(token.as_deref()),
            context,
            revision,
            on_change,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.context.borrow().user.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.context.borrow().user.as_ref().map(|u| u.id.clone())
    }

    pub fn cart(&self) -> Cart {
        self.context.borrow().cart.clone()
    }

    pub fn location(&self) -> Location {
        self.context.borrow().location.clone()
    }

    /// Runs `f` on the cart, persists it and re-renders.
    pub fn update_cart<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let result = {
            let mut context = self.context.borrow_mut();
            let result = f(&mut context.cart);
            if let Err(err) = context.save_cart() {
                error!("saving cart: {err}");
            }
            result
        };
        self.on_change.emit(());
        result
    }

    pub fn set_location(&self, location: Location) {
        {
            let mut context = self.context.borrow_mut();
            context.location = location;
            if let Err(err) = context.save_location() {
                error!("saving location: {err}");
            }
        }
        self.on_change.emit(());
    }

    pub fn sign_in(&self, user: User, token: Option<String>) {
        let result = self.context.borrow_mut().sign_in(user, token);
        if let Err(err) = result {
            error!("saving session: {err}");
            show_toast("Signed in, but the session could not be saved.");
        }
        self.on_change.emit(());
    }

    pub fn sign_out(&self) {
        let result = self.context.borrow_mut().sign_out();
        if let Err(err) = result {
            error!("clearing session: {err}");
        }
        self.on_change.emit(());
    }

    /// Runs `f` against the underlying store, for the caches that live
    /// next to the context.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut BrowserStore) -> R) -> R {
        f(self.context.borrow_mut().store_mut())
    }
}
