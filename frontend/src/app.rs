//! Root component: owns the application context and switches pages.
//!
//! Pages are addressed by the URL fragment (`#/menu`, `#/admin/orders`...)
//! so a reload lands on the same page. Role-specific pages fall back to the
//! user's landing page when the signed-in account may not see them.

use std::cell::RefCell;
use std::rc::Rc;

use common::config::ClientConfig;
use common::model::user::User;
use common::store::{delivery_time, AppContext, MemoryStore};
use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::{html, Callback, Component, Context, Html};

use crate::api::ApiClient;
use crate::components::admin::orders::AdminOrdersPage;
use crate::components::admin::reservations::AdminReservationsPage;
use crate::components::auth::{LoginPage, SignupPage};
use crate::components::cart::CartPage;
use crate::components::header::Header;
use crate::components::helpers::now_ms;
use crate::components::menu::MenuPage;
use crate::components::orders::OrdersPage;
use crate::components::reservation::{CurrentReservationsPage, ReservationPage};
use crate::components::rider::RiderDashboard;
use crate::session::{Session, SharedContext};
use crate::storage::BrowserStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Menu,
    Cart,
    Orders,
    Reservation,
    CurrentReservations,
    Login,
    Signup,
    AdminOrders,
    AdminReservations,
    Rider,
}

impl Page {
    const ALL: [Page; 10] = [
        Page::Menu,
        Page::Cart,
        Page::Orders,
        Page::Reservation,
        Page::CurrentReservations,
        Page::Login,
        Page::Signup,
        Page::AdminOrders,
        Page::AdminReservations,
        Page::Rider,
    ];

    pub fn hash(&self) -> &'static str {
        match self {
            Page::Menu => "#/menu",
            Page::Cart => "#/cart",
            Page::Orders => "#/orders",
            Page::Reservation => "#/reservation",
            Page::CurrentReservations => "#/current-reservations",
            Page::Login => "#/login",
            Page::Signup => "#/signup",
            Page::AdminOrders => "#/admin/orders",
            Page::AdminReservations => "#/admin/reservations",
            Page::Rider => "#/rider",
        }
    }

    /// Unknown fragments open the menu. `#/admin` is the orders board.
    pub fn from_hash(hash: &str) -> Page {
        if hash == "#/admin" || hash == "#/admin/" {
            return Page::AdminOrders;
        }
        Page::ALL
            .into_iter()
            .find(|p| p.hash() == hash)
            .unwrap_or(Page::Menu)
    }

    /// Where an account goes after signing in.
    pub fn landing_for(user: Option<&User>) -> Page {
        match user {
            Some(u) if u.is_admin() => Page::AdminOrders,
            Some(u) if u.is_rider() => Page::Rider,
            _ => Page::Menu,
        }
    }

    /// The page actually shown when `self` is requested by `user`.
    pub fn resolve(self, user: Option<&User>) -> Page {
        let allowed = match self {
            Page::AdminOrders | Page::AdminReservations => user.is_some_and(User::is_admin),
            Page::Rider => user.is_some_and(User::is_rider),
            Page::Orders | Page::CurrentReservations => user.is_some(),
            Page::Login | Page::Signup => user.is_none(),
            Page::Menu | Page::Cart | Page::Reservation => true,
        };
        if allowed {
            self
        } else {
            Page::landing_for(user)
        }
    }
}

pub enum Msg {
    Navigate(Page),
    /// Back/forward or a typed URL changed the fragment.
    HashChanged,
    ContextChanged,
}

pub struct App {
    context: SharedContext,
    api: ApiClient,
    revision: u64,
    page: Page,
    hash_listener: Option<Closure<dyn FnMut()>>,
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

fn listen_hash_changes(on_change: Callback<()>) -> Option<Closure<dyn FnMut()>> {
    let window = web_sys::window()?;
    let closure = Closure::<dyn FnMut()>::new(move || on_change.emit(()));
    if let Err(err) =
        window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
    {
        warn!("could not watch the location hash: {err:?}");
        return None;
    }
    Some(closure)
}

fn load_context() -> AppContext<BrowserStore> {
    match AppContext::load(BrowserStore::open()) {
        Ok(context) => context,
        Err(err) => {
            error!("could not restore saved state: {err}");
            AppContext::new(BrowserStore::Memory(MemoryStore::default()))
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = Rc::new(ClientConfig::from_build_env());
        let mut context = load_context();
        match delivery_time::purge_expired(context.store_mut(), now_ms()) {
            Ok(0) => {}
            Ok(n) => info!("purged {n} stale delivery estimate(s)"),
            Err(err) => warn!("could not purge delivery estimates: {err}"),
        }
        let page = Page::from_hash(&current_hash()).resolve(context.user.as_ref());
        Self {
            context: Rc::new(RefCell::new(context)),
            api: ApiClient::new(config),
            revision: 0,
            page,
            hash_listener: listen_hash_changes(ctx.link().callback(|_| Msg::HashChanged)),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                let page = page.resolve(self.context.borrow().user.as_ref());
                if let Some(location) = web_sys::window().map(|w| w.location()) {
                    let _ = location.set_hash(page.hash());
                }
                self.page = page;
                true
            }
            Msg::HashChanged => {
                let page = Page::from_hash(&current_hash()).resolve(self.context.borrow().user.as_ref());
                if page == self.page {
                    return false;
                }
                self.page = page;
                true
            }
            Msg::ContextChanged => {
                self.revision += 1;
                // Signing in or out may make the current page unavailable.
                self.page = self.page.resolve(self.context.borrow().user.as_ref());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = Session::new(
            self.context.clone(),
            self.revision,
            self.api.clone(),
            ctx.link().callback(|_| Msg::ContextChanged),
        );
        let navigate: Callback<Page> = ctx.link().callback(Msg::Navigate);

        let content = match self.page {
            Page::Menu => html! { <MenuPage session={session.clone()} on_navigate={navigate.clone()} /> },
            Page::Cart => html! { <CartPage session={session.clone()} on_navigate={navigate.clone()} /> },
            Page::Orders => html! { <OrdersPage session={session.clone()} /> },
            Page::Reservation => html! { <ReservationPage session={session.clone()} on_navigate={navigate.clone()} /> },
            Page::CurrentReservations => html! { <CurrentReservationsPage session={session.clone()} /> },
            Page::Login => html! { <LoginPage session={session.clone()} on_navigate={navigate.clone()} /> },
            Page::Signup => html! { <SignupPage session={session.clone()} on_navigate={navigate.clone()} /> },
            Page::AdminOrders => html! { <AdminOrdersPage session={session.clone()} /> },
            Page::AdminReservations => html! { <AdminReservationsPage session={session.clone()} /> },
            Page::Rider => html! { <RiderDashboard session={session.clone()} /> },
        };

        html! {
            <div class="app-root">
                <Header session={session} page={self.page} on_navigate={navigate} />
                <main class="page">{ content }</main>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(closure), Some(window)) = (self.hash_listener.take(), web_sys::window()) {
            let _ = window
                .remove_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::user::Role;

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            name: "Yaw".into(),
            email: "yaw@example.com".into(),
            phone: None,
            role,
        }
    }

    #[test]
    fn hashes_round_trip_and_unknown_falls_back() {
        for page in Page::ALL {
            assert_eq!(Page::from_hash(page.hash()), page);
        }
        assert_eq!(Page::from_hash(""), Page::Menu);
        assert_eq!(Page::from_hash("#/nowhere"), Page::Menu);
        assert_eq!(Page::from_hash("#/admin"), Page::AdminOrders);
    }

    #[test]
    fn role_pages_are_guarded() {
        let admin = user(Role::Admin);
        let rider = user(Role::Rider);
        let customer = user(Role::User);

        assert_eq!(Page::AdminOrders.resolve(Some(&admin)), Page::AdminOrders);
        assert_eq!(Page::AdminOrders.resolve(Some(&customer)), Page::Menu);
        assert_eq!(Page::AdminOrders.resolve(Some(&rider)), Page::Rider);
        assert_eq!(Page::Rider.resolve(None), Page::Menu);
        assert_eq!(Page::Orders.resolve(None), Page::Menu);
        assert_eq!(Page::Login.resolve(Some(&admin)), Page::AdminOrders);
        assert_eq!(Page::Cart.resolve(None), Page::Cart);
    }
}
