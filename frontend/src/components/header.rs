//! Top navigation bar.
//!
//! Shows the links the signed-in role can use, a cart badge and a badge
//! with the user's active reservations, fetched whenever the signed-in user
//! or the page changes.

use common::model::reservation::active_only;
use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::Page;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub session: Session,
    pub page: Page,
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    ReservationsCounted(usize),
    SignOut,
}

pub struct Header {
    active_reservations: usize,
    counted_for: Option<String>,
}

impl Header {
    fn count_reservations(&mut self, ctx: &Context<Self>, force: bool) {
        let user_id = ctx.props().session.user_id();
        if user_id == self.counted_for && !force {
            return;
        }
        self.counted_for = user_id.clone();
        let Some(user_id) = user_id else {
            self.active_reservations = 0;
            return;
        };
        let api = ctx.props().session.api();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.fetch_user_reservations(&user_id).await {
                Ok(list) => link.send_message(Msg::ReservationsCounted(active_only(list).len())),
                Err(err) => warn!("counting reservations: {err}"),
            }
        });
    }
}

fn nav_link(label: &'static str, target: Page, current: Page, on_navigate: &Callback<Page>) -> Html {
    let on_navigate = on_navigate.clone();
    html! {
        <button
            class={classes!("nav-link", (target == current).then_some("active"))}
            onclick={Callback::from(move |_| on_navigate.emit(target))}
        >
            { label }
        </button>
    }
}

impl Component for Header {
    type Message = Msg;
    type Properties = HeaderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut header = Self {
            active_reservations: 0,
            counted_for: None,
        };
        header.count_reservations(ctx, true);
        header
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.count_reservations(ctx, ctx.props().page != old_props.page);
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ReservationsCounted(count) => {
                self.active_reservations = count;
                true
            }
            Msg::SignOut => {
                ctx.props().session.sign_out();
                ctx.props().on_navigate.emit(Page::Menu);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let user = props.session.user();
        let page = props.page;
        let nav = &props.on_navigate;
        let cart_lines = props.session.cart().lines().len();

        let links = match &user {
            Some(u) if u.is_admin() => html! {
                <>
                    { nav_link("Orders", Page::AdminOrders, page, nav) }
                    { nav_link("Reservations", Page::AdminReservations, page, nav) }
                    { nav_link("Menu", Page::Menu, page, nav) }
                </>
            },
            Some(u) if u.is_rider() => html! {
                { nav_link("Deliveries", Page::Rider, page, nav) }
            },
            Some(_) => html! {
                <>
                    { nav_link("Menu", Page::Menu, page, nav) }
                    { nav_link("Reserve a Table", Page::Reservation, page, nav) }
                    { nav_link("My Orders", Page::Orders, page, nav) }
                </>
            },
            None => html! {
                <>
                    { nav_link("Menu", Page::Menu, page, nav) }
                    { nav_link("Reserve a Table", Page::Reservation, page, nav) }
                </>
            },
        };

        html! {
            <header class="app-header">
                <span class="brand">{ "Restaurant" }</span>
                <nav class="nav-links">{ links }</nav>
                <div class="nav-badges">
                    if user.is_some() && self.active_reservations > 0 {
                        <button class="badge reservations" onclick={{
                            let nav = nav.clone();
                            Callback::from(move |_| nav.emit(Page::CurrentReservations))
                        }}>
                            { "Reservations " }<span class="count">{ self.active_reservations }</span>
                        </button>
                    }
                    if user.is_some() && cart_lines > 0 && page != Page::Cart {
                        <button class="badge cart" onclick={{
                            let nav = nav.clone();
                            Callback::from(move |_| nav.emit(Page::Cart))
                        }}>
                            { "Cart " }<span class="count">{ cart_lines }</span>
                        </button>
                    }
                    {
                        match &user {
                            Some(u) => html! {
                                <div class="account">
                                    <span class="account-name">{ &u.name }</span>
                                    <button class="sign-out" onclick={ctx.link().callback(|_| Msg::SignOut)}>
                                        { "Log out" }
                                    </button>
                                </div>
                            },
                            None => html! {
                                <>
                                    { nav_link("Log in", Page::Login, page, nav) }
                                    { nav_link("Sign up", Page::Signup, page, nav) }
                                </>
                            },
                        }
                    }
                </div>
            </header>
        }
    }
}
