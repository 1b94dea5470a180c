//! The signed-in customer's upcoming bookings.

use common::model::reservation::{active_only, Reservation};
use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::helpers::{confirm, now_local, show_toast};
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct CurrentReservationsProps {
    pub session: Session,
}

pub enum Msg {
    Load,
    Loaded(Result<Vec<Reservation>, String>),
    Cancel(String),
    Cancelled(String, Result<(), String>),
}

pub struct CurrentReservationsPage {
    reservations: Vec<Reservation>,
    loading: bool,
    error: Option<String>,
    cancelling: Option<String>,
    /// User whose bookings are shown; a new sign-in reloads.
    loaded_for: Option<String>,
}

impl Component for CurrentReservationsPage {
    type Message = Msg;
    type Properties = CurrentReservationsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            reservations: Vec::new(),
            loading: true,
            error: None,
            cancelling: None,
            loaded_for: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let session = &ctx.props().session;
        match msg {
            Msg::Load => {
                let Some(user_id) = session.user_id() else {
                    self.loading = false;
                    return true;
                };
                let api = session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .fetch_user_reservations(&user_id)
                        .await
                        .map(active_only)
                        .map_err(|err| err.user_message("Failed to load your reservations."));
                    link.send_message(Msg::Loaded(result));
                });
                false
            }
            Msg::Loaded(Ok(reservations)) => {
                self.reservations = reservations;
                self.loading = false;
                self.error = None;
                true
            }
            Msg::Loaded(Err(err)) => {
                warn!("reservations: {err}");
                self.loading = false;
                self.error = Some(err);
                true
            }
            Msg::Cancel(id) => {
                let Some(reservation) = self.reservations.iter().find(|r| r.id == id) else {
                    return false;
                };
                if !reservation.can_cancel(now_local()) {
                    show_toast("Cannot cancel reservation less than 1 hour before the scheduled time.");
                    return false;
                }
                let question = format!(
                    "Are you sure you want to cancel your reservation for {} at {}?",
                    reservation.reservation_date, reservation.reservation_time
                );
                if !confirm(&question) {
                    return false;
                }
                self.cancelling = Some(id.clone());
                let api = session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .cancel_reservation(&id)
                        .await
                        .map_err(|err| err.user_message("Failed to cancel reservation. Please try again."));
                    link.send_message(Msg::Cancelled(id, result));
                });
                true
            }
            Msg::Cancelled(id, result) => {
                self.cancelling = None;
                match result {
                    Ok(()) => {
                        self.reservations.retain(|r| r.id != id);
                        show_toast("Reservation cancelled successfully!");
                    }
                    Err(err) => show_toast(&err),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let body = if self.loading {
            html! { <p class="loading">{ "Loading reservations..." }</p> }
        } else if let Some(error) = &self.error {
            html! { <p class="error">{ error }</p> }
        } else if self.reservations.is_empty() {
            html! { <p class="empty">{ "You have no upcoming reservations." }</p> }
        } else {
            self.reservations
                .iter()
                .map(|r| {
                    let id = r.id.clone();
                    let cancelling = self.cancelling.as_deref() == Some(r.id.as_str());
                    html! {
                        <div class="reservation-card" key={r.id.clone()}>
                            <div class="reservation-header">
                                <h3>{ format!("{} at {}", r.reservation_date, r.reservation_time) }</h3>
                                <span class={classes!("status-badge", r.status.as_str())}>{ r.status.as_str() }</span>
                            </div>
                            <p>{ format!("{} guests", r.total_guests) }</p>
                            if !r.special_requests.is_empty() {
                                <p class="special-requests">{ &r.special_requests }</p>
                            }
                            <button
                                class="danger"
                                disabled={self.cancelling.is_some()}
                                onclick={link.callback(move |_| Msg::Cancel(id.clone()))}
                            >
                                { if cancelling { "Cancelling..." } else { "Cancel Reservation" } }
                            </button>
                        </div>
                    }
                })
                .collect::<Html>()
        };

        html! {
            <section class="current-reservations">
                <h1>{ "My Reservations" }</h1>
                { body }
            </section>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        let user_id = ctx.props().session.user_id();
        if first_render || self.loaded_for != user_id {
            self.loaded_for = user_id;
            ctx.link().send_message(Msg::Load);
        }
    }
}
