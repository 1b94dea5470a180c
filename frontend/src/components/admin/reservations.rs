//! Admin view of every table booking, with status changes.

use common::model::reservation::{count_with_status, Reservation, ReservationStatus, ADMIN_FILTERS};
use log::{debug, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::helpers::show_toast;
use crate::polling::Poller;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminReservationsProps {
    pub session: Session,
}

pub enum Msg {
    Refresh,
    Loaded(Result<Vec<Reservation>, String>),
    Filter(Option<ReservationStatus>),
    SetStatus(String, ReservationStatus),
    StatusSaved(String, ReservationStatus, Result<(), String>),
}

pub struct AdminReservationsPage {
    reservations: Vec<Reservation>,
    filter: Option<ReservationStatus>,
    loading: bool,
    error: Option<String>,
    /// Booking whose status change is in flight.
    updating: Option<String>,
    poller: Option<Poller>,
}

fn filter_label(filter: Option<ReservationStatus>) -> &'static str {
    match filter {
        None => "All",
        Some(ReservationStatus::Pending) => "Pending",
        Some(ReservationStatus::Confirmed) => "Confirmed",
        Some(ReservationStatus::Cancelled) => "Cancelled",
        Some(ReservationStatus::Completed) => "Completed",
    }
}

fn transition_label(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Confirmed => "Confirm",
        ReservationStatus::Cancelled => "Cancel",
        ReservationStatus::Completed => "Mark Completed",
        ReservationStatus::Pending => "Reopen",
    }
}

impl AdminReservationsPage {
    fn visible(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.reservations
            .iter()
            .filter(|r| self.filter.is_none_or(|status| r.status == status))
    }

    fn card(&self, ctx: &Context<Self>, reservation: &Reservation) -> Html {
        let updating = self.updating.as_deref() == Some(reservation.id.as_str());
        let seating = if reservation.whole_restaurant {
            "Whole restaurant".to_string()
        } else {
            format!(
                "{} table(s) × {} chairs",
                reservation.number_of_tables, reservation.chairs_per_table
            )
        };
        html! {
            <div class="reservation-card" key={reservation.id.clone()}>
                <div class="reservation-header">
                    <h3>{ &reservation.customer_name }</h3>
                    <span class={classes!("status-badge", reservation.status.as_str())}>
                        { reservation.status.as_str() }
                    </span>
                </div>
                <p>{ format!("{} at {}", reservation.reservation_date, reservation.reservation_time) }</p>
                <p>{ format!("{seating}, {} guests", reservation.total_guests) }</p>
                <p>
                    <a href={format!("tel:{}", reservation.customer_phone)}>{ &reservation.customer_phone }</a>
                    { " · " }
                    <a href={format!("mailto:{}", reservation.customer_email)}>{ &reservation.customer_email }</a>
                </p>
                if !reservation.special_requests.is_empty() {
                    <p class="special-requests">{ &reservation.special_requests }</p>
                }
                <div class="reservation-actions">
                    { for reservation.status.admin_transitions().iter().map(|next| {
                        let id = reservation.id.clone();
                        let next = *next;
                        html! {
                            <button
                                class={classes!("status-btn", next.as_str())}
                                disabled={updating}
                                onclick={ctx.link().callback(move |_| Msg::SetStatus(id.clone(), next))}
                            >
                                { transition_label(next) }
                            </button>
                        }
                    }) }
                    if updating {
                        <span class="updating">{ "Updating..." }</span>
                    }
                </div>
            </div>
        }
    }
}

impl Component for AdminReservationsPage {
    type Message = Msg;
    type Properties = AdminReservationsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let interval = ctx.props().session.api().config().poll.admin_reservations;
        Self {
            reservations: Vec::new(),
            filter: None,
            loading: true,
            error: None,
            updating: None,
            poller: Some(Poller::start(
                "admin reservations",
                interval,
                ctx.link().callback(|_| Msg::Refresh),
            )),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let api = ctx.props().session.api();
        match msg {
            Msg::Refresh => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .fetch_admin_reservations()
                        .await
                        .map_err(|err| err.user_message("Error loading reservations"));
                    link.send_message(Msg::Loaded(result));
                });
                false
            }
            Msg::Loaded(Ok(reservations)) => {
                debug!("{} reservation(s)", reservations.len());
                self.reservations = reservations;
                self.loading = false;
                self.error = None;
                true
            }
            Msg::Loaded(Err(err)) => {
                warn!("admin reservations: {err}");
                self.loading = false;
                self.error = Some(err);
                true
            }
            Msg::Filter(filter) => {
                self.filter = filter;
                true
            }
            Msg::SetStatus(id, status) => {
                if self.updating.is_some() {
                    return false;
                }
                self.updating = Some(id.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .update_reservation_status(&id, status)
                        .await
                        .map_err(|err| err.user_message("Failed to update reservation status"));
                    link.send_message(Msg::StatusSaved(id, status, result));
                });
                true
            }
            Msg::StatusSaved(id, status, result) => {
                self.updating = None;
                match result {
                    Ok(()) => {
                        if let Some(reservation) = self.reservations.iter_mut().find(|r| r.id == id) {
                            reservation.status = status;
                        }
                    }
                    Err(err) => {
                        warn!("reservation {id}: {err}");
                        show_toast(&format!("Failed to update reservation status: {err}"));
                    }
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
            html! {
                <div class="error-panel">
                    <p>{ error }</p>
                    <button onclick={link.callback(|_| Msg::Refresh)}>{ "Retry" }</button>
                </div>
            }
        } else {
            let cards = self.visible().map(|r| self.card(ctx, r)).collect::<Vec<_>>();
            if cards.is_empty() {
                html! { <p class="empty">{ "No reservations found." }</p> }
            } else {
                html! { <div class="reservation-list">{ for cards }</div> }
            }
        };

        html! {
            <section class="admin-reservations">
                <h1>{ "Reservations" }</h1>
                <div class="tab-bar">
                    { for ADMIN_FILTERS.into_iter().map(|filter| html! {
                        <button
                            class={classes!("tab-btn", (self.filter == filter).then_some("active"))}
                            onclick={link.callback(move |_| Msg::Filter(filter))}
                        >
                            { filter_label(filter) }
                        </button>
                    }) }
                    <button class="tab-btn" onclick={link.callback(|_| Msg::Refresh)}>{ "Refresh" }</button>
                </div>
                { body }
                if !self.reservations.is_empty() {
                    <div class="reservation-stats">
                        <div><strong>{ self.reservations.len() }</strong>{ " Total Reservations" }</div>
                        <div><strong>{ count_with_status(&self.reservations, ReservationStatus::Pending) }</strong>{ " Pending" }</div>
                        <div><strong>{ count_with_status(&self.reservations, ReservationStatus::Confirmed) }</strong>{ " Confirmed" }</div>
                        <div><strong>{ count_with_status(&self.reservations, ReservationStatus::Completed) }</strong>{ " Completed" }</div>
                    </div>
                }
            </section>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }
}
