//! Rider dashboard: deliveries assigned to the signed-in rider.

use common::model::order::Order;
use common::progress::{classify_steps, rider_steps};
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{ApiClient, ApiError};
use crate::components::helpers::show_toast;
use crate::components::orders::order_items;
use crate::components::progress_tracker::progress_tracker;
use crate::polling::Poller;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct RiderProps {
    pub session: Session,
}

pub enum Msg {
    Refresh,
    Loaded(Result<(Vec<Order>, Vec<Order>), String>),
    ShowFinished(bool),
    ConfirmDelivery(String),
    Confirmed(Result<(), String>),
}

pub struct RiderDashboard {
    current: Vec<Order>,
    finished: Vec<Order>,
    show_finished: bool,
    confirming: Option<String>,
    poller: Option<Poller>,
}

async fn fetch_deliveries(
    api: &ApiClient,
    rider_id: &str,
) -> Result<(Vec<Order>, Vec<Order>), ApiError> {
    let current = api.fetch_rider_current_orders(rider_id).await?;
    let finished = api.fetch_rider_finished_orders(rider_id).await?;
    Ok((current, finished))
}

impl RiderDashboard {
    fn card(&self, ctx: &Context<Self>, order: &Order, active: bool) -> Html {
        let steps = classify_steps(order, &rider_steps());
        let customer = order
            .user_id
            .as_ref()
            .map_or(order.user_name.as_str(), |c| c.name.as_str());
        let order_id = order.id.clone();
        let confirming = self.confirming.is_some();
        html! {
            <div class="rider-card" key={order.id.clone()}>
                <div class="order-details">
                    <h3>{ customer }</h3>
                    <p><span class="field">{ "Address: " }</span>{ &order.location.name }</p>
                    <p>
                        <span class="field">{ "Contact: " }</span>
                        <a href={format!("tel:{}", order.contact)}>{ &order.contact }</a>
                    </p>
                    if order.location.lat != 0.0 || order.location.lon != 0.0 {
                        <a
                            class="directions"
                            href={format!(
                                "https://www.google.com/maps/dir/?api=1&destination={},{}",
                                order.location.lat, order.location.lon
                            )}
                            target="_blank"
                            rel="noopener noreferrer"
                        >
                            { "Directions" }
                        </a>
                    }
                </div>
                { order_items(order) }
                { progress_tracker(&steps, None) }
                if active {
                    <button
                        disabled={confirming}
                        onclick={ctx.link().callback(move |_| Msg::ConfirmDelivery(order_id.clone()))}
                    >
                        { "Confirm Delivery" }
                    </button>
                }
            </div>
        }
    }
}

impl Component for RiderDashboard {
    type Message = Msg;
    type Properties = RiderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let interval = ctx.props().session.api().config().poll.rider_dashboard;
        Self {
            current: Vec::new(),
            finished: Vec::new(),
            show_finished: false,
            confirming: None,
            poller: Some(Poller::start(
                "rider dashboard",
                interval,
                ctx.link().callback(|_| Msg::Refresh),
            )),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let session = &ctx.props().session;
        match msg {
            Msg::Refresh => {
                let Some(rider_id) = session.user().filter(|u| u.is_rider()).map(|u| u.id) else {
                    return false;
                };
                let api = session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = fetch_deliveries(&api, &rider_id)
                        .await
                        .map_err(|err| err.user_message("Failed to fetch rider orders"));
                    link.send_message(Msg::Loaded(result));
                });
                false
            }
            Msg::Loaded(Ok((current, finished))) => {
                self.current = current;
                self.finished = finished;
                true
            }
            Msg::Loaded(Err(err)) => {
                warn!("rider orders: {err}");
                self.current.clear();
                self.finished.clear();
                true
            }
            Msg::ShowFinished(show) => {
                self.show_finished = show;
                true
            }
            Msg::ConfirmDelivery(order_id) => {
                if self.confirming.is_some() {
                    return false;
                }
                info!("confirming delivery of {order_id}");
                self.confirming = Some(order_id.clone());
                let api = session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .confirm_delivery(&order_id)
                        .await
                        .map_err(|err| err.user_message("Failed to confirm delivery."));
                    link.send_message(Msg::Confirmed(result));
                });
                true
            }
            Msg::Confirmed(result) => {
                self.confirming = None;
                match result {
                    Ok(()) => {
                        show_toast("Delivery confirmed! This order will be moved to finished deliveries.");
                        ctx.link().send_message(Msg::Refresh);
                    }
                    Err(err) => show_toast(&err),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let (orders, active, empty) = if self.show_finished {
            (&self.finished, false, "No finished deliveries yet.")
        } else {
            (&self.current, true, "No current orders assigned.")
        };
        html! {
            <section class="rider-dashboard">
                <div class="tab-bar">
                    <button
                        class={classes!("tab-btn", (!self.show_finished).then_some("active"))}
                        onclick={link.callback(|_| Msg::ShowFinished(false))}
                    >
                        { "Current Orders" }
                    </button>
                    <button
                        class={classes!("tab-btn", self.show_finished.then_some("active"))}
                        onclick={link.callback(|_| Msg::ShowFinished(true))}
                    >
                        { "Finished Deliveries" }
                    </button>
                </div>
                if orders.is_empty() {
                    <p class="empty">{ empty }</p>
                } else {
                    { for orders.iter().map(|order| self.card(ctx, order, active)) }
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
