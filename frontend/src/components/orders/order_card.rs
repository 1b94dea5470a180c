//! One order as the customer sees it: details, progress and the
//! confirm-receipt / cancel actions.

use common::model::order::Order;
use common::progress::{classify_order, FulfillmentStep, StepSource};
use common::store::delivery_time::{self, PREPARATION_MINUTES};
use log::{debug, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::helpers::{confirm, now_ms, show_toast};
use crate::components::progress_tracker::progress_tracker;
use crate::polling::Poller;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct OrderCardProps {
    pub session: Session,
    pub order: Order,
    /// Active orders poll for progress and offer actions.
    pub active: bool,
    /// Asks the list to refresh after an action.
    pub on_changed: Callback<()>,
}

pub enum Msg {
    Poll,
    Fetched(Order),
    EstimateReady(u32),
    ConfirmReceived,
    Cancel,
    ActionDone(Result<&'static str, String>),
}

pub struct OrderCard {
    current: Order,
    estimate: Option<u32>,
    poller: Option<Poller>,
    busy: bool,
}

/// Item list shared by every order card.
pub fn order_items(order: &Order) -> Html {
    html! {
        <ul class="order-items">
            { for order.items.iter().map(|item| {
                let accompaniments = item
                    .accompaniments
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                html! {
                    <li class="order-item">
                        <span class="name">{ &item.menu_item.name }</span>
                        if !accompaniments.is_empty() {
                            <span class="accompaniments">{ format!(" with {accompaniments}") }</span>
                        }
                        <span class="quantity">{ format!("× {}", item.quantity) }</span>
                        if let Some(note) = &item.special_note {
                            <p class="note">{ format!("Note: {note}") }</p>
                        }
                    </li>
                }
            }) }
        </ul>
    }
}

impl OrderCard {
    fn load_estimate(&mut self, ctx: &Context<Self>) {
        let order = &self.current;
        let scheduled = order.schedule.as_ref().is_some_and(|s| s.is_scheduled);
        if !order.is_delivery() || scheduled {
            return;
        }
        let session = &ctx.props().session;
        match session.with_store(|store| delivery_time::get(store, &order.id)) {
            Ok(Some(minutes)) => {
                debug!("order {}: cached estimate {minutes} min", order.id);
                self.estimate = Some(minutes);
                return;
            }
            Ok(None) => {}
            Err(err) => warn!("reading delivery estimate: {err}"),
        }

        let destination = (order.location.lat, order.location.lon);
        if destination == (0.0, 0.0) {
            return;
        }
        let api = session.api();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.drive_minutes(destination).await {
                Ok(Some(minutes)) => link.send_message(Msg::EstimateReady(minutes)),
                Ok(None) => {}
                Err(err) => warn!("delivery estimate: {err}"),
            }
        });
    }
}

impl Component for OrderCard {
    type Message = Msg;
    type Properties = OrderCardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let poller = props.active.then(|| {
            Poller::start(
                "customer order",
                props.session.api().config().poll.customer_order,
                ctx.link().callback(|_| Msg::Poll),
            )
        });
        let mut card = Self {
            current: props.order.clone(),
            estimate: None,
            poller,
            busy: false,
        };
        card.load_estimate(ctx);
        card
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().order != old_props.order {
            self.current = ctx.props().order.clone();
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let session = &ctx.props().session;
        match msg {
            Msg::Poll => {
                let api = session.api();
                let link = ctx.link().clone();
                let order_id = self.current.id.clone();
                spawn_local(async move {
                    match api.fetch_order(&order_id).await {
                        Ok(order) => link.send_message(Msg::Fetched(order)),
                        Err(err) => warn!("polling order {order_id}: {err}"),
                    }
                });
                false
            }
            Msg::Fetched(order) => {
                let changed = order != self.current;
                self.current = order;
                changed
            }
            Msg::EstimateReady(minutes) => {
                let order_id = self.current.id.clone();
                if let Err(err) =
                    session.with_store(|store| delivery_time::put(store, &order_id, minutes, now_ms()))
                {
                    warn!("caching delivery estimate: {err}");
                }
                self.estimate = Some(minutes);
                true
            }
            Msg::ConfirmReceived => {
                self.busy = true;
                let api = session.api();
                let link = ctx.link().clone();
                let order_id = self.current.id.clone();
                spawn_local(async move {
                    let result = api
                        .mark_order_finished(&order_id)
                        .await
                        .map(|_| "Thanks! Enjoy your meal.")
                        .map_err(|err| err.user_message("Failed to confirm receipt."));
                    link.send_message(Msg::ActionDone(result));
                });
                true
            }
            Msg::Cancel => {
                if !confirm("Are you sure you want to cancel this order? This action cannot be undone.") {
                    return false;
                }
                self.busy = true;
                let api = session.api();
                let link = ctx.link().clone();
                let order_id = self.current.id.clone();
                spawn_local(async move {
                    let result = api
                        .cancel_order(&order_id)
                        .await
                        .map(|_| "Order cancelled successfully.")
                        .map_err(|err| err.user_message("Failed to cancel order. Please try again."));
                    link.send_message(Msg::ActionDone(result));
                });
                true
            }
            Msg::ActionDone(result) => {
                self.busy = false;
                match result {
                    Ok(message) => {
                        show_toast(message);
                        if let Some(mut poller) = self.poller.take() {
                            poller.stop();
                        }
                        ctx.props().on_changed.emit(());
                    }
                    Err(err) => show_toast(&err),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let order = &self.current;
        let steps = classify_order(order);
        let scheduled_for = order
            .schedule
            .as_ref()
            .filter(|s| s.is_scheduled)
            .map(|s| s.scheduled_for.clone());

        html! {
            <div class="order-card">
                <div class="order-details">
                    <h3>{ "Order Details" }</h3>
                    <p><span class="field">{ "Contact: " }</span>{ &order.contact }</p>
                    <p>
                        <span class="field">{ "Address: " }</span>
                        { if order.location.name.is_empty() { "Address not available" } else { order.location.name.as_str() } }
                    </p>
                    if order.is_delivery() {
                        <p>
                            <span class="field">{ "Assigned Rider: " }</span>
                            { order.rider_id.as_ref().map_or("Not Assigned", |r| r.name.as_str()) }
                        </p>
                        <p>
                            <span class="field">
                                { if scheduled_for.is_some() { "Scheduled For: " } else { "Estimated Delivery Time: " } }
                            </span>
                            {
                                match (&scheduled_for, self.estimate) {
                                    (Some(when), _) => when.clone(),
                                    (None, Some(minutes)) => format!("{} mins", minutes + PREPARATION_MINUTES),
                                    (None, None) => "Calculating...".to_string(),
                                }
                            }
                        </p>
                        if let Some(rider) = order.rider_id.as_ref().filter(|r| !r.phone.is_empty()) {
                            <div class="rider-contact">
                                <a href={format!("tel:{}", rider.phone)}>{ "Call" }</a>
                                <a href={format!("https://wa.me/{}", rider.phone)} target="_blank" rel="noopener noreferrer">
                                    { "WhatsApp" }
                                </a>
                            </div>
                        }
                    } else {
                        <p><span class="field">{ "Order Type: " }</span>{ "Pick Up" }</p>
                        if let Some(when) = &scheduled_for {
                            <p><span class="field">{ "Scheduled For: " }</span>{ when }</p>
                        }
                    }
                </div>

                <h4>{ "Order Items:" }</h4>
                { order_items(order) }

                <h4>{ "Order Progress" }</h4>
                if !order.is_set(FulfillmentStep::Confirmed) {
                    <p class="notice">{ "We would contact you to confirm your order" }</p>
                }
                { progress_tracker(&steps, order.latest_message()) }

                if ctx.props().active {
                    <div class="order-actions">
                        if order.is_set(FulfillmentStep::OutForDelivery) {
                            <button disabled={self.busy} onclick={link.callback(|_| Msg::ConfirmReceived)}>
                                { "Confirm Order Received" }
                            </button>
                        }
                        if !order.is_set(FulfillmentStep::Confirmed) {
                            <button class="danger" disabled={self.busy} onclick={link.callback(|_| Msg::Cancel)}>
                                { "Cancel Order" }
                            </button>
                        }
                    </div>
                }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }
}
