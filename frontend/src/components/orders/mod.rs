//! "My Orders": the signed-in customer's active and finished orders.
//!
//! The lists refresh on their own poller; each active card additionally
//! polls its own order so progress shows up without waiting for the list.

mod order_card;

pub use order_card::{order_items, OrderCard};

use common::model::order::Order;
use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{ApiClient, ApiError};
use crate::polling::Poller;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct OrdersProps {
    pub session: Session,
}

pub enum Msg {
    Refresh,
    Loaded(Result<(Vec<Order>, Vec<Order>), String>),
    ShowFinished(bool),
}

pub struct OrdersPage {
    active: Vec<Order>,
    finished: Vec<Order>,
    loading: bool,
    error: Option<String>,
    show_finished: bool,
    poller: Option<Poller>,
}

/// Active and finished orders of `user_id`, fetched one after the other.
async fn fetch_lists(
    api: &ApiClient,
    user_id: &str,
) -> Result<(Vec<Order>, Vec<Order>), ApiError> {
    let active = api.fetch_user_orders(user_id).await?;
    let finished = api.fetch_user_finished_orders(user_id).await?;
    Ok((active, finished))
}

impl Component for OrdersPage {
    type Message = Msg;
    type Properties = OrdersProps;

    fn create(ctx: &Context<Self>) -> Self {
        let interval = ctx.props().session.api().config().poll.customer_order_list;
        let poller = Poller::start("customer orders", interval, ctx.link().callback(|_| Msg::Refresh));
        Self {
            active: Vec::new(),
            finished: Vec::new(),
            loading: true,
            error: None,
            show_finished: false,
            poller: Some(poller),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => {
                let Some(user_id) = ctx.props().session.user_id() else {
                    self.loading = false;
                    return true;
                };
                let api = ctx.props().session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = fetch_lists(&api, &user_id)
                        .await
                        .map_err(|err| err.user_message("Failed to load your orders."));
                    link.send_message(Msg::Loaded(result));
                });
                false
            }
            Msg::Loaded(Ok((active, finished))) => {
                self.active = active;
                self.finished = finished;
                self.loading = false;
                self.error = None;
                true
            }
            Msg::Loaded(Err(err)) => {
                warn!("orders: {err}");
                self.loading = false;
                self.error = Some(err);
                true
            }
            Msg::ShowFinished(show) => {
                self.show_finished = show;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let session = &ctx.props().session;
        let (orders, active) = if self.show_finished {
            (&self.finished, false)
        } else {
            (&self.active, true)
        };

        html! {
            <section class="orders-page">
                <div class="tab-bar">
                    <button
                        class={classes!("tab-btn", (!self.show_finished).then_some("active"))}
                        onclick={link.callback(|_| Msg::ShowFinished(false))}
                    >
                        { format!("Active ({})", self.active.len()) }
                    </button>
                    <button
                        class={classes!("tab-btn", self.show_finished.then_some("active"))}
                        onclick={link.callback(|_| Msg::ShowFinished(true))}
                    >
                        { format!("Finished ({})", self.finished.len()) }
                    </button>
                </div>
                {
                    if self.loading {
                        html! { <p class="loading">{ "Loading orders..." }</p> }
                    } else if let Some(error) = &self.error {
                        html! { <p class="error">{ error }</p> }
                    } else if orders.is_empty() {
                        html! { <p class="empty">{ if active { "No active orders." } else { "No finished orders yet." } }</p> }
                    } else {
                        html! {
                            { for orders.iter().map(|order| html! {
                                <OrderCard
                                    key={order.id.clone()}
                                    session={session.clone()}
                                    order={order.clone()}
                                    active={active}
                                    on_changed={link.callback(|_| Msg::Refresh)}
                                />
                            }) }
                        }
                    }
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
