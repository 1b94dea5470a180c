//! View rendering for the admin orders board.

use common::model::order::Order;
use common::progress::actions::action_buttons;
use common::progress::classify_order;
use yew::prelude::*;

use crate::components::helpers::select_value;
use crate::components::orders::order_items;
use crate::components::progress_tracker::progress_tracker;

use super::messages::Msg;
use super::state::{AdminOrdersPage, AdminTab};

pub fn view(page: &AdminOrdersPage, ctx: &Context<AdminOrdersPage>) -> Html {
    let link = ctx.link();
    let tab_button = |tab: AdminTab, label: &'static str| {
        html! {
            <button
                class={classes!("tab-btn", (page.tab == tab).then_some("active"))}
                onclick={link.callback(move |_| Msg::ShowTab(tab))}
            >
                { label }
            </button>
        }
    };

    let body = if page.loading {
        html! { <p class="loading">{ "Loading orders..." }</p> }
    } else if let Some(error) = &page.error {
        html! {
            <div class="error-panel">
                <p>{ error }</p>
                <button onclick={link.callback(|_| Msg::Refresh)}>{ "Retry" }</button>
            </div>
        }
    } else {
        let (orders, empty) = match page.tab {
            AdminTab::Active => (&page.active, "No current orders found."),
            AdminTab::Finished => (&page.finished, "No finished orders found."),
        };
        if orders.is_empty() {
            html! { <p class="empty">{ empty }</p> }
        } else {
            orders.iter().map(|order| order_card(page, ctx, order)).collect::<Html>()
        }
    };

    html! {
        <section class="admin-orders">
            <h1>{ "Orders" }</h1>
            <div class="tab-bar">
                { tab_button(AdminTab::Active, "Active Orders") }
                { tab_button(AdminTab::Finished, "Finished Orders") }
            </div>
            { body }
        </section>
    }
}

fn customer_name(order: &Order) -> &str {
    match &order.user_id {
        Some(customer) if !customer.name.is_empty() => &customer.name,
        _ => &order.user_name,
    }
}

fn order_card(page: &AdminOrdersPage, ctx: &Context<AdminOrdersPage>, order: &Order) -> Html {
    let link = ctx.link();
    let active = page.tab == AdminTab::Active;
    let busy = page.is_busy(&order.id);
    let method = order.delivery_method();
    let scheduled_for = order
        .schedule
        .as_ref()
        .filter(|s| s.is_scheduled)
        .map(|s| s.scheduled_for.clone());

    let buttons = action_buttons(method)
        .iter()
        .map(|button| {
            let resolved = button.resolve(order);
            let order_id = order.id.clone();
            let step = resolved.step;
            html! {
                <button
                    class={classes!("status-btn", resolved.completed.then_some("completed"))}
                    title={resolved.tooltip}
                    disabled={busy || !resolved.enabled}
                    onclick={link.callback(move |_| Msg::ToggleStep { order_id: order_id.clone(), step })}
                >
                    { resolved.text }
                </button>
            }
        })
        .collect::<Html>();

    let rider_select = {
        let order_id = order.id.clone();
        let selected = order.rider_id.as_ref().map(|r| r.id.clone()).unwrap_or_default();
        html! {
            <select
                disabled={busy}
                onchange={link.callback(move |e: Event| Msg::AssignRider {
                    order_id: order_id.clone(),
                    rider_id: select_value(&e),
                })}
            >
                <option value="" selected={selected.is_empty()}>{ "Assign rider" }</option>
                { for page.riders.iter().map(|rider| html! {
                    <option value={rider.id.clone()} selected={rider.id == selected}>
                        { &rider.name }
                    </option>
                }) }
            </select>
        }
    };

    let cancel = {
        let order_id = order.id.clone();
        link.callback(move |_| Msg::CancelOrder(order_id.clone()))
    };
    let delete = {
        let order_id = order.id.clone();
        link.callback(move |_| Msg::DeleteFinished(order_id.clone()))
    };

    html! {
        <div class="admin-order-card" key={order.id.clone()}>
            <div class="order-details">
                <h3>{ customer_name(order) }</h3>
                <p><span class="field">{ "Contact: " }</span>{ &order.contact }</p>
                <p><span class="field">{ "Method: " }</span>{ method.as_str() }</p>
                if order.is_delivery() {
                    <p><span class="field">{ "Address: " }</span>{ &order.location.name }</p>
                }
                if let Some(when) = &scheduled_for {
                    <p><span class="field">{ "Scheduled For: " }</span>{ when }</p>
                }
                if !order.contact.is_empty() {
                    <div class="customer-contact">
                        <a href={format!("tel:{}", order.contact)}>{ "Call" }</a>
                        <a href={format!("https://wa.me/{}", order.contact)} target="_blank" rel="noopener noreferrer">
                            { "WhatsApp" }
                        </a>
                    </div>
                }
            </div>

            { order_items(order) }
            { progress_tracker(&classify_order(order), None) }

            if active {
                <div class="admin-actions">
                    { buttons }
                    if order.is_delivery() {
                        { rider_select }
                    }
                    <button class="danger" disabled={busy} onclick={cancel}>{ "Cancel Order" }</button>
                </div>
            } else {
                <div class="admin-actions">
                    if let Some(rider) = &order.rider_id {
                        <p><span class="field">{ "Rider: " }</span>{ &rider.name }</p>
                    }
                    <button class="danger" disabled={busy} onclick={delete}>{ "Delete" }</button>
                </div>
            }
        </div>
    }
}
