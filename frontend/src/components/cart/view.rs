use common::cart::CartLine;
use common::model::order::DeliveryMethod;
use yew::html::Scope;
use yew::prelude::*;

use crate::app::Page;
use crate::components::helpers::{format_cedis, input_value};

use super::{CartPage, Msg};

pub fn view(page: &CartPage, ctx: &Context<CartPage>) -> Html {
    let link = ctx.link();
    let cart = ctx.props().session.cart();

    if cart.is_empty() {
        let nav = ctx.props().on_navigate.clone();
        return html! {
            <section class="cart-page empty">
                <h1>{ "Your cart is empty" }</h1>
                <button onclick={Callback::from(move |_| nav.emit(Page::Menu))}>
                    { "Browse the menu" }
                </button>
            </section>
        };
    }

    html! {
        <section class="cart-page">
            <div class="cart-header">
                <h1>{ "Cart" }</h1>
                <button class="clear" onclick={link.callback(|_| Msg::Clear)}>{ "Clear" }</button>
            </div>
            <ul class="cart-lines">
                { for cart.lines().iter().map(|line| cart_line(line, link)) }
            </ul>
            <p class="cart-total">{ format!("Total: {}", format_cedis(cart.total())) }</p>
            { delivery_details(page, link) }
            { schedule_section(page, link) }
            <button class="checkout" disabled={page.submitting} onclick={link.callback(|_| Msg::Checkout)}>
                { if page.submitting { "Placing order..." } else { "Confirm Order" } }
            </button>
        </section>
    }
}

fn cart_line(line: &CartLine, link: &Scope<CartPage>) -> Html {
    let id = line.unique_id.clone();
    let (dec, inc, rm) = (id.clone(), id.clone(), id);
    html! {
        <li class="cart-line">
            <div class="cart-line-info">
                <h3>{ &line.name }</h3>
                if !line.accompaniments.is_empty() {
                    <p class="accompaniments">
                        { format!("with {}", line.accompaniments.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")) }
                    </p>
                }
                if let Some(note) = &line.special_note {
                    <p class="note">{ format!("Note: {note}") }</p>
                }
                <p class="unit-price">{ format_cedis(line.unit_price) }</p>
            </div>
            <div class="quantity">
                <button onclick={link.callback(move |_| Msg::Decrement(dec.clone()))}>{ "−" }</button>
                <span>{ line.quantity }</span>
                <button onclick={link.callback(move |_| Msg::Increment(inc.clone()))}>{ "+" }</button>
            </div>
            <span class="line-total">{ format_cedis(line.line_total()) }</span>
            <button class="remove" onclick={link.callback(move |_| Msg::Remove(rm.clone()))}>{ "Remove" }</button>
        </li>
    }
}

fn delivery_details(page: &CartPage, link: &Scope<CartPage>) -> Html {
    let method_button = |method: DeliveryMethod, label: &'static str| {
        html! {
            <button
                class={classes!("method", (page.delivery_method == method).then_some("active"))}
                onclick={link.callback(move |_| Msg::SetMethod(method))}
            >
                { label }
            </button>
        }
    };

    html! {
        <div class="delivery-details">
            <div class="delivery-method">
                { method_button(DeliveryMethod::Delivery, "Delivery") }
                { method_button(DeliveryMethod::Pickup, "Pickup") }
            </div>
            <label>
                { "Contact" }
                <input
                    type="tel"
                    value={page.contact.clone()}
                    placeholder="0XX XXX XXXX"
                    oninput={link.callback(|e: InputEvent| Msg::SetContact(input_value(&e)))}
                />
            </label>
            if page.delivery_method == DeliveryMethod::Delivery {
                <label>
                    { "Delivery address" }
                    <input
                        type="text"
                        value={page.address.clone()}
                        placeholder="Where should we deliver?"
                        oninput={link.callback(|e: InputEvent| Msg::SetAddress(input_value(&e)))}
                    />
                </label>
            }
        </div>
    }
}

fn schedule_section(page: &CartPage, link: &Scope<CartPage>) -> Html {
    if let Some(picker) = &page.picker {
        return html! {
            <div class="schedule-picker">
                <h3>{ format!("Schedule for {}", picker.date.format("%A, %b %-d")) }</h3>
                if let Some(notice) = &picker.notice {
                    <p class="notice">{ notice }</p>
                }
                <div class="slots">
                    { for picker.slots.iter().map(|slot| {
                        let time = slot.clone();
                        html! {
                            <button class="slot" onclick={link.callback(move |_| Msg::PickSlot(time.clone()))}>
                                { slot }
                            </button>
                        }
                    }) }
                </div>
                <button class="cancel" onclick={link.callback(|_| Msg::CloseSchedule)}>{ "Cancel" }</button>
            </div>
        };
    }

    match &page.schedule {
        Some(schedule) => html! {
            <div class="schedule">
                <span>{ format!("Scheduled for {}", schedule.scheduled_for()) }</span>
                <button onclick={link.callback(|_| Msg::ClearSchedule)}>{ "Order now instead" }</button>
            </div>
        },
        None => html! {
            <button class="schedule-open" onclick={link.callback(|_| Msg::OpenSchedule)}>
                { "Schedule for later" }
            </button>
        },
    }
}
