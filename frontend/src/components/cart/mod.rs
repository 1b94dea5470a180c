//! Cart page: line editing, delivery details, optional scheduling and
//! checkout.

use common::checkout::{build_order_request, CheckoutDetails};
use common::model::order::{DeliveryMethod, Location};
use common::schedule::{available_slots, OrderSchedule, ScheduleSlots};
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::Page;
use crate::components::helpers::{now_local, show_toast};
use crate::session::Session;

mod view;

#[derive(Properties, PartialEq, Clone)]
pub struct CartProps {
    pub session: Session,
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
    SetMethod(DeliveryMethod),
    SetContact(String),
    SetAddress(String),
    OpenSchedule,
    CloseSchedule,
    PickSlot(String),
    ClearSchedule,
    Checkout,
    CheckoutDone(Result<(), String>),
}

pub struct CartPage {
    pub contact: String,
    pub address: String,
    pub delivery_method: DeliveryMethod,
    pub schedule: Option<OrderSchedule>,
    /// Open schedule picker with the slots computed when it was opened.
    pub picker: Option<ScheduleSlots>,
    pub submitting: bool,
}

impl CartPage {
    fn details(&self, session: &Session) -> CheckoutDetails {
        let saved = session.location();
        // Coordinates only survive while the address text is unchanged.
        let location = if saved.name == self.address.trim() {
            saved
        } else {
            Location {
                name: self.address.trim().to_string(),
                ..Location::default()
            }
        };
        CheckoutDetails {
            contact: self.contact.clone(),
            location,
            delivery_method: self.delivery_method,
            schedule: self.schedule.clone(),
        }
    }
}

impl Component for CartPage {
    type Message = Msg;
    type Properties = CartProps;

    fn create(ctx: &Context<Self>) -> Self {
        let session = &ctx.props().session;
        Self {
            contact: session
                .user()
                .and_then(|u| u.phone)
                .unwrap_or_default(),
            address: session.location().name,
            delivery_method: DeliveryMethod::default(),
            schedule: None,
            picker: None,
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let session = &ctx.props().session;
        match msg {
            Msg::Increment(id) => {
                session.update_cart(|cart| cart.increment(&id));
                false
            }
            Msg::Decrement(id) => {
                session.update_cart(|cart| cart.decrement(&id));
                false
            }
            Msg::Remove(id) => {
                session.update_cart(|cart| cart.remove(&id));
                false
            }
            Msg::Clear => {
                session.update_cart(|cart| cart.clear());
                false
            }
            Msg::SetMethod(method) => {
                self.delivery_method = method;
                true
            }
            Msg::SetContact(contact) => {
                self.contact = contact;
                false
            }
            Msg::SetAddress(address) => {
                self.address = address;
                false
            }
            Msg::OpenSchedule => {
                self.picker = Some(available_slots(now_local()));
                true
            }
            Msg::CloseSchedule => {
                self.picker = None;
                true
            }
            Msg::PickSlot(time) => {
                if let Some(picker) = self.picker.take() {
                    self.schedule = OrderSchedule::new(&time, picker.date);
                }
                true
            }
            Msg::ClearSchedule => {
                self.schedule = None;
                true
            }
            Msg::Checkout => {
                if self.submitting {
                    return false;
                }
                let details = self.details(session);
                let request =
                    match build_order_request(session.user().as_ref(), &session.cart(), &details) {
                        Ok(request) => request,
                        Err(err) => {
                            show_toast(&err.to_string());
                            return false;
                        }
                    };
                if details.delivery_method == DeliveryMethod::Delivery {
                    session.set_location(details.location.clone());
                }
                self.submitting = true;
                let api = session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .place_order(&request)
                        .await
                        .map_err(|err| format!("Order failed: {}", err.user_message("Unknown error")));
                    link.send_message(Msg::CheckoutDone(result));
                });
                true
            }
            Msg::CheckoutDone(Ok(())) => {
                self.submitting = false;
                let message = self.details(session).success_message();
                info!("order placed");
                show_toast(&message);
                session.update_cart(|cart| cart.clear());
                self.schedule = None;
                ctx.props().on_navigate.emit(Page::Orders);
                true
            }
            Msg::CheckoutDone(Err(err)) => {
                warn!("checkout: {err}");
                self.submitting = false;
                show_toast(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
