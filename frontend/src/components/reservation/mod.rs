//! Table booking form.

mod current;

pub use current::CurrentReservationsPage;

use common::model::reservation::{ReservationDraft, RESERVATION_TIMES};
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::Page;
use crate::components::helpers::{
    checkbox_checked, input_value, now_local, select_value, show_toast, textarea_value,
};
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct ReservationProps {
    pub session: Session,
    pub on_navigate: Callback<Page>,
}

#[derive(Debug, Clone, Copy)]
pub enum Field {
    Date,
    Time,
    Name,
    Email,
    Phone,
    Requests,
}

pub enum Msg {
    Edit(Field, String),
    SetTables(u32),
    SetChairs(u32),
    SetWholeRestaurant(bool),
    Submit,
    Submitted(Result<(), String>),
}

pub struct ReservationPage {
    draft: ReservationDraft,
    submitting: bool,
}

/// A fresh form, pre-filled with the signed-in customer's details.
fn draft_for(session: &Session) -> ReservationDraft {
    let mut draft = ReservationDraft::default();
    if let Some(user) = session.user() {
        draft.customer_name = user.name;
        draft.customer_email = user.email;
        draft.customer_phone = user.phone.unwrap_or_default();
    }
    draft
}

impl Component for ReservationPage {
    type Message = Msg;
    type Properties = ReservationProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            draft: draft_for(&ctx.props().session),
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let draft = &mut self.draft;
        match msg {
            Msg::Edit(field, value) => {
                let target = match field {
                    Field::Date => &mut draft.reservation_date,
                    Field::Time => &mut draft.reservation_time,
                    Field::Name => &mut draft.customer_name,
                    Field::Email => &mut draft.customer_email,
                    Field::Phone => &mut draft.customer_phone,
                    Field::Requests => &mut draft.special_requests,
                };
                *target = value;
                true
            }
            Msg::SetTables(tables) => {
                draft.number_of_tables = tables.clamp(1, 10);
                true
            }
            Msg::SetChairs(chairs) => {
                draft.chairs_per_table = chairs.clamp(1, 10);
                true
            }
            Msg::SetWholeRestaurant(whole) => {
                draft.whole_restaurant = whole;
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let session = &ctx.props().session;
                let request = match draft.clone().into_request(session.user_id(), now_local()) {
                    Ok(request) => request,
                    Err(err) => {
                        show_toast(&err.to_string());
                        return false;
                    }
                };
                info!("submitting reservation for {} guest(s)", request.total_guests);
                self.submitting = true;
                let api = session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api
                        .create_reservation(&request)
                        .await
                        .map_err(|err| err.user_message("Failed to submit reservation. Please try again."));
                    link.send_message(Msg::Submitted(result));
                });
                true
            }
            Msg::Submitted(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        show_toast("Reservation submitted successfully! We'll contact you shortly to confirm.");
                        self.draft = ReservationDraft::default();
                        if ctx.props().session.user_id().is_some() {
                            ctx.props().on_navigate.emit(Page::CurrentReservations);
                        }
                    }
                    Err(err) => {
                        warn!("reservation: {err}");
                        show_toast(&err);
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let draft = &self.draft;
        let edit = |field: Field| link.callback(move |e: InputEvent| Msg::Edit(field, input_value(&e)));
        let count = |value: String| value.parse::<u32>().unwrap_or(1);

        html! {
            <section class="reservation-page">
                <h1>{ "Reserve a Table" }</h1>
                <form
                    class="reservation-form"
                    onsubmit={link.callback(|e: SubmitEvent| {
                        e.prevent_default();
                        Msg::Submit
                    })}
                >
                    <fieldset disabled={self.submitting}>
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                checked={draft.whole_restaurant}
                                onchange={link.callback(|e: Event| Msg::SetWholeRestaurant(checkbox_checked(&e)))}
                            />
                            { "Book the whole restaurant" }
                        </label>
                        if !draft.whole_restaurant {
                            <div class="seating">
                                <label>
                                    { "Tables" }
                                    <input
                                        type="number" min="1" max="10"
                                        value={draft.number_of_tables.to_string()}
                                        oninput={link.callback(move |e: InputEvent| Msg::SetTables(count(input_value(&e))))}
                                    />
                                </label>
                                <label>
                                    { "Chairs per table" }
                                    <input
                                        type="number" min="1" max="10"
                                        value={draft.chairs_per_table.to_string()}
                                        oninput={link.callback(move |e: InputEvent| Msg::SetChairs(count(input_value(&e))))}
                                    />
                                </label>
                            </div>
                        }
                        <p class="seating-summary">{ draft.seating_summary() }</p>

                        <label>
                            { "Date" }
                            <input
                                type="date"
                                min={now_local().format("%Y-%m-%d").to_string()}
                                value={draft.reservation_date.clone()}
                                oninput={edit(Field::Date)}
                            />
                        </label>
                        <label>
                            { "Time" }
                            <select onchange={link.callback(|e: Event| Msg::Edit(Field::Time, select_value(&e)))}>
                                <option value="" selected={draft.reservation_time.is_empty()}>{ "Select Time" }</option>
                                { for RESERVATION_TIMES.iter().map(|time| html! {
                                    <option value={*time} selected={draft.reservation_time == *time}>{ *time }</option>
                                }) }
                            </select>
                        </label>

                        <label>
                            { "Name" }
                            <input type="text" value={draft.customer_name.clone()} oninput={edit(Field::Name)} />
                        </label>
                        <label>
                            { "Email" }
                            <input type="email" value={draft.customer_email.clone()} oninput={edit(Field::Email)} />
                        </label>
                        <label>
                            { "Phone" }
                            <input
                                type="tel"
                                placeholder="0XXXXXXXXX or +233XXXXXXXXX"
                                value={draft.customer_phone.clone()}
                                oninput={edit(Field::Phone)}
                            />
                        </label>
                        <label>
                            { "Special requests" }
                            <textarea
                                value={draft.special_requests.clone()}
                                oninput={link.callback(|e: InputEvent| Msg::Edit(Field::Requests, textarea_value(&e)))}
                            />
                        </label>

                        <button type="submit">
                            { if self.submitting { "Submitting..." } else { "Reserve" } }
                        </button>
                    </fieldset>
                </form>
            </section>
        }
    }
}
