//! Account creation, with a debounced username availability check.

use common::requests::{SignupRequest, MIN_USERNAME_LEN};
use gloo_timers::callback::Timeout;
use log::{debug, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::Authenticated;
use crate::app::Page;
use crate::components::helpers::{input_value, show_toast};
use crate::session::Session;

/// Quiet time after the last keystroke before the username is checked.
const USERNAME_CHECK_DELAY_MS: u32 = 500;

#[derive(Properties, PartialEq, Clone)]
pub struct SignupProps {
    pub session: Session,
    pub on_navigate: Callback<Page>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Unknown,
    Checking,
    Available,
    Taken,
    CheckFailed,
}

impl Availability {
    fn as_answer(self) -> Option<bool> {
        match self {
            Availability::Available => Some(true),
            Availability::Taken => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
}

pub enum Msg {
    Edit(Field, String),
    CheckUsername(String),
    UsernameChecked(String, Option<bool>),
    Submit,
    Done(Result<Authenticated, String>),
}

pub struct SignupPage {
    form: SignupRequest,
    availability: Availability,
    /// Pending debounce timer; replacing it cancels the previous check.
    debounce: Option<Timeout>,
    submitting: bool,
}

impl SignupPage {
    fn schedule_check(&mut self, ctx: &Context<Self>) {
        let username = self.form.name.trim().to_string();
        if username.chars().count() < MIN_USERNAME_LEN {
            self.debounce = None;
            self.availability = Availability::Unknown;
            return;
        }
        let link = ctx.link().clone();
        self.debounce = Some(Timeout::new(USERNAME_CHECK_DELAY_MS, move || {
            link.send_message(Msg::CheckUsername(username));
        }));
    }

    fn username_hint(&self) -> Html {
        let name = &self.form.name;
        if name.is_empty() {
            return Html::default();
        }
        let (class, text) = if name.trim().chars().count() < MIN_USERNAME_LEN {
            ("hint", "Username must be at least 3 characters")
        } else {
            match self.availability {
                Availability::Checking => ("hint", "Checking availability..."),
                Availability::Available => ("hint ok", "Username is available"),
                Availability::Taken => ("hint error", "Username is already taken"),
                Availability::CheckFailed => ("hint error", "Error checking username"),
                Availability::Unknown => return Html::default(),
            }
        };
        html! { <span class={class}>{ text }</span> }
    }
}

impl Component for SignupPage {
    type Message = Msg;
    type Properties = SignupProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: SignupRequest::default(),
            availability: Availability::Unknown,
            debounce: None,
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Edit(field, value) => {
                match field {
                    Field::Name => {
                        self.form.name = value;
                        self.availability = Availability::Unknown;
                        self.schedule_check(ctx);
                    }
                    Field::Email => self.form.email = value,
                    Field::Phone => self.form.phone = value,
                    Field::Password => self.form.password = value,
                }
                true
            }
            Msg::CheckUsername(username) => {
                self.debounce = None;
                self.availability = Availability::Checking;
                let api = ctx.props().session.api();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let answer = match api.username_available(&username).await {
                        Ok(available) => Some(available),
                        Err(err) => {
                            warn!("username check: {err}");
                            None
                        }
                    };
                    link.send_message(Msg::UsernameChecked(username, answer));
                });
                true
            }
            Msg::UsernameChecked(username, answer) => {
                if username != self.form.name.trim() {
                    debug!("dropping stale username check for {username}");
                    return false;
                }
                self.availability = match answer {
                    Some(true) => Availability::Available,
                    Some(false) => Availability::Taken,
                    None => Availability::CheckFailed,
                };
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if let Err(err) = self.form.validate(self.availability.as_answer()) {
                    show_toast(&err.to_string());
                    return false;
                }
                self.submitting = true;
                let api = ctx.props().session.api();
                let link = ctx.link().clone();
                let request = SignupRequest {
                    name: self.form.name.trim().to_string(),
                    ..self.form.clone()
                };
                spawn_local(async move {
                    let result = api
                        .signup(&request)
                        .await
                        .map_err(|err| err.user_message("Signup failed. Please try again."));
                    link.send_message(Msg::Done(result));
                });
                true
            }
            Msg::Done(Ok(Authenticated { user, token })) => {
                self.submitting = false;
                let landing = Page::landing_for(Some(&user));
                ctx.props().session.sign_in(user, token);
                ctx.props().on_navigate.emit(landing);
                true
            }
            Msg::Done(Err(err)) => {
                warn!("signup: {err}");
                self.submitting = false;
                show_toast(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let edit = |field: Field| link.callback(move |e: InputEvent| Msg::Edit(field, input_value(&e)));
        let on_navigate = ctx.props().on_navigate.clone();
        let name_state = match self.availability {
            Availability::Available => Some("valid"),
            Availability::Taken => Some("invalid"),
            _ => None,
        };
        html! {
            <section class="auth-page">
                <h1>{ "Sign Up" }</h1>
                <form onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Submit
                })}>
                    <input
                        type="text"
                        class={classes!(name_state)}
                        placeholder="Username"
                        value={self.form.name.clone()}
                        oninput={edit(Field::Name)}
                    />
                    { self.username_hint() }
                    <input type="email" placeholder="Email" value={self.form.email.clone()} oninput={edit(Field::Email)} />
                    <input type="tel" placeholder="Phone" value={self.form.phone.clone()} oninput={edit(Field::Phone)} />
                    <input
                        type="password"
                        placeholder="Password"
                        value={self.form.password.clone()}
                        oninput={edit(Field::Password)}
                    />
                    <button type="submit" disabled={self.submitting}>
                        { if self.submitting { "Creating account..." } else { "Sign Up" } }
                    </button>
                </form>
                <p>
                    { "Already have an account? " }
                    <a onclick={Callback::from(move |_| on_navigate.emit(Page::Login))}>{ "Login" }</a>
                </p>
            </section>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.debounce = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_settled_checks_answer_validation() {
        assert_eq!(Availability::Available.as_answer(), Some(true));
        assert_eq!(Availability::Taken.as_answer(), Some(false));
        assert_eq!(Availability::Checking.as_answer(), None);
        assert_eq!(Availability::CheckFailed.as_answer(), None);
    }
}
