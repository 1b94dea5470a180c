use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::Authenticated;
use crate::app::Page;
use crate::components::helpers::{input_value, show_toast};
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginProps {
    pub session: Session,
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    SetIdentifier(String),
    SetPassword(String),
    Submit,
    Done(Result<Authenticated, String>),
}

pub struct LoginPage {
    identifier: String,
    password: String,
    submitting: bool,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            identifier: String::new(),
            password: String::new(),
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetIdentifier(value) => {
                self.identifier = value;
                false
            }
            Msg::SetPassword(value) => {
                self.password = value;
                false
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if self.identifier.trim().is_empty() || self.password.is_empty() {
                    show_toast("Please fill in all required fields.");
                    return false;
                }
                self.submitting = true;
                let api = ctx.props().session.api();
                let link = ctx.link().clone();
                let identifier = self.identifier.trim().to_string();
                let password = self.password.clone();
                spawn_local(async move {
                    let result = api
                        .login(&identifier, &password)
                        .await
                        .map_err(|err| err.user_message("Login failed. Please check your credentials."));
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
                warn!("login: {err}");
                self.submitting = false;
                self.password.clear();
                show_toast(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_navigate = ctx.props().on_navigate.clone();
        html! {
            <section class="auth-page">
                <h1>{ "Login" }</h1>
                <form onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Submit
                })}>
                    <input
                        type="text"
                        placeholder="Username"
                        value={self.identifier.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::SetIdentifier(input_value(&e)))}
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        value={self.password.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::SetPassword(input_value(&e)))}
                    />
                    <button type="submit" disabled={self.submitting}>
                        { if self.submitting { "Signing in..." } else { "Continue" } }
                    </button>
                </form>
                <p>
                    { "Don't have an account? " }
                    <a onclick={Callback::from(move |_| on_navigate.emit(Page::Signup))}>{ "Sign Up" }</a>
                </p>
            </section>
        }
    }
}
