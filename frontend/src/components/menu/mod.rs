//! Menu page: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic and view rendering.
//!
//! The menu is fetched once on first render. Picking a dish opens the item
//! sheet (`food_popup`), where accompaniments, quantity and a note are
//! chosen before the line goes into the cart.

use yew::platform::spawn_local;
use yew::prelude::*;

mod food_popup;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::MenuProps;
pub use state::MenuPage;

impl Component for MenuPage {
    type Message = Msg;
    type Properties = MenuProps;

    fn create(_ctx: &Context<Self>) -> Self {
        MenuPage::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            let api = ctx.props().session.api();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api
                    .fetch_menu()
                    .await
                    .map_err(|err| err.user_message("Failed to load the menu."));
                link.send_message(Msg::Loaded(result));
            });
        }
    }
}
