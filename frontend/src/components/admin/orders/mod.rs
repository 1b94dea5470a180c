//! Admin orders board: root module wiring the Yew `Component`
//! implementation with submodules for state, messages, update logic and
//! view rendering.
//!
//! Active orders, finished orders and the rider list are refreshed together
//! on one poller. Every status change goes to the backend one milestone at a
//! time and is mirrored on the local copy right away.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::{AdminOrdersPage, AdminTab};

use crate::polling::Poller;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct AdminOrdersProps {
    pub session: Session,
}

impl Component for AdminOrdersPage {
    type Message = Msg;
    type Properties = AdminOrdersProps;

    fn create(ctx: &Context<Self>) -> Self {
        let interval = ctx.props().session.api().config().poll.admin_orders;
        let poller = Poller::start("admin orders", interval, ctx.link().callback(|_| Msg::Refresh));
        let mut page = AdminOrdersPage::new();
        page.poller = Some(poller);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }
}
