use common::config::ClientConfig;

use crate::app::App;

mod api;
mod app;
mod components;
mod logger;
mod polling;
mod session;
mod storage;
mod tops_sheet;

fn main() {
    logger::init(ClientConfig::from_build_env().log_level);
    log::info!("starting restaurant client");
    yew::Renderer::<App>::new().render();
}
