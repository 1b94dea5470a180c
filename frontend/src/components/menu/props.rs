use yew::prelude::*;

use crate::app::Page;
use crate::session::Session;

#[derive(Properties, PartialEq, Clone)]
pub struct MenuProps {
    pub session: Session,
    /// Used to send signed-out visitors to the login page.
    pub on_navigate: Callback<Page>,
}
