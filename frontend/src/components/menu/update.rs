//! Update function for the menu page.

use common::cart::CartAddition;
use log::{debug, warn};
use yew::prelude::*;

use crate::app::Page;
use crate::components::helpers::show_toast;
use crate::tops_sheet::top_sheet::{close_top_sheet, open_top_sheet};

use super::messages::Msg;
use super::state::{ItemSelection, MenuPage};

pub fn update(page: &mut MenuPage, ctx: &Context<MenuPage>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(Ok(items)) => {
            debug!("menu loaded: {} item(s)", items.len());
            page.items = items;
            page.loading = false;
            page.error = None;
            true
        }
        Msg::Loaded(Err(err)) => {
            warn!("menu: {err}");
            page.loading = false;
            page.error = Some(err);
            true
        }
        Msg::ToggleCategory(category) => {
            page.filter.toggle(&category);
            true
        }
        Msg::ShowAllCategories => {
            page.filter = Default::default();
            true
        }
        Msg::OpenItem(id) => {
            let Some(item) = page.items.iter().find(|i| i.id == id).cloned() else {
                return false;
            };
            if !item.is_available() {
                show_toast("This item is currently unavailable.");
                return false;
            }
            let quantity = ctx
                .props()
                .session
                .cart()
                .find_by_menu_item(&item.id)
                .map_or(1, |line| line.quantity);
            page.selection = Some(ItemSelection::new(item, quantity));
            open_top_sheet(page.popup_ref.clone());
            true
        }
        Msg::ClosePopup => {
            close_top_sheet(page.popup_ref.clone());
            page.selection = None;
            true
        }
        Msg::ToggleAccompaniment(identity) => {
            if let Some(selection) = &mut page.selection {
                selection.toggle(&identity);
            }
            true
        }
        Msg::IncreaseQuantity => {
            if let Some(selection) = &mut page.selection {
                selection.quantity = selection.quantity.saturating_add(1);
            }
            true
        }
        Msg::DecreaseQuantity => {
            if let Some(selection) = &mut page.selection {
                selection.quantity = selection.quantity.saturating_sub(1).max(1);
            }
            true
        }
        Msg::SetNote(note) => {
            if let Some(selection) = &mut page.selection {
                selection.note = note;
            }
            false
        }
        Msg::AddToCart => {
            let session = &ctx.props().session;
            if session.user().is_none() {
                show_toast("Please log in to place an order.");
                ctx.props().on_navigate.emit(Page::Login);
                return false;
            }
            let Some(selection) = page.selection.take() else {
                return false;
            };
            let addition = CartAddition::for_item(
                &selection.item,
                selection.chosen(),
                Some(selection.note.clone()),
                selection.quantity,
            );
            session.update_cart(|cart| cart.add(addition));
            show_toast(&format!("{} added to cart", selection.item.name));
            close_top_sheet(page.popup_ref.clone());
            true
        }
    }
}
