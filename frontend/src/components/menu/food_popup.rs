use yew::html::Scope;
use yew::prelude::*;

use crate::components::helpers::{format_cedis, textarea_value};
use crate::tops_sheet::top_sheet::TopSheet;

use super::messages::Msg;
use super::state::MenuPage;

/// The item sheet. Always mounted so the slide-in animation has a node to
/// act on; empty while no dish is selected.
pub fn food_popup(page: &MenuPage, link: &Scope<MenuPage>) -> Html {
    let body = match &page.selection {
        None => html! {},
        Some(selection) => {
            let item = &selection.item;
            let accompaniments = item.selectable_accompaniments();
            html! {
                <div class="food-popup">
                    <button class="close" onclick={link.callback(|_| Msg::ClosePopup)}>{ "✕" }</button>
                    if let Some(image) = &item.image {
                        <img class="hero" src={image.clone()} alt={item.name.clone()} />
                    }
                    <h1>{ &item.name }</h1>
                    <p class="price">{ format_cedis(selection.unit_price()) }</p>
                    if let Some(description) = &item.description {
                        <p class="description">{ description }</p>
                    }

                    if !accompaniments.is_empty() {
                        <div class="accompaniments">
                            <h3>{ "Add-ons" }</h3>
                            { for accompaniments.into_iter().map(|acc| {
                                let identity = acc.identity().to_string();
                                html! {
                                    <label class="accompaniment">
                                        <input
                                            type="checkbox"
                                            checked={selection.is_ticked(acc)}
                                            onchange={link.callback(move |_| Msg::ToggleAccompaniment(identity.clone()))}
                                        />
                                        <span>{ &acc.name }</span>
                                        if acc.price > 0.0 {
                                            <span class="surcharge">{ format!("+{}", format_cedis(acc.price)) }</span>
                                        }
                                    </label>
                                }
                            }) }
                        </div>
                    }

                    <label class="note">
                        { "Special Instructions" }
                        <textarea
                            value={selection.note.clone()}
                            placeholder="Any special requests?"
                            oninput={link.callback(|e: InputEvent| Msg::SetNote(textarea_value(&e)))}
                        />
                    </label>

                    <div class="quantity">
                        <button onclick={link.callback(|_| Msg::DecreaseQuantity)}>{ "−" }</button>
                        <span>{ selection.quantity }</span>
                        <button onclick={link.callback(|_| Msg::IncreaseQuantity)}>{ "+" }</button>
                    </div>

                    <button class="add-to-cart" onclick={link.callback(|_| Msg::AddToCart)}>
                        { format!("Add to cart · {}", format_cedis(selection.unit_price() * f64::from(selection.quantity))) }
                    </button>
                </div>
            }
        }
    };

    html! {
        <TopSheet node_ref={page.popup_ref.clone()}>
            { body }
        </TopSheet>
    }
}
