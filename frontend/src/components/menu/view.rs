//! View rendering for the menu page: category chips, the dish grid and
//! the item sheet.

use common::model::menu::MenuItem;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::helpers::format_cedis;

use super::food_popup::food_popup;
use super::messages::Msg;
use super::state::MenuPage;

pub fn view(page: &MenuPage, ctx: &Context<MenuPage>) -> Html {
    let link = ctx.link();

    html! {
        <section class="menu-page">
            <h1>{ "Our Menu" }</h1>
            {
                if page.loading {
                    html! { <p class="loading">{ "Loading menu..." }</p> }
                } else if let Some(error) = &page.error {
                    html! { <p class="error">{ error }</p> }
                } else {
                    html! {
                        <>
                            { build_filter_bar(page, link) }
                            { build_sections(page, link) }
                        </>
                    }
                }
            }
            { food_popup(page, link) }
        </section>
    }
}

fn build_filter_bar(page: &MenuPage, link: &Scope<MenuPage>) -> Html {
    let all = page.categories();
    html! {
        <div class="category-filter">
            <button
                class={classes!("chip", page.filter.is_empty().then_some("active"))}
                onclick={link.callback(|_| Msg::ShowAllCategories)}
            >
                { "All" }
            </button>
            { for all.iter().map(|category| {
                let selected = page.filter.is_selected(category);
                let category = category.clone();
                html! {
                    <button
                        class={classes!("chip", selected.then_some("active"))}
                        onclick={link.callback({
                            let category = category.clone();
                            move |_| Msg::ToggleCategory(category.clone())
                        })}
                    >
                        { category }
                    </button>
                }
            }) }
        </div>
    }
}

fn build_sections(page: &MenuPage, link: &Scope<MenuPage>) -> Html {
    let all = page.categories();
    if all.is_empty() {
        return html! { <p class="empty">{ "The menu is empty right now." }</p> };
    }
    html! {
        { for page.filter.visible(&all).iter().map(|category| html! {
            <div class="menu-category">
                <h2>{ category }</h2>
                <div class="food-grid">
                    { for page.items_in(category).map(|item| food_card(item, link)) }
                </div>
            </div>
        }) }
    }
}

fn food_card(item: &MenuItem, link: &Scope<MenuPage>) -> Html {
    let id = item.id.clone();
    let available = item.is_available();
    html! {
        <div
            class={classes!("food-card", (!available).then_some("unavailable"))}
            onclick={link.callback(move |_| Msg::OpenItem(id.clone()))}
        >
            if let Some(image) = &item.image {
                <img src={image.clone()} alt={item.name.clone()} />
            }
            <h3>{ &item.name }</h3>
            if let Some(description) = &item.description {
                <p class="description">{ description }</p>
            }
            <p class="price">{ format_cedis(item.price) }</p>
            if !available {
                <span class="badge">{ "Unavailable" }</span>
            }
        </div>
    }
}
