//! Small browser utilities shared by the views.
//!
//! - **Feedback**: [`show_toast`] for transient notifications and
//!   [`confirm`] for destructive actions.
//! - **Clock**: the browser's local wall-clock time, which is what the
//!   reservation rules and the delivery-estimate cache are expressed in.
//! - **Formatting**: prices in cedis with grouped thousands.

use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Displays a temporary notification at the bottom of the screen. The
/// message is inserted as text, never as markup.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name("toast");
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Native confirmation dialog. Answers `false` when no window is around.
pub fn confirm(question: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(question).ok())
        .unwrap_or(false)
}

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Local wall-clock time of the browser.
pub fn now_local() -> NaiveDateTime {
    let date = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(date.get_full_year() as i32, date.get_month() + 1, date.get_date())
        .and_then(|d| d.and_hms_opt(date.get_hours(), date.get_minutes(), date.get_seconds()))
        .unwrap_or_default()
}

/// `GH₵ 1,250.00`.
pub fn format_cedis(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{sign}GH₵ {}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

pub fn checkbox_checked(e: &Event) -> bool {
    e.target_unchecked_into::<HtmlInputElement>().checked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cedis_are_grouped_and_rounded() {
        assert_eq!(format_cedis(35.0), "GH₵ 35.00");
        assert_eq!(format_cedis(1250.5), "GH₵ 1,250.50");
        assert_eq!(format_cedis(0.125), "GH₵ 0.13");
        assert_eq!(format_cedis(-4.0), "-GH₵ 4.00");
    }
}
