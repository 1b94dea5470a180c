use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// A panel that slides in from the top while it carries the `show` class.
pub struct TopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

const SHOW_CLASS: &str = "show";

/// Toggles `show` after a short delay so a freshly mounted sheet still
/// animates in.
fn set_shown(top_sheet_ref: NodeRef, shown: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
            let classes = top_sheet.class_list();
            let _ = if shown {
                classes.add_1(SHOW_CLASS)
            } else {
                classes.remove_1(SHOW_CLASS)
            };
        }
    });
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    set_shown(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    set_shown(top_sheet_ref, false);
}
