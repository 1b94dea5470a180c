use common::model::menu::MenuItem;

pub enum Msg {
    Loaded(Result<Vec<MenuItem>, String>),
    ToggleCategory(String),
    ShowAllCategories,
    OpenItem(String),
    ClosePopup,
    ToggleAccompaniment(String),
    IncreaseQuantity,
    DecreaseQuantity,
    SetNote(String),
    AddToCart,
}
