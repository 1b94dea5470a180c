//! Messages of the admin orders board.

use common::progress::FulfillmentStep;

use super::state::{AdminSnapshot, AdminTab};

pub enum Msg {
    Refresh,
    Loaded(Result<AdminSnapshot, String>),
    ShowTab(AdminTab),
    ToggleStep { order_id: String, step: FulfillmentStep },
    AssignRider { order_id: String, rider_id: String },
    CancelOrder(String),
    DeleteFinished(String),
    /// A backend action finished; `Ok` carries the toast text, if any.
    ActionDone {
        order_id: String,
        result: Result<Option<&'static str>, String>,
    },
}
