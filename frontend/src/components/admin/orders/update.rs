//! Update function for the admin orders board.

use common::model::order::Rider;
use common::progress::actions::{apply_updates, plan_rider_assignment, plan_toggle};
use log::{debug, info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{ApiClient, ApiError};
use crate::components::helpers::{confirm, show_toast};

use super::messages::Msg;
use super::state::{AdminOrdersPage, AdminSnapshot};

async fn fetch_snapshot(api: &ApiClient) -> Result<AdminSnapshot, ApiError> {
    let active = api.fetch_admin_orders().await?;
    let finished = api.fetch_admin_finished_orders().await?;
    let riders = api.fetch_riders().await?;
    Ok(AdminSnapshot {
        active,
        finished,
        riders,
    })
}

/// Runs `action` in the background and reports back as `ActionDone`.
fn spawn_action<F>(ctx: &Context<AdminOrdersPage>, order_id: String, action: F)
where
    F: std::future::Future<Output = Result<Option<&'static str>, String>> + 'static,
{
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = action.await;
        link.send_message(Msg::ActionDone { order_id, result });
    });
}

pub fn update(page: &mut AdminOrdersPage, ctx: &Context<AdminOrdersPage>, msg: Msg) -> bool {
    let api = ctx.props().session.api();
    match msg {
        Msg::Refresh => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = fetch_snapshot(&api)
                    .await
                    .map_err(|err| err.user_message("Error loading orders"));
                link.send_message(Msg::Loaded(result));
            });
            false
        }
        Msg::Loaded(Ok(snapshot)) => {
            debug!(
                "admin board: {} active, {} finished, {} rider(s)",
                snapshot.active.len(),
                snapshot.finished.len(),
                snapshot.riders.len()
            );
            page.apply_snapshot(snapshot);
            page.loading = false;
            page.error = None;
            true
        }
        Msg::Loaded(Err(err)) => {
            warn!("admin orders: {err}");
            page.loading = false;
            page.error = Some(err);
            true
        }
        Msg::ShowTab(tab) => {
            page.tab = tab;
            true
        }
        Msg::ToggleStep { order_id, step } => {
            if page.is_busy(&order_id) {
                return false;
            }
            let Some(order) = page.active_order_mut(&order_id) else {
                return false;
            };
            let updates = plan_toggle(&*order, step, order.delivery_method());
            if updates.is_empty() {
                return false;
            }
            apply_updates(order, &updates);
            page.busy.insert(order_id.clone());
            let id = order_id.clone();
            spawn_action(ctx, order_id, async move {
                api.apply_status_updates(&id, &updates)
                    .await
                    .map(|_| None)
                    .map_err(|err| err.user_message("Failed to update order status"))
            });
            true
        }
        Msg::AssignRider { order_id, rider_id } => {
            if rider_id.is_empty() || page.is_busy(&order_id) {
                return false;
            }
            let rider = find_rider(&page.riders, &rider_id);
            let Some(order) = page.active_order_mut(&order_id) else {
                return false;
            };
            let updates = plan_rider_assignment(&*order, order.delivery_method());
            apply_updates(order, &updates);
            order.rider_id = rider;
            info!("assigning rider {rider_id} to order {order_id}");
            page.busy.insert(order_id.clone());
            let id = order_id.clone();
            spawn_action(ctx, order_id, async move {
                api.apply_status_updates(&id, &updates)
                    .await
                    .map_err(|err| err.user_message("Failed to assign rider and confirm steps"))?;
                api.assign_rider(&id, &rider_id)
                    .await
                    .map(|_| None)
                    .map_err(|err| err.user_message("Failed to assign rider"))
            });
            true
        }
        Msg::CancelOrder(order_id) => {
            if page.is_busy(&order_id)
                || !confirm("Are you sure you want to cancel this order? This action cannot be undone.")
            {
                return false;
            }
            page.busy.insert(order_id.clone());
            let id = order_id.clone();
            spawn_action(ctx, order_id, async move {
                api.admin_cancel_order(&id)
                    .await
                    .map(|_| Some("Order cancelled successfully"))
                    .map_err(|err| err.user_message("Failed to cancel order"))
            });
            true
        }
        Msg::DeleteFinished(order_id) => {
            if page.is_busy(&order_id) || !confirm("Delete this finished order permanently?") {
                return false;
            }
            page.busy.insert(order_id.clone());
            let id = order_id.clone();
            spawn_action(ctx, order_id, async move {
                api.delete_finished_order(&id)
                    .await
                    .map(|_| None)
                    .map_err(|err| err.user_message("Failed to delete order."))
            });
            true
        }
        Msg::ActionDone { order_id, result } => {
            page.busy.remove(&order_id);
            match result {
                Ok(Some(text)) => show_toast(text),
                Ok(None) => {}
                Err(err) => {
                    warn!("order {order_id}: {err}");
                    show_toast(&err);
                }
            }
            ctx.link().send_message(Msg::Refresh);
            true
        }
    }
}

fn find_rider(riders: &[Rider], rider_id: &str) -> Option<Rider> {
    riders.iter().find(|r| r.id == rider_id).cloned()
}
