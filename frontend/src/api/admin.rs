//! Admin endpoints for orders and riders.

use common::model::order::{Order, Rider};
use common::progress::actions::StatusUpdate;
use common::requests::{AssignRiderRequest, OrderStatusRequest};
use gloo_net::http::Method;
use log::debug;

use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn fetch_admin_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_list("admin/orders").await
    }

    pub async fn fetch_admin_finished_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_list("admin/finished-orders").await
    }

    pub async fn fetch_riders(&self) -> Result<Vec<Rider>, ApiError> {
        self.get_list("admin/riders").await
    }

    pub async fn update_order_status(
        &self,
        order_id: &str,
        update: &StatusUpdate,
    ) -> Result<(), ApiError> {
        let body = OrderStatusRequest::new(order_id, update);
        self.call(Method::POST, "admin/order-status", Some(&body)).await
    }

    /// Sends `updates` one at a time, in order, stopping at the first
    /// failure.
    pub async fn apply_status_updates(
        &self,
        order_id: &str,
        updates: &[StatusUpdate],
    ) -> Result<(), ApiError> {
        for update in updates {
            debug!("order {order_id}: {} <- {:?}", update.step.key(), update.value);
            self.update_order_status(order_id, update).await?;
        }
        Ok(())
    }

    pub async fn assign_rider(&self, order_id: &str, rider_id: &str) -> Result<(), ApiError> {
        let body = AssignRiderRequest {
            order_id: order_id.to_string(),
            rider_id: rider_id.to_string(),
        };
        self.call(Method::POST, "admin/assign-rider", Some(&body)).await
    }

    pub async fn admin_cancel_order(&self, order_id: &str) -> Result<(), ApiError> {
        self.call::<()>(Method::DELETE, &format!("admin/cancel-order/{order_id}"), None)
            .await
    }

    pub async fn delete_finished_order(&self, order_id: &str) -> Result<(), ApiError> {
        self.call::<()>(Method::DELETE, &format!("admin/finished-orders/{order_id}"), None)
            .await
    }
}
