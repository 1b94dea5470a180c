//! Customer side of orders.

use common::model::order::Order;
use common::requests::{OrderIdRequest, PlaceOrderRequest};
use gloo_net::http::Method;

use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<(), ApiError> {
        self.call_acked(Method::POST, "order", Some(request)).await
    }

    pub async fn fetch_user_orders(&self, user_id: &str) -> Result<Vec<Order>, ApiError> {
        self.get_list(&format!("user-orders/{user_id}")).await
    }

    pub async fn fetch_user_finished_orders(&self, user_id: &str) -> Result<Vec<Order>, ApiError> {
        self.get_list(&format!("user-finished-orders/{user_id}")).await
    }

    pub async fn fetch_order(&self, order_id: &str) -> Result<Order, ApiError> {
        self.get_json(&format!("user/order/{order_id}")).await
    }

    /// The customer confirms the order arrived.
    pub async fn mark_order_finished(&self, order_id: &str) -> Result<(), ApiError> {
        let body = OrderIdRequest {
            order_id: order_id.to_string(),
        };
        self.call(Method::POST, "user/mark-finished", Some(&body)).await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<(), ApiError> {
        self.call::<()>(Method::DELETE, &format!("user/cancel-order/{order_id}"), None)
            .await
    }
}
