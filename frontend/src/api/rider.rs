use common::model::order::Order;
use common::requests::OrderIdRequest;
use gloo_net::http::Method;

use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn fetch_rider_current_orders(&self, rider_id: &str) -> Result<Vec<Order>, ApiError> {
        self.get_list(&format!("rider/current-orders/{rider_id}")).await
    }

    pub async fn fetch_rider_finished_orders(&self, rider_id: &str) -> Result<Vec<Order>, ApiError> {
        self.get_list(&format!("rider/finished-orders/{rider_id}")).await
    }

    pub async fn confirm_delivery(&self, order_id: &str) -> Result<(), ApiError> {
        let body = OrderIdRequest {
            order_id: order_id.to_string(),
        };
        self.call(Method::POST, "rider/confirm-delivery", Some(&body)).await
    }
}
