use common::model::menu::MenuItem;

use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn fetch_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        self.get_list("menu").await
    }
}
