use common::model::user::User;
use common::requests::{LoginRequest, SignupRequest, UsernameCheckRequest};
use common::responses::{LoginResponse, UsernameCheckResponse};
use gloo_net::http::Method;
use log::info;

use super::{ApiClient, ApiError};

/// A successful login or signup.
pub struct Authenticated {
    pub user: User,
    pub token: Option<String>,
}

fn into_authenticated(response: LoginResponse, fallback: &str) -> Result<Authenticated, ApiError> {
    match (response.success, response.user) {
        (true, Some(user)) => {
            info!("signed in as {} ({:?})", user.id, user.role);
            Ok(Authenticated {
                user,
                token: response.token,
            })
        }
        _ => Err(ApiError::Rejected(
            response.error.unwrap_or_else(|| fallback.to_string()),
        )),
    }
}

impl ApiClient {
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Authenticated, ApiError> {
        let body = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response = self.send(Method::POST, "login", Some(&body)).await;
        let response = match response {
            Ok(response) => response,
            // The backend answers bad credentials with 401 and an error body.
            Err(ApiError::Status { body, .. }) => {
                let parsed = serde_json::from_str::<LoginResponse>(&body).ok();
                return Err(ApiError::Rejected(
                    parsed
                        .and_then(|p| p.error)
                        .unwrap_or_else(|| "Login failed".to_string()),
                ));
            }
            Err(err) => return Err(err),
        };
        into_authenticated(response.json::<LoginResponse>().await?, "Login failed")
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<Authenticated, ApiError> {
        let response = self.send(Method::POST, "signup", Some(request)).await?;
        into_authenticated(
            response.json::<LoginResponse>().await?,
            "Signup failed. Please try again.",
        )
    }

    pub async fn username_available(&self, username: &str) -> Result<bool, ApiError> {
        let body = UsernameCheckRequest {
            username: username.to_string(),
        };
        let response = self.send(Method::POST, "check-username", Some(&body)).await?;
        Ok(response.json::<UsernameCheckResponse>().await?.available)
    }
}
