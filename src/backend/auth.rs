//! Auth operations against the backend API
//!
//! Thin typed wrappers over the backend's auth endpoints. Credentials only
//! ever travel as cookies set by the backend itself; these helpers hand any
//! `Set-Cookie` headers back to the caller for relaying.

use reqwest::{Method, StatusCode, header, multipart};
use serde_json::json;

use super::{ApiReply, BackendClient, read_reply};

/// Sign-up form payload, forwarded as multipart form data.
#[derive(Debug)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub avatar: Option<AvatarUpload>,
}

#[derive(Debug)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl BackendClient {
    /// POST /auth/token/ - exchange credentials for session cookies
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiReply, reqwest::Error> {
        let response = self
            .http()
            .post(self.endpoint_url("/auth/token/"))
            .header(header::ACCEPT, "application/json")
            .json(&json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        read_reply(response).await
    }

    /// POST /auth/logout/ - void the session; the backend answers with
    /// expiring Set-Cookie headers
    pub async fn logout(&self, cookie_header: &str) -> Result<ApiReply, reqwest::Error> {
        let mut request = self
            .http()
            .post(self.endpoint_url("/auth/logout/"))
            .header(header::ACCEPT, "application/json");
        if !cookie_header.is_empty() {
            request = request.header(header::COOKIE, cookie_header);
        }

        read_reply(request.send().await?).await
    }

    /// POST /auth/register/ - create an account, multipart because of the
    /// optional avatar file
    pub async fn sign_up(&self, input: SignUpInput) -> Result<ApiReply, reqwest::Error> {
        let mut form = multipart::Form::new()
            .text("email", input.email)
            .text("password", input.password)
            .text("name", input.name);

        if let Some(avatar) = input.avatar {
            let part = multipart::Part::bytes(avatar.bytes)
                .file_name(avatar.file_name)
                .mime_str(&avatar.content_type)?;
            form = form.part("avatar", part);
        }

        let response = self
            .http()
            .post(self.endpoint_url("/auth/register/"))
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        read_reply(response).await
    }

    /// POST /auth/activate/ - confirm an account from an emailed token
    pub async fn activate(&self, token: &str) -> Result<ApiReply, reqwest::Error> {
        let response = self
            .http()
            .post(self.endpoint_url("/auth/activate/"))
            .header(header::ACCEPT, "application/json")
            .json(&json!({ "token": token }))
            .send()
            .await?;

        read_reply(response).await
    }

    /// POST /auth/password/reset/ - request a reset email
    ///
    /// Always reports 200 so the form cannot be used to probe which emails
    /// are registered.
    pub async fn request_password_reset(&self, email: &str) -> Result<ApiReply, reqwest::Error> {
        let response = self
            .http()
            .post(self.endpoint_url("/auth/password/reset/"))
            .header(header::ACCEPT, "application/json")
            .json(&json!({ "email": email }))
            .send()
            .await?;

        let mut reply = read_reply(response).await?;
        reply.status = StatusCode::OK;
        Ok(reply)
    }

    /// PUT /auth/password/reset/ - set a new password from an emailed token
    pub async fn update_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ApiReply, reqwest::Error> {
        let response = self
            .http()
            .put(self.endpoint_url("/auth/password/reset/"))
            .header(header::ACCEPT, "application/json")
            .json(&json!({
                "token": token,
                "new_password": new_password,
            }))
            .send()
            .await?;

        read_reply(response).await
    }

    /// GET /users/me/ - the signed-in member's profile, with transparent
    /// token refresh on 401
    pub async fn profile(&self, cookie_header: &str) -> Result<ApiReply, reqwest::Error> {
        self.fetch_jwt(Method::GET, "/users/me/", None, cookie_header).await
    }
}
