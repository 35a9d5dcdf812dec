//! Request and response shapes that only exist at the HTTP boundary.
//!
//! Domain records (products, orders, payment sessions) live in `techmart-core`.

use serde::{Deserialize, Serialize};

/// Bearer token issued by `POST /login` or `POST /admin/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Present on customer logins only.
    #[serde(default)]
    pub user: Option<CustomerProfile>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// OAuth2 password-grant form body. The customer endpoint takes the email in
/// the `username` field.
#[derive(Debug, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Image attached to a multipart product create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `"image/jpeg"`. Guessed from the file extension when `None`.
    pub mime: Option<String>,
}

impl ProductImage {
    /// MIME type to send: the explicit one, or a guess from the extension.
    #[must_use]
    pub fn content_type(&self) -> &str {
        if let Some(mime) = &self.mime {
            return mime;
        }
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
    }
}
