use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_URI: &'static str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT: &'static str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

fn default_token_uri() -> String {
  DEFAULT_TOKEN_URI.to_string()
}

/// The json key file issued for a service account.
#[derive(Deserialize, Clone)]
pub struct ServiceAccountKey {
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default)]
  pub project_id: Option<String>,
  #[serde(default)]
  pub private_key_id: Option<String>,
  pub private_key: String,
  pub client_email: String,
  #[serde(default)]
  pub client_id: Option<String>,
  #[serde(default = "default_token_uri")]
  pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(formatter, "ServiceAccountKey({}, {})", self.client_email, self.token_uri)
  }
}

#[derive(Debug, Serialize)]
pub struct TokenRequest {
  pub grant_type: String,
  pub assertion: String,
}

impl TokenRequest {
  pub fn bearer(assertion: String) -> Self {
    TokenRequest {
      grant_type: JWT_BEARER_GRANT.to_string(),
      assertion,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  #[serde(default)]
  pub token_type: Option<String>,
  #[serde(default)]
  pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TokenErrorResponse {
  #[serde(default)]
  pub error: String,
  #[serde(default)]
  pub error_description: Option<String>,
}

impl std::fmt::Display for TokenErrorResponse {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    match &self.error_description {
      Some(description) => write!(formatter, "{} ({})", self.error, description),
      None => write!(formatter, "{}", self.error),
    }
  }
}
