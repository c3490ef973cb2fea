use std::io::{Error, ErrorKind, Result};

use async_std::sync::Mutex;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use scroll::{ServiceAccountKey, TokenErrorResponse, TokenRequest, TokenResponse};

use crate::constants;
use crate::http::{parse, surf_error, Body, Method, RequestBuilder, StatusCode, Url};

fn jwt_error(error: jsonwebtoken::errors::Error) -> Error {
  Error::new(ErrorKind::InvalidData, format!("unable to sign assertion - {}", error))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
  pub iss: String,
  pub scope: String,
  pub aud: String,
  pub iat: i64,
  pub exp: i64,
}

impl Claims {
  pub fn new<S>(key: &ServiceAccountKey, scopes: &[S], now: DateTime<Utc>) -> Self
  where
    S: AsRef<str>,
  {
    let iat = now.timestamp();
    let scope = scopes.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(" ");

    Claims {
      iss: key.client_email.clone(),
      aud: key.token_uri.clone(),
      scope,
      iat,
      exp: iat + constants::TOKEN_LIFETIME_SECONDS,
    }
  }
}

pub fn assertion(key: &ServiceAccountKey, claims: &Claims) -> Result<String> {
  let mut header = Header::new(Algorithm::RS256);
  header.kid = key.private_key_id.clone();

  let encoding = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(jwt_error)?;
  jsonwebtoken::encode(&header, claims, &encoding).map_err(jwt_error)
}

pub fn token_url(uri: &str) -> Result<Url> {
  Url::parse(uri).map_err(|error| {
    log::warn!("invalid token uri '{}' - {}", uri, error);
    Error::new(ErrorKind::InvalidInput, format!("invalid token uri '{}' - {}", uri, error))
  })
}

/// The token endpoint turning the assertion down is the one access-refused condition.
pub fn refusal(status: StatusCode, body: &TokenErrorResponse) -> Error {
  match status {
    StatusCode::BadRequest | StatusCode::Unauthorized => {
      Error::new(ErrorKind::PermissionDenied, format!("access refused - {}", body))
    }
    other => Error::new(ErrorKind::Other, format!("token exchange failed with status {} - {}", other, body)),
  }
}

#[derive(Debug, Clone)]
pub struct AccessToken {
  value: String,
  expires_at: DateTime<Utc>,
}

impl AccessToken {
  pub fn issued(response: TokenResponse, now: DateTime<Utc>) -> Self {
    let lifetime = response.expires_in.unwrap_or(constants::TOKEN_LIFETIME_SECONDS);

    AccessToken {
      value: response.access_token,
      expires_at: now + Duration::seconds(lifetime),
    }
  }

  pub fn fresh(&self, now: DateTime<Utc>) -> bool {
    self.expires_at - Duration::seconds(constants::TOKEN_EXPIRY_SKEW_SECONDS) > now
  }
}

/// The authorized handle every api call goes through. The first call performs the token exchange; the token is
/// then reused until it nears expiry or the api rejects it.
pub struct Session {
  key: ServiceAccountKey,
  scopes: Vec<String>,
  token: Mutex<Option<AccessToken>>,
}

impl Session {
  pub fn new(key: ServiceAccountKey) -> Self {
    Session::with_scopes(key, &constants::SCOPES)
  }

  pub fn with_scopes<S>(key: ServiceAccountKey, scopes: &[S]) -> Self
  where
    S: AsRef<str>,
  {
    Session {
      key,
      scopes: scopes.iter().map(|s| s.as_ref().to_string()).collect(),
      token: Mutex::new(None),
    }
  }

  pub fn account(&self) -> &str {
    self.key.client_email.as_str()
  }

  pub async fn token(&self) -> Result<String> {
    let mut lock = self.token.lock().await;
    let now = Utc::now();

    if let Some(current) = &*lock {
      if current.fresh(now) {
        log::trace!("reusing cached access token");
        return Ok(current.value.clone());
      }
    }

    let token = self.exchange(now).await?;
    let value = token.value.clone();
    *lock = Some(token);
    Ok(value)
  }

  pub async fn invalidate(&self) {
    let mut lock = self.token.lock().await;
    *lock = None;
  }

  async fn exchange(&self, now: DateTime<Utc>) -> Result<AccessToken> {
    let destination = token_url(&self.key.token_uri)?;
    let claims = Claims::new(&self.key, self.scopes.as_slice(), now);
    let payload = TokenRequest::bearer(assertion(&self.key, &claims)?);
    let form = Body::from_form(&payload).map_err(surf_error)?;

    log::info!("exchanging assertion for '{}' at {}", claims.iss, destination);

    let mut response = RequestBuilder::new(Method::Post, destination)
      .body(form)
      .await
      .map_err(|error| {
        log::warn!("token request failed - {}", error);
        surf_error(error)
      })?;

    let status = response.status();

    if !status.is_success() {
      let body = response.body_json::<TokenErrorResponse>().await.unwrap_or_default();
      log::warn!("bad status code from token response - '{:?}' ({})", status, body);
      return Err(refusal(status, &body));
    }

    log::debug!("good response from token endpoint, attempting to parse");
    parse::<TokenResponse>(&mut response)
      .await
      .map(|body| AccessToken::issued(body, now))
  }
}
