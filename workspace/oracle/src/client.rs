use std::io::{Error, ErrorKind, Result};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use scroll::{Analysis, InsertRequest, ModelList, PredictRequest, Prediction, TrainedModel};

use crate::auth::Session;
use crate::http::{json_error, parse, surf_error, Method, RequestBuilder, Response, StatusCode, Url};

#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint<'a> {
  List(u32),
  Insert,
  Get(&'a str),
  Analyze(&'a str),
  Predict(&'a str),
  Delete(&'a str),
}

impl<'a> Endpoint<'a> {
  pub fn method(&self) -> Method {
    match self {
      Endpoint::List(_) | Endpoint::Get(_) | Endpoint::Analyze(_) => Method::Get,
      Endpoint::Insert | Endpoint::Predict(_) => Method::Post,
      Endpoint::Delete(_) => Method::Delete,
    }
  }

  /// The full url of this endpoint for `project`, below the api `root`.
  pub fn locate(&self, root: &str, project: &str) -> Result<Url> {
    let mut url = Url::parse(root).map_err(|error| {
      log::warn!("invalid api root '{}' - {}", root, error);
      Error::new(ErrorKind::InvalidInput, format!("invalid api root '{}' - {}", root, error))
    })?;

    {
      let mut segments = url
        .path_segments_mut()
        .map_err(|_| Error::new(ErrorKind::InvalidInput, format!("api root '{}' cannot be a base", root)))?;

      segments.pop_if_empty().extend(&["projects", project, "trainedmodels"]);

      match self {
        Endpoint::List(_) => {
          segments.push("list");
        }
        Endpoint::Insert => {}
        Endpoint::Get(id) | Endpoint::Delete(id) => {
          segments.push(id);
        }
        Endpoint::Analyze(id) => {
          segments.push(id).push("analyze");
        }
        Endpoint::Predict(id) => {
          segments.push(id).push("predict");
        }
      }
    }

    if let Endpoint::List(max) = self {
      url.query_pairs_mut().append_pair("maxResults", &max.to_string());
    }

    Ok(url)
  }
}

impl<'a> std::fmt::Display for Endpoint<'a> {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Endpoint::List(max) => write!(formatter, "list({})", max),
      Endpoint::Insert => write!(formatter, "insert"),
      Endpoint::Get(id) => write!(formatter, "get({})", id),
      Endpoint::Analyze(id) => write!(formatter, "analyze({})", id),
      Endpoint::Predict(id) => write!(formatter, "predict({})", id),
      Endpoint::Delete(id) => write!(formatter, "delete({})", id),
    }
  }
}

async fn check(endpoint: &Endpoint<'_>, mut response: Response) -> Result<Response> {
  let status = response.status();

  if status.is_success() {
    log::debug!("{} responded with '{}'", endpoint, status);
    return Ok(response);
  }

  let body = response.body_string().await.unwrap_or_default();
  log::warn!("bad response status from {} - '{:?}'", endpoint, status);
  Err(Error::new(
    ErrorKind::Other,
    format!("{} failed with status {} - {}", endpoint, status, body),
  ))
}

/// The remote operations the training workflow is made of.
#[async_trait(?Send)]
pub trait ModelService {
  fn project(&self) -> &str;
  async fn list(&self, max: u32) -> Result<ModelList>;
  async fn insert(&self, request: &InsertRequest) -> Result<TrainedModel>;
  async fn get(&self, id: &str) -> Result<TrainedModel>;
  async fn analyze(&self, id: &str) -> Result<Analysis>;
  async fn predict(&self, id: &str, request: &PredictRequest) -> Result<Prediction>;
  async fn delete(&self, id: &str) -> Result<()>;
}

/// Client for the trained model management api of a single project.
pub struct Predictions {
  session: Session,
  root: String,
  project: String,
  version: String,
}

impl Predictions {
  pub fn new<R, P>(session: Session, root: R, project: P) -> Self
  where
    R: Into<String>,
    P: Into<String>,
  {
    Predictions {
      session,
      root: root.into(),
      project: project.into(),
      version: env!("CARGO_PKG_VERSION").to_string(),
    }
  }

  async fn send(&self, endpoint: &Endpoint<'_>, body: Option<Value>) -> Result<Response> {
    let url = endpoint.locate(&self.root, &self.project)?;
    let mut attempt = 0u8;

    loop {
      let token = self.session.token().await?;
      log::debug!("sending {} {} (attempt {})", endpoint.method(), url, attempt);

      let mut request =
        RequestBuilder::new(endpoint.method(), url.clone()).header("Authorization", format!("Bearer {}", token));

      if let Some(payload) = body.as_ref() {
        request = request.body_json(payload).map_err(surf_error)?;
      }

      let response = request.await.map_err(|error| {
        log::warn!("unable to send {} - {}", endpoint, error);
        surf_error(error)
      })?;

      // One retry with a fresh token; a second rejection is reported like any other status.
      if response.status() == StatusCode::Unauthorized && attempt == 0 {
        log::warn!("access token rejected by {}, refreshing", endpoint);
        self.session.invalidate().await;
        attempt += 1;
        continue;
      }

      return check(endpoint, response).await;
    }
  }
}

#[async_trait(?Send)]
impl ModelService for Predictions {
  fn project(&self) -> &str {
    self.project.as_str()
  }

  async fn list(&self, max: u32) -> Result<ModelList> {
    let mut response = self.send(&Endpoint::List(max), None).await?;
    parse(&mut response).await
  }

  async fn insert(&self, request: &InsertRequest) -> Result<TrainedModel> {
    let mut response = self.send(&Endpoint::Insert, Some(to_value(request)?)).await?;
    parse(&mut response).await
  }

  async fn get(&self, id: &str) -> Result<TrainedModel> {
    let mut response = self.send(&Endpoint::Get(id), None).await?;
    parse(&mut response).await
  }

  async fn analyze(&self, id: &str) -> Result<Analysis> {
    let mut response = self.send(&Endpoint::Analyze(id), None).await?;
    parse(&mut response).await
  }

  async fn predict(&self, id: &str, request: &PredictRequest) -> Result<Prediction> {
    let mut response = self.send(&Endpoint::Predict(id), Some(to_value(request)?)).await?;
    parse(&mut response).await
  }

  async fn delete(&self, id: &str) -> Result<()> {
    self.send(&Endpoint::Delete(id), None).await.map(|_| ())
  }
}

fn to_value<T>(body: &T) -> Result<Value>
where
  T: Serialize,
{
  serde_json::to_value(body).map_err(json_error)
}

impl std::fmt::Display for Predictions {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(
      formatter,
      "oracle-predictions@v{} ({} as {})",
      self.version,
      self.project,
      self.session.account()
    )
  }
}
