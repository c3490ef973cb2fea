use std::io::{Error, ErrorKind};

pub use surf::http::Method;
pub use surf::{Body, RequestBuilder, Response, StatusCode, Url};

pub fn surf_error(error: surf::Error) -> Error {
  Error::new(ErrorKind::Other, format!("{}", error))
}

pub fn json_error(error: serde_json::Error) -> Error {
  Error::new(ErrorKind::InvalidData, format!("{}", error))
}

pub async fn parse<T>(response: &mut Response) -> std::io::Result<T>
where
  T: serde::de::DeserializeOwned,
{
  response.body_json::<T>().await.map_err(|error| {
    log::warn!("unable to parse response body - {}", error);
    surf_error(error)
  })
}
