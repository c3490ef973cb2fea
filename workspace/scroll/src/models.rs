use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrainedModel {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub self_link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub training_complete: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub training_status: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub storage_data_location: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model_info: Option<Value>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl TrainedModel {
  /// The raw training status reported by the service; a missing field reads as empty.
  pub fn state(&self) -> &str {
    self.training_status.as_deref().unwrap_or_default()
  }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelList {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(default)]
  pub items: Vec<TrainedModel>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_page_token: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub self_link: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertRequest {
  pub id: String,
  pub storage_data_location: String,
}

impl InsertRequest {
  pub fn new<I, L>(id: I, location: L) -> Self
  where
    I: Into<String>,
    L: Into<String>,
  {
    InsertRequest {
      id: id.into(),
      storage_data_location: location.into(),
    }
  }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PredictInput {
  pub csv_instance: Vec<Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PredictRequest {
  pub input: PredictInput,
}

impl PredictRequest {
  /// A single-column csv instance holding the sample text.
  pub fn text<T>(sample: T) -> Self
  where
    T: std::fmt::Display,
  {
    PredictRequest {
      input: PredictInput {
        csv_instance: vec![Value::String(format!("{}", sample))],
      },
    }
  }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelScore {
  pub label: String,
  pub score: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub self_link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_label: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub output_multi: Vec<LabelScore>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_value: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub self_link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data_description: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model_description: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub errors: Option<Value>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[cfg(test)]
mod test {
  use super::{InsertRequest, ModelList, PredictRequest, Prediction, TrainedModel};

  #[test]
  fn test_trained_model_state() {
    let body = r#"{
      "kind": "prediction#training",
      "id": "language-id",
      "selfLink": "https://www.googleapis.com/prediction/v1.6/projects/p/trainedmodels/language-id",
      "trainingStatus": "RUNNING",
      "storageDataLocation": "bucket/language_id.txt"
    }"#;
    let model = serde_json::from_str::<TrainedModel>(body).unwrap();
    assert_eq!(model.state(), "RUNNING");
    assert_eq!(model.storage_data_location.as_deref(), Some("bucket/language_id.txt"));
    assert!(model.extra.is_empty());
  }

  #[test]
  fn test_trained_model_missing_state() {
    let model = serde_json::from_str::<TrainedModel>(r#"{"id": "language-id"}"#).unwrap();
    assert_eq!(model.state(), "");
  }

  #[test]
  fn test_trained_model_keeps_unknown_fields() {
    let body = r#"{"id": "language-id", "modelType": "classification", "trainingStatus": "DONE"}"#;
    let model = serde_json::from_str::<TrainedModel>(body).unwrap();
    let printed = serde_json::to_value(&model).unwrap();
    assert_eq!(printed["modelType"], "classification");
    assert_eq!(printed["trainingStatus"], "DONE");
    assert!(printed.get("kind").is_none());
  }

  #[test]
  fn test_model_list_without_items() {
    let list = serde_json::from_str::<ModelList>(r#"{"kind": "prediction#list"}"#).unwrap();
    assert_eq!(list.items.len(), 0);
  }

  #[test]
  fn test_insert_request_wire_names() {
    let body = serde_json::to_value(&InsertRequest::new("language-id", "bucket/object")).unwrap();
    assert_eq!(body["id"], "language-id");
    assert_eq!(body["storageDataLocation"], "bucket/object");
  }

  #[test]
  fn test_predict_request_text() {
    let body = serde_json::to_string(&PredictRequest::text("mucho bueno")).unwrap();
    assert_eq!(body, r#"{"input":{"csvInstance":["mucho bueno"]}}"#);
  }

  #[test]
  fn test_prediction_output_multi() {
    let body = r#"{
      "kind": "prediction#output",
      "id": "language-id",
      "outputLabel": "Spanish",
      "outputMulti": [
        { "label": "English", "score": "0.1" },
        { "label": "French", "score": "0.2" },
        { "label": "Spanish", "score": "0.7" }
      ]
    }"#;
    let prediction = serde_json::from_str::<Prediction>(body).unwrap();
    assert_eq!(prediction.output_label.as_deref(), Some("Spanish"));
    assert_eq!(prediction.output_multi.len(), 3);
    assert_eq!(prediction.output_value, None);
    assert_eq!(prediction.output_multi[2].score, "0.7");
  }

  #[test]
  fn test_prediction_output_value() {
    let body = r#"{"kind": "prediction#output", "id": "house-prices", "outputValue": "12.5"}"#;
    let prediction = serde_json::from_str::<Prediction>(body).unwrap();
    assert_eq!(prediction.output_value.as_deref(), Some("12.5"));
    assert!(prediction.output_multi.is_empty());
  }
}
