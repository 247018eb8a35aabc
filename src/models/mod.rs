use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Image bytes pulled out of an upload request, ready to be re-posted to the
/// image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// A nutrient amount as the model wrote it. The prompt asks for numbers but
/// models sometimes answer `"95 kcal"` or `{"value": 95, "unit": "kcal"}`;
/// every shape is passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

/// One food item from the model's answer. Fields the model left out stay
/// out and an explicit `null` stays `null`; nothing is filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionItem {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<Quantity>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_protein: Option<Quantity>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_carbs: Option<Quantity>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_fats: Option<Quantity>,
    /// Any extra keys the model attached to the item.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// `None` only when the key is absent; a JSON null becomes `Some(null)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
