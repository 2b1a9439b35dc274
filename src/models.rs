use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /try-on`.
///
/// Missing and `null` image fields deserialize to empty values so that the
/// handler can answer with its validation message rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub person_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u32>,
    /// Accepted for compatibility; not sent upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_steps: Option<u32>,
}

impl TryOnRequest {
    pub fn new(person_image: impl Into<String>, product_image: impl Into<String>) -> Self {
        TryOnRequest {
            person_image: person_image.into(),
            product_images: vec![product_image.into()],
            sample_count: None,
            base_steps: None,
        }
    }

    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = Some(count);
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.person_image.is_empty() && !self.product_images.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TryOnResponse {
    pub fn success(images: Vec<String>) -> Self {
        TryOnResponse {
            success: true,
            images: Some(images),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        TryOnResponse {
            success: false,
            images: None,
            error: Some(error.into()),
        }
    }
}

// Vertex AI `:predict` wire format.

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub instances: Vec<TryOnInstance<'a>>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnInstance<'a> {
    pub person_image: ImageInput<'a>,
    pub product_images: Vec<ImageInput<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ImageInput<'a> {
    pub image: EncodedImage<'a>,
}

impl<'a> ImageInput<'a> {
    pub fn new(bytes_base64_encoded: &'a str) -> Self {
        ImageInput {
            image: EncodedImage {
                bytes_base64_encoded,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage<'a> {
    pub bytes_base64_encoded: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub rai_filtered_reason: Option<String>,
}

// Sample galleries.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImages {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothesCategory {
    pub label: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothesGallery {
    pub tops: ClothesCategory,
    pub bottom: ClothesCategory,
    pub set: ClothesCategory,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
