//! Request and response types for generation.

use crate::{AspectRatio, ImageData, Output, Part};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What kind of content the caller expects back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// A single image
    Image,
    /// A JSON array of strings
    StringList,
}

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use storyboard_core::{AspectRatio, GenerateRequest, Part, ResponseFormat};
///
/// let request = GenerateRequest::builder()
///     .parts(vec![Part::Text("A fox in the snow".to_string())])
///     .response_format(ResponseFormat::Image)
///     .aspect_ratio(Some(AspectRatio::Square1x1))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.parts().len(), 1);
/// assert!(request.model().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Ordered content parts
    parts: Vec<Part>,
    /// Model identifier override; the driver default is used when absent
    #[builder(default)]
    model: Option<String>,
    /// Expected response content
    #[builder(default)]
    response_format: ResponseFormat,
    /// Requested frame shape for image output
    #[builder(default)]
    aspect_ratio: Option<AspectRatio>,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Concatenated text of all text parts, separated by newlines.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All image parts in order.
    pub fn images(&self) -> Vec<&ImageData> {
        self.parts.iter().filter_map(Part::as_image).collect()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use storyboard_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::new(vec![Output::Text("A quiet harbour".to_string())]);
/// assert_eq!(response.first_text(), Some("A quiet harbour"));
/// assert!(response.first_image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerateResponse {
    /// Generated outputs in the order the provider returned them
    outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Wrap a list of outputs.
    pub fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }

    /// First text output, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.outputs.iter().find_map(|output| match output {
            Output::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// First image output, if any.
    pub fn first_image(&self) -> Option<&ImageData> {
        self.outputs.iter().find_map(|output| match output {
            Output::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Consume the response, returning the first image output.
    pub fn into_first_image(self) -> Option<ImageData> {
        self.outputs.into_iter().find_map(|output| match output {
            Output::Image(image) => Some(image),
            _ => None,
        })
    }
}
