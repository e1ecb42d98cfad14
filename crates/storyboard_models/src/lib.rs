//! Generation provider integrations for the storyboard generator.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - REST `generateContent` with text, JSON and image output
//!
//! # Example
//!
//! ```no_run
//! use storyboard_models::GeminiClient;
//! use storyboard_interface::GenerationDriver;
//! use storyboard_core::{GenerateRequest, Part, ResponseFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = GenerateRequest::builder()
//!     .parts(vec![Part::Text("A red kite over green hills".to_string())])
//!     .response_format(ResponseFormat::Image)
//!     .build()?;
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    Candidate, Content, GeminiClient, GeminiRequest, GeminiResponse, GenerationConfig,
    ImageConfig, InlineData, InlineDataPart, Part, TextPart,
};
