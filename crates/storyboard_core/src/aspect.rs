//! Output aspect ratios.

use serde::{Deserialize, Serialize};

/// The four frame shapes a storyboard can be rendered in.
///
/// # Examples
///
/// ```
/// use storyboard_core::AspectRatio;
///
/// let ratio: AspectRatio = "9:16".parse().unwrap();
/// assert_eq!(ratio, AspectRatio::Portrait9x16);
/// assert_eq!(ratio.to_string(), "9:16");
/// assert_eq!(AspectRatio::default().as_str(), "16:9");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum AspectRatio {
    /// 16:9 landscape
    #[default]
    #[display("16:9")]
    #[serde(rename = "16:9")]
    Widescreen16x9,
    /// 9:16 portrait
    #[display("9:16")]
    #[serde(rename = "9:16")]
    Portrait9x16,
    /// 1:1 square
    #[display("1:1")]
    #[serde(rename = "1:1")]
    Square1x1,
    /// 4:3 classic
    #[display("4:3")]
    #[serde(rename = "4:3")]
    Standard4x3,
}

impl AspectRatio {
    /// Ratio string as sent to the generation service.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen16x9 => "16:9",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Square1x1 => "1:1",
            AspectRatio::Standard4x3 => "4:3",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Widescreen16x9),
            "9:16" => Ok(AspectRatio::Portrait9x16),
            "1:1" => Ok(AspectRatio::Square1x1),
            "4:3" => Ok(AspectRatio::Standard4x3),
            other => Err(format!(
                "Unknown aspect ratio: {} (expected 16:9, 9:16, 1:1 or 4:3)",
                other
            )),
        }
    }
}
