use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::deck::{locate, SlideInfo};

#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SlideType {
    Title,
    Chart,
    Quote,
    Code,
    Grid,
    Closing,
    Content,
}

/// Class substrings checked in order; the first hit decides the type.
const CLASS_KEYWORDS: &[(&str, SlideType)] = &[
    ("title-slide", SlideType::Title),
    ("chart", SlideType::Chart),
    ("quote", SlideType::Quote),
    ("code", SlideType::Code),
    ("grid", SlideType::Grid),
    ("closing", SlideType::Closing),
    ("end", SlideType::Closing),
];

impl SlideType {
    pub fn classify(classes: &str) -> Self {
        CLASS_KEYWORDS
            .iter()
            .find(|(keyword, _)| classes.contains(keyword))
            .map_or(SlideType::Content, |(_, slide_type)| *slide_type)
    }
}

/// Compact per-slide summary for prompt context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SlideMapEntry {
    pub index: usize,
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    pub heading: String,
}

impl From<SlideInfo> for SlideMapEntry {
    fn from(slide: SlideInfo) -> Self {
        Self {
            index: slide.index,
            slide_type: SlideType::classify(&slide.classes),
            heading: slide.heading,
        }
    }
}

pub fn project(html: &str) -> Vec<SlideMapEntry> {
    locate(html).into_iter().map(SlideMapEntry::from).collect()
}
