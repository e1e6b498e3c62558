//! Region selector for localized archive content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selects which localized variant of shared archive content is reported
/// and extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Japanese,
    #[default]
    UsEnglish,
    UsFrench,
    UsSpanish,
    EuEnglish,
    EuFrench,
    EuSpanish,
    EuGerman,
    EuDutch,
    EuItalian,
    EuRussian,
    Korean,
    ChinaChinese,
    TaiwanChinese,
}

/// Returned when parsing an unrecognized region name.
#[derive(Debug, Error)]
#[error("unknown region: {0}")]
pub struct ParseRegionError(String);

impl Region {
    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Japanese => "japanese",
            Region::UsEnglish => "us_english",
            Region::UsFrench => "us_french",
            Region::UsSpanish => "us_spanish",
            Region::EuEnglish => "eu_english",
            Region::EuFrench => "eu_french",
            Region::EuSpanish => "eu_spanish",
            Region::EuGerman => "eu_german",
            Region::EuDutch => "eu_dutch",
            Region::EuItalian => "eu_italian",
            Region::EuRussian => "eu_russian",
            Region::Korean => "korean",
            Region::ChinaChinese => "china_chinese",
            Region::TaiwanChinese => "taiwan_chinese",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "japanese" => Ok(Region::Japanese),
            "us_english" => Ok(Region::UsEnglish),
            "us_french" => Ok(Region::UsFrench),
            "us_spanish" => Ok(Region::UsSpanish),
            "eu_english" => Ok(Region::EuEnglish),
            "eu_french" => Ok(Region::EuFrench),
            "eu_spanish" => Ok(Region::EuSpanish),
            "eu_german" => Ok(Region::EuGerman),
            "eu_dutch" => Ok(Region::EuDutch),
            "eu_italian" => Ok(Region::EuItalian),
            "eu_russian" => Ok(Region::EuRussian),
            "korean" => Ok(Region::Korean),
            "china_chinese" => Ok(Region::ChinaChinese),
            "taiwan_chinese" => Ok(Region::TaiwanChinese),
            other => Err(ParseRegionError(other.to_string())),
        }
    }
}
