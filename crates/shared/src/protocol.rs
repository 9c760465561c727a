use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{Fortune, Gender, Kaku, Source},
    error::ErrorPayload,
};

pub const ANALYZE_PATH: &str = "/analyze";
pub const HEALTH_PATH: &str = "/healthz";

const DESCRIPTION_SUFFIX: &str = "_説明";
const CONFIGURATION_KEY: &str = "三才配置";
const CONFIGURATION_FORTUNE_KEY: &str = "三才配置_運勢";
const CONFIGURATION_DESCRIPTION_KEY: &str = "三才配置_説明";
const ERROR_KEY: &str = "error";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub last_name: String,
    pub first_name: String,
    pub gender: Gender,
}

/// A classification label as received, plus its parsed severity if recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneLabel {
    pub text: String,
    pub fortune: Option<Fortune>,
}

impl FortuneLabel {
    /// Only an exact match of one of the nine labels is recognized.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let fortune = Fortune::from_label(&text);
        Self { text, fortune }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReading {
    pub fortune: FortuneLabel,
    pub description: Option<String>,
}

/// The three-element configuration. Each part is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationReading {
    pub value: Option<String>,
    pub fortune: Option<FortuneLabel>,
    pub description: Option<String>,
}

impl ConfigurationReading {
    fn is_empty(&self) -> bool {
        self.value.is_none() && self.fortune.is_none() && self.description.is_none()
    }
}

/// One set of readings keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AnalysisResponse {
    pub primary: BTreeMap<Kaku, CategoryReading>,
    pub configuration: Option<ConfigurationReading>,
}

impl AnalysisResponse {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut primary = BTreeMap::new();
        for kaku in Kaku::ALL {
            let Some(label) = map.get(kaku.label()).and_then(text_of) else {
                continue;
            };
            let description = map
                .get(&format!("{}{DESCRIPTION_SUFFIX}", kaku.label()))
                .and_then(text_of);
            primary.insert(
                *kaku,
                CategoryReading {
                    fortune: FortuneLabel::parse(label),
                    description,
                },
            );
        }

        let configuration = ConfigurationReading {
            value: map.get(CONFIGURATION_KEY).and_then(text_of),
            fortune: map
                .get(CONFIGURATION_FORTUNE_KEY)
                .and_then(text_of)
                .map(FortuneLabel::parse),
            description: map.get(CONFIGURATION_DESCRIPTION_KEY).and_then(text_of),
        };

        Self {
            primary,
            configuration: (!configuration.is_empty()).then_some(configuration),
        }
    }

    pub fn reading(&self, kaku: Kaku) -> Option<&CategoryReading> {
        self.primary.get(&kaku)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.configuration.is_none()
    }
}

impl From<Map<String, Value>> for AnalysisResponse {
    fn from(value: Map<String, Value>) -> Self {
        Self::from_map(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisBody {
    Flat(AnalysisResponse),
    BySource(BTreeMap<Source, AnalysisResponse>),
}

/// Decoded `/analyze` payload: either one flat reading set or one per source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AnalysisEnvelope {
    pub error: Option<ErrorPayload>,
    pub body: AnalysisBody,
}

impl AnalysisEnvelope {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let error = map.get(ERROR_KEY).and_then(error_message_of).map(|message| ErrorPayload {
            error: message,
            error_code: map.get("error_code").and_then(text_of),
            timestamp: map.get("timestamp").and_then(text_of),
        });

        let mut sections = BTreeMap::new();
        for (key, value) in map {
            let (Ok(source), Value::Object(section)) = (key.parse::<Source>(), value) else {
                continue;
            };
            sections.insert(source, AnalysisResponse::from_map(section));
        }

        let body = if sections.is_empty() {
            AnalysisBody::Flat(AnalysisResponse::from_map(map))
        } else {
            AnalysisBody::BySource(sections)
        };

        Self { error, body }
    }

    /// Readings to render: the preferred source, then the other one.
    pub fn select(&self, preferred: Source) -> Option<(Option<Source>, &AnalysisResponse)> {
        match &self.body {
            AnalysisBody::Flat(response) => Some((None, response)),
            AnalysisBody::BySource(sections) => [preferred, preferred.other()]
                .into_iter()
                .find_map(|source| {
                    sections
                        .get(&source)
                        .filter(|response| !response.is_empty())
                        .map(|response| (Some(source), response))
                }),
        }
    }
}

impl From<Map<String, Value>> for AnalysisEnvelope {
    fn from(value: Map<String, Value>) -> Self {
        Self::from_map(&value)
    }
}

/// Label-position values are rendered as text; empty strings and null count as absent.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Any truthy `error` value aborts rendering; non-string values are reported as JSON text.
fn error_message_of(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
