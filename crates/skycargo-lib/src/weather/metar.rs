//! METAR observation decoding and the penalty model applied to it.

use serde::Deserialize;

/// Wind speed (knots) above which a headwind penalty starts to accrue.
const CALM_WIND_KT: f64 = 10.0;
/// Visibility (statute miles) below which a visibility penalty accrues.
const CLEAR_VISIBILITY_SM: f64 = 10.0;

/// Single observation record returned by the METAR endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetarReport {
    #[serde(default)]
    pub wind_speed_kt: Option<f64>,
    #[serde(default)]
    pub visibility_statute_miles: Option<Visibility>,
}

/// Visibility is published either as a number or as text such as `"10+"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Visibility {
    Miles(f64),
    Text(String),
}

impl Visibility {
    fn miles(&self) -> Option<f64> {
        match self {
            Visibility::Miles(value) => Some(*value),
            Visibility::Text(text) => text.trim().trim_end_matches('+').parse().ok(),
        }
    }
}

impl MetarReport {
    /// Observed wind speed, defaulting to calm.
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed_kt.unwrap_or(0.0)
    }

    /// Observed visibility, defaulting to unrestricted.
    pub fn visibility(&self) -> f64 {
        self.visibility_statute_miles
            .as_ref()
            .and_then(Visibility::miles)
            .unwrap_or(CLEAR_VISIBILITY_SM)
    }

    /// Percentage penalty derived from wind and visibility.
    pub fn penalty(&self) -> f64 {
        let wind_penalty = ((self.wind_speed() - CALM_WIND_KT) / 50.0).max(0.0);
        let vis_penalty = ((CLEAR_VISIBILITY_SM - self.visibility()) / 10.0).max(0.0);
        (wind_penalty + vis_penalty) * 50.0
    }

    pub fn describe(&self) -> String {
        format!("Wind: {}kt, Vis: {}SM", self.wind_speed(), self.visibility())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetarResponse {
    Wrapped {
        #[serde(rename = "METAR")]
        metar: MetarEnvelope,
    },
    List(Vec<MetarReport>),
}

#[derive(Debug, Default, Deserialize)]
struct MetarEnvelope {
    #[serde(default)]
    data: Vec<MetarReport>,
}

/// Extract the first observation from a response body.
///
/// Returns `Ok(None)` for well-formed responses that carry no records and
/// `Err` when the body is not a recognised METAR document.
pub fn parse_first_report(body: &str) -> Result<Option<MetarReport>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let reports = match serde_json::from_str::<MetarResponse>(body)? {
        MetarResponse::Wrapped { metar } => metar.data,
        MetarResponse::List(reports) => reports,
    };
    Ok(reports.into_iter().next())
}
