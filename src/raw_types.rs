//! Wire format of the extracted-report JSON, kept separate from the domain
//! model so upstream field-name quirks stay at the boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReport {
    #[serde(rename = "File Name", default)]
    pub file_name: Option<String>,

    #[serde(rename = "Analysis", default)]
    pub analysis: Option<String>,

    #[serde(rename = "Probable Cause and Findings", default)]
    pub probable_cause: Option<String>,

    #[serde(rename = "Flight Information", default)]
    pub flight_info: Option<RawFlightInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFlightInfo {
    #[serde(rename = "Aircraft", default)]
    pub aircraft: Option<String>,
}
