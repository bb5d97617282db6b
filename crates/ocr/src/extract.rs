use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_script, r"Script: ([A-Za-z]+)");
re!(re_orientation, r"Orientation in degrees: (\d+)");
re!(re_rotate, r"Rotate: (\d+)");
re!(re_orientation_conf, r"Orientation confidence: (\d+(?:\.\d+)?)");
re!(re_script_conf, r"Script confidence: (\d+(?:\.\d+)?)");

// ── Public extraction API ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The report carries no `Script: ` field; either detection yielded no
    /// script or the engine's output format changed. The raw report text is
    /// attached for diagnosis.
    #[error("No `Script: ` field in OSD report:\n{raw}")]
    MissingScript { raw: String },
}

/// Pull the script name out of an engine report: the first contiguous run of
/// ASCII letters after the case-sensitive `Script: ` marker.
pub fn extract_script(osd_text: &str) -> Result<String, ExtractError> {
    re_script()
        .captures(osd_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::MissingScript {
            raw: osd_text.to_string(),
        })
}

/// Fields parsed out of an orientation/script report.
///
/// The script is required; orientation fields are informational and kept
/// only when present in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsdReport {
    /// Detected writing script, e.g. "Latin" or "Arabic".
    pub script: String,
    pub script_confidence: Option<f32>,
    /// Page rotation as scanned, in degrees (0, 90, 180, 270).
    pub orientation_degrees: Option<i32>,
    /// Rotation to apply to upright the page, in degrees.
    pub rotate_degrees: Option<i32>,
    pub orientation_confidence: Option<f32>,
}

impl OsdReport {
    pub fn parse(osd_text: &str) -> Result<Self, ExtractError> {
        let script = extract_script(osd_text)?;
        Ok(OsdReport {
            script,
            script_confidence: capture_f32(re_script_conf(), osd_text),
            orientation_degrees: capture_i32(re_orientation(), osd_text),
            rotate_degrees: capture_i32(re_rotate(), osd_text),
            orientation_confidence: capture_f32(re_orientation_conf(), osd_text),
        })
    }
}

fn capture_i32(re: &Regex, text: &str) -> Option<i32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn capture_f32(re: &Regex, text: &str) -> Option<f32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
