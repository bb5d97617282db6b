use serde::{Deserialize, Serialize};

/// Recognition engine selection (Tesseract `--oem`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EngineMode {
    /// Legacy engine only.
    Legacy,
    /// Neural-net LSTM engine only.
    LstmOnly,
    /// Legacy and LSTM engines combined.
    LegacyAndLstm,
    /// Whichever engines are available.
    #[default]
    Default,
}

impl EngineMode {
    /// The numeric `--oem` value.
    pub fn code(self) -> i32 {
        match self {
            EngineMode::Legacy => 0,
            EngineMode::LstmOnly => 1,
            EngineMode::LegacyAndLstm => 2,
            EngineMode::Default => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(EngineMode::Legacy),
            1 => Some(EngineMode::LstmOnly),
            2 => Some(EngineMode::LegacyAndLstm),
            3 => Some(EngineMode::Default),
            _ => None,
        }
    }
}

/// Page segmentation mode (Tesseract `--psm`): the layout assumption the
/// engine works under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PageSegMode {
    /// Orientation and script detection only, no recognition.
    OsdOnly,
    /// Automatic segmentation with orientation/script detection.
    AutoWithOsd,
    /// Automatic segmentation, no OSD and no recognition.
    AutoNoOsd,
    /// Fully automatic segmentation without OSD.
    #[default]
    Auto,
    /// Assume a single column of text.
    SingleColumn,
    /// Assume a single uniform block of vertical text.
    SingleVerticalBlock,
    /// Assume a single uniform block of text.
    SingleBlock,
    /// Treat the image as a single text line.
    SingleLine,
    /// Treat the image as a single word.
    SingleWord,
    /// Treat the image as a single word in a circle.
    CircleWord,
    /// Treat the image as a single character.
    SingleChar,
    /// Find as much text as possible in no particular order.
    SparseText,
    /// Sparse text with orientation/script detection.
    SparseTextWithOsd,
    /// Treat the image as a raw line, bypassing Tesseract-specific hacks.
    RawLine,
}

impl PageSegMode {
    /// The numeric `--psm` value.
    pub fn code(self) -> i32 {
        match self {
            PageSegMode::OsdOnly => 0,
            PageSegMode::AutoWithOsd => 1,
            PageSegMode::AutoNoOsd => 2,
            PageSegMode::Auto => 3,
            PageSegMode::SingleColumn => 4,
            PageSegMode::SingleVerticalBlock => 5,
            PageSegMode::SingleBlock => 6,
            PageSegMode::SingleLine => 7,
            PageSegMode::SingleWord => 8,
            PageSegMode::CircleWord => 9,
            PageSegMode::SingleChar => 10,
            PageSegMode::SparseText => 11,
            PageSegMode::SparseTextWithOsd => 12,
            PageSegMode::RawLine => 13,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PageSegMode::OsdOnly),
            1 => Some(PageSegMode::AutoWithOsd),
            2 => Some(PageSegMode::AutoNoOsd),
            3 => Some(PageSegMode::Auto),
            4 => Some(PageSegMode::SingleColumn),
            5 => Some(PageSegMode::SingleVerticalBlock),
            6 => Some(PageSegMode::SingleBlock),
            7 => Some(PageSegMode::SingleLine),
            8 => Some(PageSegMode::SingleWord),
            9 => Some(PageSegMode::CircleWord),
            10 => Some(PageSegMode::SingleChar),
            11 => Some(PageSegMode::SparseText),
            12 => Some(PageSegMode::SparseTextWithOsd),
            13 => Some(PageSegMode::RawLine),
            _ => None,
        }
    }
}

/// Engine flags for a single invocation.
///
/// Passed by reference on every call; the engine holds no process-wide
/// configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Language code(s) as the engine understands them, e.g. "eng", "ara",
    /// or "eng+fra".
    pub language: String,
    pub engine_mode: EngineMode,
    pub page_seg_mode: PageSegMode,
    /// Source resolution hint; `None` lets the engine estimate it.
    pub dpi: Option<i32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            engine_mode: EngineMode::Default,
            page_seg_mode: PageSegMode::Auto,
            dpi: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_mode_codes_roundtrip() {
        for code in 0..=3 {
            let mode = EngineMode::from_code(code).unwrap();
            assert_eq!(mode.code(), code);
        }
    }

    #[test]
    fn engine_mode_unknown_code_is_none() {
        assert_eq!(EngineMode::from_code(-1), None);
        assert_eq!(EngineMode::from_code(4), None);
    }

    #[test]
    fn page_seg_mode_codes_roundtrip() {
        for code in 0..=13 {
            let mode = PageSegMode::from_code(code).unwrap();
            assert_eq!(mode.code(), code);
        }
    }

    #[test]
    fn page_seg_mode_unknown_code_is_none() {
        assert_eq!(PageSegMode::from_code(14), None);
        assert_eq!(PageSegMode::from_code(-1), None);
    }

    #[test]
    fn default_config_targets_english_auto() {
        let config = EngineConfig::default();
        assert_eq!(config.language, "eng");
        assert_eq!(config.engine_mode, EngineMode::Default);
        assert_eq!(config.page_seg_mode, PageSegMode::Auto);
        assert_eq!(config.dpi, None);
    }
}
