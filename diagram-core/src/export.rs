//! Export configuration handed to the diagram renderer.
//!
//! The renderer itself lives outside this crate; it receives a complete
//! [`ExportConfig`] per export action. Presets are stored fully merged: each
//! one is built from a base default once, when the preset list is created,
//! and is returned verbatim afterwards.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{DiagramError, DiagramResult};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG raster image.
    Png,
    /// JPEG raster image.
    Jpeg,
    /// SVG vector graphics.
    Svg,
    /// Paginated PDF document.
    Pdf,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type of the rendered file.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }

    /// Whether `quality` affects the output.
    #[must_use]
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }

    /// Whether the output is resolution independent.
    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::Svg | Self::Pdf)
    }
}

/// Scale choice offered in the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScale {
    /// 1x.
    #[serde(rename = "1x")]
    X1,
    /// 2x.
    #[serde(rename = "2x")]
    X2,
    /// 4x.
    #[serde(rename = "4x")]
    X4,
    /// Any other positive multiplier.
    Custom(f32),
}

impl ExportScale {
    /// Numeric multiplier.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::X1 => 1.0,
            Self::X2 => 2.0,
            Self::X4 => 4.0,
            Self::Custom(value) => value,
        }
    }

    /// Map a multiplier back to the matching choice.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_factor(factor: f32) -> Self {
        if factor == 1.0 {
            Self::X1
        } else if factor == 2.0 {
            Self::X2
        } else if factor == 4.0 {
            Self::X4
        } else {
            Self::Custom(factor)
        }
    }
}

/// A calendar date in UTC, used to name exported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExportDate {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
}

impl ExportDate {
    /// Create a date. Values are not range checked.
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Today's date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self::from(Utc::now().date_naive())
    }
}

impl From<NaiveDate> for ExportDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl std::fmt::Display for ExportDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Everything the renderer needs to produce an output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Output format.
    pub format: ExportFormat,
    /// Positive size multiplier.
    pub scale: f32,
    /// Whether to paint a background behind the content.
    pub include_background: bool,
    /// Background color as hex. Ignored when `include_background` is false.
    pub background_color: String,
    /// Margin around the content bounds, in pixels.
    pub padding: u32,
    /// File name without extension.
    pub filename: String,
    /// Encoder quality in [0, 1]. Only used by lossy formats.
    pub quality: f32,
}

impl ExportConfig {
    /// Default scale multiplier.
    pub const DEFAULT_SCALE: f32 = 2.0;
    /// Default background color.
    pub const DEFAULT_BACKGROUND: &'static str = "#ffffff";
    /// Default padding in pixels.
    pub const DEFAULT_PADDING: u32 = 40;
    /// Default encoder quality.
    pub const DEFAULT_QUALITY: f32 = 0.95;

    /// The baseline configuration for files exported on `date`.
    #[must_use]
    pub fn default_for(date: ExportDate) -> Self {
        Self {
            format: ExportFormat::Png,
            scale: Self::DEFAULT_SCALE,
            include_background: true,
            background_color: Self::DEFAULT_BACKGROUND.to_string(),
            padding: Self::DEFAULT_PADDING,
            filename: format!("diagram-{date}"),
            quality: Self::DEFAULT_QUALITY,
        }
    }

    /// Scale as a dialog choice.
    #[must_use]
    pub fn scale_choice(&self) -> ExportScale {
        ExportScale::from_factor(self.scale)
    }

    /// File name including the format's extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, self.format.extension())
    }

    /// Check the configuration before handing it to a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidExportConfig`] describing the first
    /// problem found.
    pub fn validate(&self) -> DiagramResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid(format!("scale must be positive, got {}", self.scale)));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(invalid(format!(
                "quality must be within [0, 1], got {}",
                self.quality
            )));
        }
        if self.filename.trim().is_empty() {
            return Err(invalid("filename is empty".to_string()));
        }
        if self.include_background && !is_hex_color(&self.background_color) {
            return Err(invalid(format!(
                "background color '{}' is not a hex color",
                self.background_color
            )));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        resolve_default()
    }
}

fn invalid(message: String) -> DiagramError {
    DiagramError::InvalidExportConfig(message)
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// A named, fully resolved alternative to the default configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPreset {
    /// Unique key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description for the export dialog.
    pub description: String,
    /// Complete configuration.
    pub config: ExportConfig,
}

impl ExportPreset {
    fn derived(
        id: &str,
        name: &str,
        description: &str,
        base: &ExportConfig,
        overrides: impl FnOnce(&mut ExportConfig),
    ) -> Self {
        let mut config = base.clone();
        overrides(&mut config);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            config,
        }
    }
}

/// Id of the high resolution PNG preset.
pub const PRESET_HIGH_RES_PNG: &str = "high-res-png";
/// Id of the web PNG preset.
pub const PRESET_WEB_OPTIMIZED: &str = "web-optimized";
/// Id of the print PDF preset.
pub const PRESET_PRINT_PDF: &str = "print-pdf";
/// Id of the SVG preset.
pub const PRESET_VECTOR_SVG: &str = "vector-svg";

/// The fixed preset list, merged onto a base configuration once.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportModel {
    base: ExportConfig,
    presets: Vec<ExportPreset>,
}

impl Default for ExportModel {
    fn default() -> Self {
        Self::new(resolve_default())
    }
}

impl ExportModel {
    /// Build the preset list from `base`.
    ///
    /// Later changes to the default configuration do not affect presets
    /// built here.
    #[must_use]
    pub fn new(base: ExportConfig) -> Self {
        let presets = vec![
            ExportPreset::derived(
                PRESET_HIGH_RES_PNG,
                "High-Res PNG",
                "For presentations and printing",
                &base,
                |c| {
                    c.format = ExportFormat::Png;
                    c.scale = 3.0;
                    c.padding = 60;
                },
            ),
            ExportPreset::derived(
                PRESET_WEB_OPTIMIZED,
                "Web Optimized",
                "For websites and documentation",
                &base,
                |c| {
                    c.format = ExportFormat::Png;
                    c.scale = 2.0;
                    c.quality = 0.9;
                },
            ),
            ExportPreset::derived(
                PRESET_PRINT_PDF,
                "Print PDF",
                "Vector PDF for printing",
                &base,
                |c| {
                    c.format = ExportFormat::Pdf;
                    c.scale = 1.0;
                    // one inch at 72 dpi
                    c.padding = 72;
                },
            ),
            ExportPreset::derived(
                PRESET_VECTOR_SVG,
                "Vector SVG",
                "Scalable vector graphics",
                &base,
                |c| {
                    c.format = ExportFormat::Svg;
                    c.scale = 1.0;
                    c.filename = "diagram-vector".to_string();
                },
            ),
        ];
        Self { base, presets }
    }

    /// Build the preset list from the default configuration for `date`.
    #[must_use]
    pub fn for_date(date: ExportDate) -> Self {
        Self::new(ExportConfig::default_for(date))
    }

    /// The configuration presets were built from.
    #[must_use]
    pub fn base(&self) -> &ExportConfig {
        &self.base
    }

    /// All presets, in dialog order.
    #[must_use]
    pub fn presets(&self) -> &[ExportPreset] {
        &self.presets
    }

    /// Find a preset by id.
    #[must_use]
    pub fn preset(&self, id: &str) -> Option<&ExportPreset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// Resolve a preset id to its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownPreset`] if no preset has that id.
    pub fn resolve(&self, id: &str) -> DiagramResult<ExportConfig> {
        self.preset(id)
            .map(apply_preset)
            .ok_or_else(|| DiagramError::UnknownPreset(id.to_string()))
    }
}

/// The baseline configuration, named after today's date.
#[must_use]
pub fn resolve_default() -> ExportConfig {
    ExportConfig::default_for(ExportDate::today())
}

/// The configuration stored in `preset`, unchanged.
#[must_use]
pub fn apply_preset(preset: &ExportPreset) -> ExportConfig {
    preset.config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: ExportDate = ExportDate::new(2026, 10, 17);

    #[test]
    fn default_config_values() {
        let config = ExportConfig::default_for(DATE);
        assert_eq!(config.format, ExportFormat::Png);
        assert!((config.scale - 2.0).abs() < f32::EPSILON);
        assert!(config.include_background);
        assert_eq!(config.background_color, "#ffffff");
        assert_eq!(config.padding, 40);
        assert!((config.quality - 0.95).abs() < f32::EPSILON);
        assert_eq!(config.filename, "diagram-2026-10-17");
        assert_eq!(config.file_name(), "diagram-2026-10-17.png");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn print_pdf_preset() {
        let model = ExportModel::for_date(DATE);
        let preset = model.preset(PRESET_PRINT_PDF).expect("preset exists");
        let config = apply_preset(preset);
        assert_eq!(
            config,
            ExportConfig {
                format: ExportFormat::Pdf,
                scale: 1.0,
                include_background: true,
                background_color: "#ffffff".to_string(),
                padding: 72,
                filename: "diagram-2026-10-17".to_string(),
                quality: 0.95,
            }
        );
    }

    #[test]
    fn every_preset_is_complete_and_valid() {
        let model = ExportModel::for_date(DATE);
        let ids: Vec<_> = model.presets().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                PRESET_HIGH_RES_PNG,
                PRESET_WEB_OPTIMIZED,
                PRESET_PRINT_PDF,
                PRESET_VECTOR_SVG
            ]
        );
        for preset in model.presets() {
            let config = apply_preset(preset);
            assert!(config.validate().is_ok(), "{} should validate", preset.id);
            let value = serde_json::to_value(&config).expect("serialize");
            for field in [
                "format",
                "scale",
                "includeBackground",
                "backgroundColor",
                "padding",
                "filename",
                "quality",
            ] {
                assert!(!value[field].is_null(), "{} missing {field}", preset.id);
            }
        }
    }

    #[test]
    fn presets_override_only_their_fields() {
        let model = ExportModel::for_date(DATE);
        let high = model.resolve(PRESET_HIGH_RES_PNG).expect("preset exists");
        assert!((high.scale - 3.0).abs() < f32::EPSILON);
        assert_eq!(high.padding, 60);
        assert!((high.quality - 0.95).abs() < f32::EPSILON);

        let web = model.resolve(PRESET_WEB_OPTIMIZED).expect("preset exists");
        assert!((web.quality - 0.9).abs() < f32::EPSILON);
        assert_eq!(web.padding, 40);

        let svg = model.resolve(PRESET_VECTOR_SVG).expect("preset exists");
        assert_eq!(svg.file_name(), "diagram-vector.svg");
    }

    #[test]
    fn presets_are_frozen_at_definition() {
        let mut base = ExportConfig::default_for(DATE);
        let model = ExportModel::new(base.clone());
        base.background_color = "#000000".to_string();
        let pdf = model.resolve(PRESET_PRINT_PDF).expect("preset exists");
        assert_eq!(pdf.background_color, "#ffffff");
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let model = ExportModel::for_date(DATE);
        assert!(matches!(
            model.resolve("poster"),
            Err(DiagramError::UnknownPreset(ref id)) if id == "poster"
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = ExportConfig::default_for(DATE);

        let mut config = base.clone();
        config.scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.scale = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.quality = 1.5;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.filename = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.background_color = "white".to_string();
        assert!(config.validate().is_err());
        config.include_background = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scale_choices_round_trip_factor() {
        assert_eq!(ExportScale::from_factor(2.0), ExportScale::X2);
        assert_eq!(ExportScale::from_factor(3.0), ExportScale::Custom(3.0));
        assert!((ExportScale::X4.factor() - 4.0).abs() < f32::EPSILON);
        let json = serde_json::to_string(&ExportScale::X1).expect("serialize");
        assert_eq!(json, r#""1x""#);
    }

    #[test]
    fn format_metadata() {
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert!(ExportFormat::Jpeg.is_lossy());
        assert!(!ExportFormat::Png.is_lossy());
        assert!(ExportFormat::Pdf.is_vector());
        assert_eq!(ExportFormat::Svg.mime_type(), "image/svg+xml");
        let json = serde_json::to_string(&ExportFormat::Pdf).expect("serialize");
        assert_eq!(json, r#""pdf""#);
    }

    #[test]
    fn dates_from_calendar() {
        let leap = NaiveDate::from_ymd_opt(2000, 2, 29).expect("valid date");
        assert_eq!(ExportDate::from(leap), ExportDate::new(2000, 2, 29));
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");
        assert_eq!(ExportDate::from(epoch).to_string(), "1970-01-01");
        assert_eq!(ExportDate::new(2026, 3, 5).to_string(), "2026-03-05");
        let today = ExportDate::today();
        assert_eq!(today.to_string().len(), 10);
    }
}
