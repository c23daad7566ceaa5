// Bar chart domain model - the document a client-side chart library draws
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Field that holds the category label in every data record.
pub const CATEGORY_FIELD: &str = "heating_type";

/// Two-tone palette applied cyclically across columns.
pub const PALETTE: [Color; 2] = [Color(0x800020), Color(0x04AA6D)];

pub const SERIES_APPEAR_MS: u32 = 1000;
pub const CHART_APPEAR_MS: u32 = 1000;
pub const CHART_APPEAR_DELAY_MS: u32 = 100;

/// One category record, e.g. `{"heating_type": "Heat Pump", "cost": 412.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesPoint {
    #[serde(rename = "heating_type")]
    pub category: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl ChartSeriesPoint {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

/// Value-axis overrides, merged over the renderer defaults.
pub type AxisOptions = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0 & 0xFF_FFFF)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Theme {
    Animated,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    pub pan_x: bool,
    pub pan_y: bool,
    pub wheel_x: String,
    pub wheel_y: String,
    pub pinch_zoom_x: bool,
    pub padding_left: u32,
    pub padding_right: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            pan_x: true,
            pan_y: true,
            wheel_x: "panX".to_string(),
            wheel_y: "zoomX".to_string(),
            pinch_zoom_x: true,
            padding_left: 0,
            padding_right: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub line_y_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    pub category_field: String,
    pub max_deviation: f64,
    pub grid_location: u32,
    pub tooltip: bool,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub settings: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleLabel {
    pub text: String,
    pub font_size: u32,
    pub font_weight: String,
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub category: String,
    pub value: Option<f64>,
    pub fill: Color,
    pub stroke: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSeries {
    pub name: String,
    pub value_field: String,
    pub category_field: String,
    pub sequenced_interpolation: bool,
    pub tooltip_text: String,
    pub corner_radius: u32,
    pub stroke_opacity: f64,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appear {
    pub series_ms: u32,
    pub chart_ms: u32,
    pub chart_delay_ms: u32,
}

impl Default for Appear {
    fn default() -> Self {
        Self {
            series_ms: SERIES_APPEAR_MS,
            chart_ms: CHART_APPEAR_MS,
            chart_delay_ms: CHART_APPEAR_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub themes: Vec<Theme>,
    pub chart: ChartSettings,
    pub cursor: Cursor,
    pub x_axis: CategoryAxis,
    pub y_axis: ValueAxis,
    pub title: TitleLabel,
    pub palette: Vec<Color>,
    pub series: ColumnSeries,
    pub appear: Appear,
}
