// Chart renderer - builds a categorical bar chart and mounts it on a container
use crate::domain::chart::{
    palette_color, Appear, AxisOptions, BarChart, CategoryAxis, ChartSeriesPoint, ChartSettings,
    Column, ColumnSeries, ColorScheme, Cursor, Theme, TitleLabel, ValueAxis, CATEGORY_FIELD,
    PALETTE,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Anything a chart can be mounted on.
pub trait ChartContainer {
    fn mount(&mut self, chart: BarChart);
}

/// Source of the viewer's light/dark preference.
pub trait ColorSchemePreference {
    fn color_scheme(&self) -> ColorScheme;
}

impl ColorSchemePreference for ColorScheme {
    fn color_scheme(&self) -> ColorScheme {
        *self
    }
}

/// A named slot on the page holding every chart mounted on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartCanvas {
    pub id: String,
    pub charts: Vec<BarChart>,
}

impl ChartCanvas {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            charts: Vec::new(),
        }
    }
}

impl ChartContainer for ChartCanvas {
    fn mount(&mut self, chart: BarChart) {
        self.charts.push(chart);
    }
}

pub struct ChartRenderer<P> {
    preference: P,
}

impl<P: ColorSchemePreference> ChartRenderer<P> {
    pub fn new(preference: P) -> Self {
        Self { preference }
    }

    /// Configure a bar chart of `value_field` per category and mount it.
    ///
    /// Every call mounts a new chart; the color scheme is read once per call.
    /// Records missing `value_field` produce a column without a value.
    pub fn render<C: ChartContainer + ?Sized>(
        &self,
        container: &mut C,
        title: &str,
        value_field: &str,
        data: &[ChartSeriesPoint],
        axis_options: Option<&AxisOptions>,
    ) {
        let mut themes = vec![Theme::Animated];
        if self.preference.color_scheme() == ColorScheme::Dark {
            themes.push(Theme::Dark);
        }

        let columns: Vec<Column> = data
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let color = palette_color(index);
                Column {
                    category: point.category.clone(),
                    value: point.value(value_field),
                    fill: color,
                    stroke: color,
                }
            })
            .collect();

        let chart = BarChart {
            themes,
            chart: ChartSettings::default(),
            cursor: Cursor {
                line_y_visible: false,
            },
            x_axis: CategoryAxis {
                category_field: CATEGORY_FIELD.to_string(),
                max_deviation: 0.3,
                grid_location: 1,
                tooltip: true,
                categories: data.iter().map(|p| p.category.clone()).collect(),
            },
            y_axis: ValueAxis {
                settings: value_axis_settings(axis_options),
            },
            title: TitleLabel {
                text: title.to_string(),
                font_size: 25,
                font_weight: "400".to_string(),
                centered: true,
            },
            palette: PALETTE.to_vec(),
            series: ColumnSeries {
                name: title.to_string(),
                value_field: value_field.to_string(),
                category_field: CATEGORY_FIELD.to_string(),
                sequenced_interpolation: true,
                tooltip_text: "{valueY}".to_string(),
                corner_radius: 5,
                stroke_opacity: 0.0,
                columns,
            },
            appear: Appear::default(),
        };

        tracing::debug!(
            title,
            value_field,
            categories = chart.x_axis.categories.len(),
            "mounting bar chart"
        );
        container.mount(chart);
    }
}

fn value_axis_settings(overrides: Option<&AxisOptions>) -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert("maxDeviation".to_string(), json!(0.3));
    settings.insert("min".to_string(), json!(0));
    settings.insert("strokeOpacity".to_string(), json!(0.1));
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            settings.insert(key.clone(), value.clone());
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingPreference {
        scheme: ColorScheme,
        reads: Cell<usize>,
    }

    impl ColorSchemePreference for CountingPreference {
        fn color_scheme(&self) -> ColorScheme {
            self.reads.set(self.reads.get() + 1);
            self.scheme
        }
    }

    fn points(n: usize) -> Vec<ChartSeriesPoint> {
        (0..n)
            .map(|i| ChartSeriesPoint::new(format!("type {}", i)).with_value("cost", i as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_one_chart_with_cyclic_colors() {
        let renderer = ChartRenderer::new(ColorScheme::Light);
        let mut canvas = ChartCanvas::new("cost-chart");
        renderer.render(&mut canvas, "Cost", "cost", &points(5), None);

        assert_eq!(canvas.charts.len(), 1);
        let chart = &canvas.charts[0];
        assert_eq!(chart.x_axis.categories.len(), 5);
        assert_eq!(chart.series.columns.len(), 5);
        for (i, column) in chart.series.columns.iter().enumerate() {
            assert_eq!(column.fill, PALETTE[i % 2]);
            assert_eq!(column.stroke, column.fill);
            assert_eq!(column.value, Some(i as f64 * 10.0));
        }
        assert_eq!(chart.themes, vec![Theme::Animated]);
        assert_eq!(chart.appear.series_ms, 1000);
        assert_eq!(chart.appear.chart_delay_ms, 100);
    }

    #[test]
    fn test_dark_preference_read_once() {
        let preference = CountingPreference {
            scheme: ColorScheme::Dark,
            reads: Cell::new(0),
        };
        let renderer = ChartRenderer::new(preference);
        let mut canvas = ChartCanvas::new("c");
        renderer.render(&mut canvas, "Cost", "cost", &points(3), None);

        assert_eq!(renderer.preference.reads.get(), 1);
        assert_eq!(canvas.charts[0].themes, vec![Theme::Animated, Theme::Dark]);
    }

    #[test]
    fn test_render_twice_mounts_two_charts() {
        let renderer = ChartRenderer::new(ColorScheme::Light);
        let mut canvas = ChartCanvas::new("c");
        renderer.render(&mut canvas, "A", "cost", &points(2), None);
        renderer.render(&mut canvas, "A", "cost", &points(2), None);
        assert_eq!(canvas.charts.len(), 2);
    }

    #[test]
    fn test_empty_data_and_missing_field() {
        let renderer = ChartRenderer::new(ColorScheme::Light);
        let mut canvas = ChartCanvas::new("c");
        renderer.render(&mut canvas, "Empty", "cost", &[], None);
        renderer.render(&mut canvas, "Missing", "co2", &points(2), None);

        assert!(canvas.charts[0].series.columns.is_empty());
        assert!(canvas.charts[0].x_axis.categories.is_empty());
        assert!(canvas.charts[1].series.columns.iter().all(|c| c.value.is_none()));
    }

    #[test]
    fn test_axis_overrides_win() {
        let renderer = ChartRenderer::new(ColorScheme::Light);
        let mut canvas = ChartCanvas::new("c");
        let mut options = AxisOptions::new();
        options.insert("min".to_string(), json!(-5));
        options.insert("numberFormat".to_string(), json!("#.###"));
        renderer.render(&mut canvas, "Co2", "cost", &points(1), Some(&options));

        let settings = &canvas.charts[0].y_axis.settings;
        assert_eq!(settings["min"], json!(-5));
        assert_eq!(settings["numberFormat"], json!("#.###"));
        assert_eq!(settings["maxDeviation"], json!(0.3));
    }

    #[test]
    fn test_serialized_document() {
        let renderer = ChartRenderer::new(ColorScheme::Light);
        let mut canvas = ChartCanvas::new("cost-chart");
        renderer.render(&mut canvas, "Cost", "cost", &points(2), None);

        let json = serde_json::to_value(&canvas).unwrap();
        assert_eq!(json["id"], "cost-chart");
        assert_eq!(json["charts"][0]["palette"], json!(["#800020", "#04aa6d"]));
        assert_eq!(json["charts"][0]["xAxis"]["categoryField"], "heating_type");
        assert_eq!(json["charts"][0]["series"]["columns"][1]["fill"], "#04aa6d");
    }
}
