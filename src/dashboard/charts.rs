//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for expense data:
//! - **Expense Trend**: Line chart of the time-bucketed totals
//! - **Expenses by Category**: Donut chart of the per-category totals
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregator::{CategoryTotal, TimeSeriesPoint},
    expense::category_label,
    time_range::TimeRange,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// The script runs as soon as it is inserted, so it must be placed after the
/// chart containers. This also lets HTMX run it again after swapping in new
/// dashboard content. Charts from an earlier swap are disposed of and the
/// window listeners are only added once per page.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let setup = r#"(function() {
        window.dashboardCharts = window.dashboardCharts || {};
        if (window.dashboardChartListenersAdded) {
            return;
        }
        window.dashboardChartListenersAdded = true;

        const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
        const forEachChart = (callback) => Object.values(window.dashboardCharts).forEach(callback);

        window.addEventListener('resize', () => forEachChart((chart) => chart.resize()));
        darkModeMediaQuery.addEventListener('change', () => {
            const theme = darkModeMediaQuery.matches ? 'dark' : 'default';
            forEachChart((chart) => chart.setTheme(theme));
        });
    })();"#;

    let chart_scripts = charts.iter().map(|chart| {
        format!(
            r#"(function() {{
                const charts = window.dashboardCharts;
                if (charts["{id}"]) {{
                    charts["{id}"].dispose();
                }}

                const chartDom = document.getElementById("{id}");
                const chart = echarts.init(chartDom);
                const option = {options};
                chart.setOption(option);

                const isDarkMode = window.matchMedia('(prefers-color-scheme: dark)').matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
                charts["{id}"] = chart;
            }})();"#,
            id = chart.id,
            options = escape_script_text(&chart.options),
        )
    });

    let script_content = std::iter::once(setup.to_owned())
        .chain(chart_scripts)
        .collect::<Vec<_>>()
        .join("\n");

    html!(
        script { (PreEscaped(script_content)) }
    )
}

/// Escapes text that is embedded in a script element so it cannot close the
/// element or open an HTML comment.
///
/// `<\/` and `<\!` read the same as `</` and `<!` inside JavaScript strings.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/").replace("<!", "<\\!")
}

pub(super) fn expense_trend_chart(time_series: &[TimeSeriesPoint], time_range: TimeRange) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = time_series
        .iter()
        .map(|point| (point.bucket_key.clone(), point.amount))
        .unzip();

    Chart::new()
        .title(
            Title::new()
                .text("Expense Trend")
                .subtext(time_range.label()),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Expenses").data(values))
}

pub(super) fn category_chart(category_totals: &[CategoryTotal], time_range: TimeRange) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|total| (total.total, category_label(&total.category)))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .subtext(time_range.label()),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name("Category")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use crate::{
        aggregator::{CategoryTotal, TimeSeriesPoint},
        time_range::TimeRange,
    };

    use super::{DashboardChart, category_chart, charts_script, expense_trend_chart};

    #[test]
    fn trend_chart_uses_bucket_keys_as_labels() {
        let series = vec![
            TimeSeriesPoint {
                bucket_key: "Mon".to_owned(),
                amount: 12.5,
            },
            TimeSeriesPoint {
                bucket_key: "Tue".to_owned(),
                amount: 3.0,
            },
        ];

        let options = expense_trend_chart(&series, TimeRange::Week).to_string();

        assert!(options.contains("\"Mon\""), "{options}");
        assert!(options.contains("\"Tue\""), "{options}");
        assert!(options.contains("12.5"), "{options}");
        assert!(options.contains("Last Week"), "{options}");
    }

    #[test]
    fn category_chart_uses_category_labels() {
        let totals = vec![CategoryTotal {
            category: "travel".to_owned(),
            total: 250.0,
        }];

        let options = category_chart(&totals, TimeRange::Month).to_string();

        assert!(options.contains("\"Travel\""), "{options}");
        assert!(!options.contains("\"travel\""), "{options}");
    }

    #[test]
    fn category_names_cannot_close_the_script() {
        let totals = vec![CategoryTotal {
            category: "</script><script>alert(1)</script>".to_owned(),
            total: 5.0,
        }];
        let charts = [DashboardChart {
            id: "category-chart",
            options: category_chart(&totals, TimeRange::Month).to_string(),
        }];

        let script = charts_script(&charts).into_string();

        assert_eq!(script.matches("</script>").count(), 1, "{script}");
        assert!(script.ends_with("</script>"), "{script}");
        assert!(script.contains(r"<\/script><script>alert(1)<\/script>"), "{script}");
    }

    #[test]
    fn script_disposes_charts_from_earlier_renders() {
        let charts = [DashboardChart {
            id: "first-chart",
            options: "{}".to_owned(),
        }];

        let script = charts_script(&charts).into_string();

        assert!(script.contains(r#"charts["first-chart"].dispose()"#));
        assert_eq!(script.matches("addEventListener('resize'").count(), 1);
    }

    #[test]
    fn script_initializes_each_chart() {
        let charts = [
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let script = charts_script(&charts).into_string();

        assert!(script.starts_with("<script>"));
        assert!(script.contains("document.getElementById(\"first-chart\")"));
        assert!(script.contains("document.getElementById(\"second-chart\")"));
    }
}
