//! Human-friendly and machine-friendly output for a [`Forecast`].

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use forecast_core::{Forecast, ForecastRow};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const CHART_WIDTH: usize = 40;
const FEED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shorten `"2024-01-01 06:00:00~2024-01-01 18:00:00"` to `"01/01 06:00 ~ 01/01 18:00"`.
/// Keys in any other format are returned unchanged.
pub fn short_interval(interval: &str) -> String {
    let Some((start, end)) = interval.split_once('~') else {
        return interval.to_string();
    };

    match (
        NaiveDateTime::parse_from_str(start, FEED_TIME_FORMAT),
        NaiveDateTime::parse_from_str(end, FEED_TIME_FORMAT),
    ) {
        (Ok(start), Ok(end)) => {
            format!("{} ~ {}", start.format("%m/%d %H:%M"), end.format("%m/%d %H:%M"))
        }
        _ => interval.to_string(),
    }
}

// Pad by display width so CJK descriptions line up.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{s}", " ".repeat(fill))
}

pub fn render_table(forecast: &Forecast) -> String {
    let header = ["interval", "description", "rain_probability", "max_temp", "min_temp"];

    let cells: Vec<[String; 5]> = forecast
        .rows
        .iter()
        .map(|row| {
            [
                short_interval(&row.interval),
                row.description.clone(),
                format!("{:.0}%", row.rain_probability),
                format!("{:.1}", row.max_temp),
                format!("{:.1}", row.min_temp),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.width());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    let line = |cols: [&str; 5]| -> String {
        let mut parts = Vec::with_capacity(5);
        for (i, col) in cols.iter().enumerate() {
            // Text columns left-aligned, numbers right-aligned.
            if i < 2 {
                parts.push(pad(col, widths[i]));
            } else {
                parts.push(pad_left(col, widths[i]));
            }
        }
        parts.join("  ").trim_end().to_string()
    };

    out.push_str(&line(header));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');
    for row in &cells {
        out.push_str(&line([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
        ]));
        out.push('\n');
    }
    out
}

fn label_width(rows: &[ForecastRow]) -> usize {
    rows.iter().map(|r| short_interval(&r.interval).width()).max().unwrap_or(0)
}

/// Min..max temperature range per interval on a shared scale.
pub fn render_temperature_chart(rows: &[ForecastRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let lo = rows.iter().map(|r| r.min_temp.min(r.max_temp)).fold(f64::INFINITY, f64::min);
    let hi = rows.iter().map(|r| r.max_temp.max(r.min_temp)).fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    let position = |v: f64| -> usize {
        if span <= 0.0 {
            return 0;
        }
        (((v - lo) / span) * (CHART_WIDTH - 1) as f64).round() as usize
    };

    let label_width = label_width(rows);
    let mut out = String::new();

    for row in rows {
        let a = position(row.min_temp);
        let b = position(row.max_temp);
        let (from, to) = (a.min(b), a.max(b));

        let mut bar = vec![' '; CHART_WIDTH];
        for c in bar.iter_mut().take(to + 1).skip(from) {
            *c = '─';
        }
        bar[from] = '●';
        bar[to] = '●';

        out.push_str(&format!(
            "{} |{}| {:.1} .. {:.1}\n",
            pad(&short_interval(&row.interval), label_width),
            bar.iter().collect::<String>(),
            row.min_temp,
            row.max_temp,
        ));
    }
    out
}

/// One bar per interval, full width at 100%.
pub fn render_rain_chart(rows: &[ForecastRow]) -> String {
    let label_width = label_width(rows);
    let mut out = String::new();

    for row in rows {
        let pct = row.rain_probability.clamp(0.0, 100.0);
        let len = ((pct / 100.0) * CHART_WIDTH as f64).round() as usize;

        out.push_str(&format!(
            "{} |{}{}| {:.0}%\n",
            pad(&short_interval(&row.interval), label_width),
            "█".repeat(len),
            " ".repeat(CHART_WIDTH - len),
            row.rain_probability,
        ));
    }
    out
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize forecast to JSON")
}

pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row).context("Failed to write CSV row")?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(interval: &str, description: &str, pop: f64, max: f64, min: f64) -> ForecastRow {
        ForecastRow {
            interval: interval.to_string(),
            description: description.to_string(),
            rain_probability: pop,
            max_temp: max,
            min_temp: min,
        }
    }

    fn forecast() -> Forecast {
        Forecast {
            location: "嘉義縣".into(),
            rows: vec![
                row("2024-01-01 06:00:00~2024-01-01 18:00:00", "多雲時晴", 10.0, 24.0, 17.0),
                row("2024-01-01 18:00:00~2024-01-02 06:00:00", "晴", 100.0, 19.0, 14.0),
            ],
        }
    }

    #[test]
    fn short_interval_formats_feed_timestamps() {
        assert_eq!(
            short_interval("2024-01-01 06:00:00~2024-01-01 18:00:00"),
            "01/01 06:00 ~ 01/01 18:00"
        );
    }

    #[test]
    fn short_interval_leaves_other_formats_alone() {
        let iso = "2024-01-01T06:00~2024-01-01T18:00";
        assert_eq!(short_interval(iso), iso);
        assert_eq!(short_interval("no separator"), "no separator");
    }

    #[test]
    fn table_aligns_wide_characters() {
        let table = render_table(&forecast());
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("interval"));
        assert!(lines[2].contains("多雲時晴"));
        assert!(lines[2].ends_with("24.0      17.0"));

        // Every data row has the same display width as the separator.
        let sep_width = lines[1].width();
        assert_eq!(lines[2].width(), sep_width);
        assert_eq!(lines[3].width(), sep_width);
    }

    #[test]
    fn rain_chart_scales_to_width() {
        let chart = render_rain_chart(&forecast().rows);
        let lines: Vec<_> = chart.lines().collect();

        assert_eq!(lines[0].matches('█').count(), 4);
        assert!(lines[0].ends_with("| 10%"));
        assert_eq!(lines[1].matches('█').count(), CHART_WIDTH);
        assert!(lines[1].ends_with("| 100%"));
    }

    #[test]
    fn rain_chart_clamps_out_of_range_values() {
        let chart = render_rain_chart(&[row("a~b", "x", 150.0, 0.0, 0.0)]);
        assert_eq!(chart.matches('█').count(), CHART_WIDTH);
    }

    #[test]
    fn temperature_chart_marks_both_ends() {
        let chart = render_temperature_chart(&forecast().rows);
        let lines: Vec<_> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('●').count(), 2);
        assert!(lines[0].ends_with("17.0 .. 24.0"));
        // Coldest minimum sits at the left edge of the scale.
        assert!(lines[1].contains("|●"));
    }

    #[test]
    fn temperature_chart_handles_flat_series() {
        let chart = render_temperature_chart(&[row("a~b", "x", 0.0, 0.0, 0.0)]);
        assert_eq!(chart.matches('●').count(), 1);
        assert!(render_temperature_chart(&[]).is_empty());
    }

    #[test]
    fn csv_uses_column_names_as_header() {
        let out = to_csv(&forecast().rows).expect("csv");
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("interval,description,rain_probability,max_temp,min_temp")
        );
        assert_eq!(
            lines.next(),
            Some("2024-01-01 06:00:00~2024-01-01 18:00:00,多雲時晴,10.0,24.0,17.0")
        );
    }

    #[test]
    fn long_csv_writes_temp_type_names() {
        let out = to_csv(&forecast().long_form()).expect("csv");
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "interval,temp_type,temp_value");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with(",max_temp,24.0"));
        assert!(lines[2].ends_with(",min_temp,17.0"));
    }

    #[test]
    fn json_keeps_field_names() {
        let out = to_json(&forecast()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");

        assert_eq!(value["location"], "嘉義縣");
        assert_eq!(value["rows"][1]["rain_probability"], 100.0);
        assert_eq!(value["rows"][0]["description"], "多雲時晴");
    }
}
