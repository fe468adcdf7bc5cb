//! Console rendering of statistics and raw-data pages.
//!
//! Every function here is pure: it turns a value object into text and never
//! prints. The session and the executable decide where the text goes.

use crate::algorithms::frequency::ModeCount;
use crate::services::{
    BirthYearStats, CategoryBreakdown, DurationStats, StationStats, StatisticsReport, TimeStats,
    UserStats,
};
use crate::transformations::filtering::TripFilter;
use crate::transformations::pagination::Page;

/// Horizontal rule printed between sections
pub fn separator() -> String {
    "-".repeat(40)
}

pub fn render_time_stats(stats: &TimeStats) -> String {
    [
        format!(
            "Most popular month for traveling is {}",
            stats.popular_month.value
        ),
        format!(
            "Most popular day for traveling is {}",
            stats.popular_weekday.value
        ),
        format!(
            "Most popular hour for traveling is {}",
            stats.popular_hour.value
        ),
    ]
    .join("\n")
}

pub fn render_station_stats(stats: &StationStats) -> String {
    [
        format!(
            "Most popular starting station is {}",
            mode_or_unknown(&stats.popular_start_station)
        ),
        format!(
            "Most popular ending station is {}",
            mode_or_unknown(&stats.popular_end_station)
        ),
        format!(
            "Most popular start to end stations are {}",
            mode_or_unknown(&stats.popular_route)
        ),
    ]
    .join("\n")
}

pub fn render_duration_stats(stats: &DurationStats) -> String {
    let mut lines = vec![
        format!("The total travel time is {}", stats.total_hms),
        format!("The mean travel time is {}", stats.mean_hms),
    ];
    if stats.trips_missing > 0 {
        lines.push(format!(
            "({} trips without a duration were left out)",
            stats.trips_missing
        ));
    }
    lines.join("\n")
}

pub fn render_user_stats(stats: &UserStats) -> String {
    let mut sections = vec![format!(
        "The distribution of user types is:\n{}",
        render_breakdown(&stats.user_types)
    )];

    if let Some(genders) = &stats.genders {
        sections.push(format!(
            "The distribution of gender is:\n{}",
            render_breakdown(genders)
        ));
    }

    if let Some(years) = &stats.birth_years {
        sections.push(render_birth_years(years));
    }

    sections.join("\n\n")
}

fn render_birth_years(years: &BirthYearStats) -> String {
    [
        format!("The oldest user was born in {}", years.earliest),
        format!("The youngest user was born in {}", years.most_recent),
        format!("The most common birth year is {}", years.most_common.value),
    ]
    .join("\n")
}

fn render_breakdown(breakdown: &CategoryBreakdown) -> String {
    if breakdown.counts.is_empty() {
        return "  (no values recorded)".to_string();
    }
    let width = breakdown
        .counts
        .iter()
        .map(|(value, _)| value.chars().count())
        .max()
        .unwrap_or(0);
    breakdown
        .counts
        .iter()
        .map(|(value, count)| format!("  {:<width$}  {}", value, count, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn mode_or_unknown(mode: &Option<ModeCount<String>>) -> &str {
    mode.as_ref().map_or("unknown", |m| m.value.as_str())
}

/// Human description of filter criteria, e.g. `"June, all days"`
pub fn describe_filter(filter: &TripFilter) -> String {
    let month = filter
        .month
        .map_or_else(|| "all months".to_string(), |m| m.to_string());
    let day = filter
        .weekday
        .map_or_else(|| "all days".to_string(), |d| d.to_string());
    format!("{}, {}", month, day)
}

/// Message shown in place of statistics when no trip matches
pub fn no_trips_message(filter: &TripFilter) -> String {
    format!("No trips match the selected filters ({}).", describe_filter(filter))
}

/// Full plain-text report, one section per statistic group
pub fn render_report(report: &StatisticsReport) -> String {
    let mut out = vec![
        format!(
            "Bikeshare statistics for {} ({}): {} trips",
            report.city,
            describe_filter(&report.criteria),
            report.trips
        ),
        separator(),
    ];

    if report.is_empty() {
        out.push(no_trips_message(&report.criteria));
        out.push(separator());
        return out.join("\n");
    }

    let sections = [
        (
            "The Most Frequent Times of Travel",
            report.time.as_ref().map(render_time_stats),
        ),
        (
            "The Most Popular Stations and Trip",
            report.stations.as_ref().map(render_station_stats),
        ),
        (
            "Trip Duration",
            report.durations.as_ref().map(render_duration_stats),
        ),
        ("User Stats", report.users.as_ref().map(render_user_stats)),
    ];
    for (title, body) in sections {
        out.push(format!("{}:", title));
        out.push(body.unwrap_or_else(|| "No data available.".to_string()));
        out.push(separator());
    }
    out.join("\n")
}

/// Render a page as an aligned table whose first column is the trip's
/// position within the view.
pub fn render_page(page: &Page<'_>) -> String {
    let header: Vec<String> = page.columns.iter().map(|c| c.name().to_string()).collect();
    let cells: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect();

    let index_width = (page.offset + page.len()).saturating_sub(1).to_string().len();
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |index: &str, row: &[String]| {
        let mut line = format!("{:>width$}", index, width = index_width);
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(&format!("  {:<width$}", cell, width = *width));
        }
        line.trim_end().to_string()
    };

    let mut lines = vec![format_row("", &header)];
    for (i, row) in cells.iter().enumerate() {
        lines.push(format_row(&(page.offset + i).to_string(), row));
    }
    lines.join("\n")
}
