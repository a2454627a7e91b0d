//! Plain-text rendering of the dashboard.

use std::fmt;

use forecast_core::dashboard::{Conditions, DailyRow, Dashboard, Temperatures};

const SLOT_WIDTH: usize = 10;

pub fn render(dash: &Dashboard) -> String {
    DashboardText(dash).to_string()
}

struct DashboardText<'a>(&'a Dashboard);

impl fmt::Display for DashboardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.0;

        writeln!(f, "{}", dash.location)?;
        writeln!(f, "{}", "=".repeat(dash.location.chars().count().max(1)))?;

        match &dash.current {
            Some(current) => {
                writeln!(f, "{} ({})", current.weekday, current.date)?;
                writeln!(f, "  {}", temperature_line(&current.temperatures))?;
                writeln!(f, "  {} [{}]", current.description, current.icon)?;
                writeln!(f, "  {}", conditions_line(&current.conditions))?;
            }
            None => writeln!(f, "No forecast data.")?,
        }

        if !dash.hourly.is_empty() {
            writeln!(f)?;
            let times = strip_line(dash.hourly.iter().map(|s| s.time.clone()));
            let icons = strip_line(dash.hourly.iter().map(|s| s.icon.clone()));
            let temps = strip_line(dash.hourly.iter().map(|s| format!("{}°", s.temperature)));
            for line in [times, icons, temps] {
                writeln!(f, "{line}")?;
            }
        }

        if !dash.daily.is_empty() {
            writeln!(f, "\nForecast ({} days)", dash.daily.len())?;
            for row in &dash.daily {
                writeln!(f, "  {}", daily_line(row))?;
            }
        }

        Ok(())
    }
}

fn strip_line(cells: impl Iterator<Item = String>) -> String {
    let line: String = cells.map(|cell| format!(" {cell:<SLOT_WIDTH$}")).collect();
    format!(" {}", line.trim_end())
}

fn temperature_line(t: &Temperatures) -> String {
    format!("{}°  Feels like {}°  {}°↓ {}°↑", t.current, t.feels_like, t.min, t.max)
}

fn conditions_line(c: &Conditions) -> String {
    format!(
        "Visibility {} | Air pressure {} | Humidity {} | Wind {} ({}) | Sunrise {} | Sunset {}",
        c.visibility, c.pressure, c.humidity, c.wind.speed, c.wind.category, c.sunrise, c.sunset
    )
}

fn daily_line(row: &DailyRow) -> String {
    if row.placeholder {
        return "--  no daytime slot for this date".to_string();
    }

    format!(
        "{:<9} {}  [{}] {:<20} {}  {}",
        row.weekday,
        row.date,
        row.icon,
        row.description,
        temperature_line(&row.temperatures),
        conditions_line(&row.conditions),
    )
}
