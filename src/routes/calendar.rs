//! Month calendar of events.
//!
//! The grid is Sunday-first: leading blanks come from the weekday of the
//! 1st, trailing blanks pad the final week. Events are placed only on days
//! whose parsed date falls inside the viewed month/year, whatever order the
//! backend returns them in.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use axum_extra::extract::CookieJar;
use runhub_client::events;
use runhub_client::types::{Event, User};
use serde::Deserialize;
use time::{Date, Month, OffsetDateTime};

use super::{current_user, AppState};
use crate::error::AppError;
use crate::template::{format, render_template};

struct CalendarEvent {
    id: String,
    title: String,
}

struct CalendarCell {
    day: Option<u8>,
    is_today: bool,
    events: Vec<CalendarEvent>,
}

fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if time::util::is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn month_grid(
    year: i32,
    month: Month,
    today: Date,
    events: &[Event],
) -> Result<Vec<Vec<CalendarCell>>, time::error::ComponentRange> {
    let first = Date::from_calendar_date(year, month, 1)?;
    let leading = first.weekday().number_days_from_sunday() as usize;
    let days = days_in_month(year, month);

    let mut cells: Vec<CalendarCell> = Vec::with_capacity(42);
    for _ in 0..leading {
        cells.push(CalendarCell {
            day: None,
            is_today: false,
            events: Vec::new(),
        });
    }

    for day in 1..=days {
        let matching = events
            .iter()
            .filter(|e| {
                format::parse_date(&e.date).is_some_and(|d| {
                    d.year() == year && d.month() == month && d.day() == day
                })
            })
            .map(|e| CalendarEvent {
                id: e.id.clone(),
                title: e.title.clone(),
            })
            .collect();

        cells.push(CalendarCell {
            day: Some(day),
            is_today: today.year() == year && today.month() == month && today.day() == day,
            events: matching,
        });
    }

    while cells.len() % 7 != 0 {
        cells.push(CalendarCell {
            day: None,
            is_today: false,
            events: Vec::new(),
        });
    }

    let mut weeks = Vec::with_capacity(cells.len() / 7);
    let mut rest = cells;
    while !rest.is_empty() {
        let tail = rest.split_off(7.min(rest.len()));
        weeks.push(rest);
        rest = tail;
    }
    Ok(weeks)
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    year: Option<i32>,
    month: Option<u8>,
}

#[derive(Template)]
#[template(path = "calendar.html")]
struct CalendarTemplate {
    user: Option<User>,
    month_label: String,
    weeks: Vec<Vec<CalendarCell>>,
    prev_href: String,
    next_href: String,
}

/// GET /calendar - month grid, defaulting to the current month
pub async fn page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CalendarQuery>,
) -> Result<Response, AppError> {
    let today = OffsetDateTime::now_utc().date();

    let year = query.year.unwrap_or_else(|| today.year());
    let month_number = match query.month {
        Some(m) if (1..=12).contains(&m) => m,
        _ => today.month() as u8,
    };
    let month = Month::try_from(month_number)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let events = events::calendar(&state.api, year, month_number).await?;
    let weeks =
        month_grid(year, month, today, &events).map_err(|e| AppError::Validation(e.to_string()))?;

    let (prev_year, prev_month) = match month_number {
        1 => (year - 1, 12),
        m => (year, m - 1),
    };
    let (next_year, next_month) = match month_number {
        12 => (year + 1, 1),
        m => (year, m + 1),
    };

    Ok(render_template(CalendarTemplate {
        user: current_user(&jar),
        month_label: format!("{month} {year}"),
        weeks,
        prev_href: format!("/calendar?year={prev_year}&month={prev_month}"),
        next_href: format!("/calendar?year={next_year}&month={next_month}"),
    }))
}
