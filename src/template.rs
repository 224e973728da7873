use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Render an askama template into an HTML response
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render template: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render page".to_string(),
            )
                .into_response()
        }
    }
}

pub(crate) mod format {
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::Date;

    const DATE_WIRE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    /// Parse the date portion of a backend date string. The backend sends
    /// either `2026-05-02` or a full ISO timestamp; only the first ten
    /// characters matter for display.
    pub fn parse_date(value: &str) -> Option<Date> {
        let head = value.get(..10)?;
        Date::parse(head, DATE_WIRE).ok()
    }

    /// `2026-05-02` -> `Sat, May 2, 2026`. Falls back to the raw value when
    /// the backend sends something unparseable.
    pub fn long_date(value: &str) -> String {
        match parse_date(value) {
            Some(date) => {
                let weekday = &date.weekday().to_string()[..3];
                let month = &date.month().to_string()[..3];
                format!("{weekday}, {month} {}, {}", date.day(), date.year())
            }
            None => value.to_string(),
        }
    }

    /// Prices are in Thai baht. Whole amounts drop the decimals. Rounding
    /// happens on the satang total so a carry propagates into the baht part.
    pub fn price(value: f64) -> String {
        if value <= 0.0 {
            return "Free".to_string();
        }
        let satang = (value * 100.0).round() as i64;
        let grouped = group_thousands(satang / 100);
        let cents = satang % 100;
        if cents == 0 {
            format!("฿{grouped}")
        } else {
            format!("฿{grouped}.{cents:02}")
        }
    }

    fn group_thousands(value: i64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

}
