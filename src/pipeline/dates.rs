//! Date normalisation: rewrite recognised dates as `[[date:...]]` tokens.
//!
//! | Source text                    | Token                          |
//! |--------------------------------|--------------------------------|
//! | `2024-03-03`                   | `[[date:2024-03-03]]`          |
//! | `2024-03-03 09:15`             | `[[date:2024-03-03 09:15]]`    |
//! | `2024-03-01/2024-03-05`        | `[[date:2024-03-01/2024-03-05]]` |
//! | `March 3rd, 2024`              | `[[date:2024-03-03]]`          |
//! | `Sun, March 3, 2024, 2:30 PM`  | `[[date:2024-03-03 14:30]]`    |
//! | `March 3 - March 5, 2024`      | `[[date:2024-03-03/2024-03-05]]` |
//! | `March 2024`                   | `[[date:2024-03]]`             |
//! | `Week 5, 2024`                 | `[[date:2024-W05]]`            |
//! | `Weeks 5-7, 2024`              | `[[date:2024-W05/W07]]`        |
//!
//! Two freshly created tokens joined by `-`, `–` or `to` merge into one
//! range token. Anything that does not parse (unknown month names,
//! out-of-range components, bare years) is left exactly as written.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Shape of a recognised date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Simple,
    Time,
    Week,
    Duration,
}

/// A date recognised in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub kind: DateKind,
    /// Canonical value without the `[[date:` / `]]` wrapper.
    pub value: String,
    /// The source text was already a `[[date:...]]` token.
    pub already_formatted: bool,
}

impl ParsedDate {
    fn new(kind: DateKind, value: String) -> Self {
        Self {
            kind,
            value,
            already_formatted: false,
        }
    }

    /// Bracketed token form.
    pub fn token(&self) -> String {
        format!("[[date:{}]]", self.value)
    }
}

const MONTHS: &[(&str, u32)] = &[
    ("January", 1),
    ("February", 2),
    ("March", 3),
    ("April", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("August", 8),
    ("September", 9),
    ("October", 10),
    ("November", 11),
    ("December", 12),
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sept", 9),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

fn month_number(name: &str) -> Option<u32> {
    MONTHS.iter().find(|(m, _)| *m == name).map(|&(_, n)| n)
}

struct DateFormat {
    pattern: String,
    build: fn(&Captures<'_>) -> Option<ParsedDate>,
}

fn formats() -> Vec<DateFormat> {
    let month = format!(
        r"({})",
        MONTHS.iter().map(|(m, _)| *m).collect::<Vec<_>>().join("|")
    );
    let weekday = r"(?:(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun)[a-z]*,\s+)?";
    let day = r"(\d{1,2})(?:st|nd|rd|th)?";

    vec![
        DateFormat {
            pattern: r"\[\[date:([^\]]+)\]\]".to_string(),
            build: formatted,
        },
        DateFormat {
            pattern: r"\bWeeks (\d{1,2})-(\d{1,2}),\s*(\d{4})\b".to_string(),
            build: week_range,
        },
        DateFormat {
            pattern: r"\bWeek (\d{1,2}),\s*(\d{4})\b".to_string(),
            build: week,
        },
        DateFormat {
            pattern: format!(r"\b{month} {day}\s*-\s*{month} {day},\s*(\d{{4}})\b"),
            build: month_day_range,
        },
        DateFormat {
            pattern: format!(
                r"\b{weekday}{month} {day},\s*(\d{{4}})(?:,\s*(\d{{1,2}}):(\d{{2}})\s*([AaPp][Mm]))?\b"
            ),
            build: month_day_year,
        },
        DateFormat {
            pattern: r"\b(\d{4})-(\d{2})-(\d{2})/(\d{4})-(\d{2})-(\d{2})\b".to_string(),
            build: iso_range,
        },
        DateFormat {
            pattern: r"\b(\d{4})-(\d{2})-(\d{2})(?:\s+(\d{2}):(\d{2}))?\b".to_string(),
            build: iso_date,
        },
        DateFormat {
            pattern: format!(r"\b{weekday}{month}\s+(\d{{4}})\b"),
            build: month_year,
        },
    ]
}

/// Anchored regex per format, tried in order by [`parse_date`].
static ANCHORED: Lazy<Vec<(Regex, fn(&Captures<'_>) -> Option<ParsedDate>)>> = Lazy::new(|| {
    formats()
        .into_iter()
        .map(|f| (Regex::new(&format!("^(?:{})$", f.pattern)).unwrap(), f.build))
        .collect()
});

/// Every format as one alternation, for scanning running text.
static RE_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    let alternation = formats()
        .iter()
        .map(|f| format!("(?:{})", f.pattern))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
});

static RE_TOKEN_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[date:([^\]/]+)\]\]\s*(?:-|–|to)\s*\[\[date:([^\]/]+)\]\]").unwrap()
});

fn num(caps: &Captures<'_>, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}

fn ymd(year: u32, month: u32, day: u32) -> Option<String> {
    ((1..=12).contains(&month) && (1..=31).contains(&day))
        .then(|| format!("{year:04}-{month:02}-{day:02}"))
}

fn formatted(caps: &Captures<'_>) -> Option<ParsedDate> {
    let value = caps[1].to_string();
    let kind = if value.contains('/') {
        DateKind::Duration
    } else if value.contains('W') {
        DateKind::Week
    } else if value.contains(':') {
        DateKind::Time
    } else {
        DateKind::Simple
    };
    Some(ParsedDate {
        kind,
        value,
        already_formatted: true,
    })
}

fn week_number(caps: &Captures<'_>, i: usize) -> Option<u32> {
    num(caps, i).filter(|w| (1..=53).contains(w))
}

fn week_range(caps: &Captures<'_>) -> Option<ParsedDate> {
    let (from, to, year) = (week_number(caps, 1)?, week_number(caps, 2)?, num(caps, 3)?);
    Some(ParsedDate::new(
        DateKind::Duration,
        format!("{year:04}-W{from:02}/W{to:02}"),
    ))
}

fn week(caps: &Captures<'_>) -> Option<ParsedDate> {
    let (week, year) = (week_number(caps, 1)?, num(caps, 2)?);
    Some(ParsedDate::new(DateKind::Week, format!("{year:04}-W{week:02}")))
}

fn month_day_range(caps: &Captures<'_>) -> Option<ParsedDate> {
    let year = num(caps, 5)?;
    let start = ymd(year, month_number(&caps[1])?, num(caps, 2)?)?;
    let end = ymd(year, month_number(&caps[3])?, num(caps, 4)?)?;
    Some(ParsedDate::new(DateKind::Duration, format!("{start}/{end}")))
}

fn month_day_year(caps: &Captures<'_>) -> Option<ParsedDate> {
    let date = ymd(num(caps, 3)?, month_number(&caps[1])?, num(caps, 2)?)?;
    let Some(meridiem) = caps.get(6) else {
        return Some(ParsedDate::new(DateKind::Simple, date));
    };
    let (hour, minute) = (num(caps, 4)?, num(caps, 5)?);
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let pm = meridiem.as_str().eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some(ParsedDate::new(
        DateKind::Time,
        format!("{date} {hour:02}:{minute:02}"),
    ))
}

fn iso_range(caps: &Captures<'_>) -> Option<ParsedDate> {
    let start = ymd(num(caps, 1)?, num(caps, 2)?, num(caps, 3)?)?;
    let end = ymd(num(caps, 4)?, num(caps, 5)?, num(caps, 6)?)?;
    Some(ParsedDate::new(DateKind::Duration, format!("{start}/{end}")))
}

fn iso_date(caps: &Captures<'_>) -> Option<ParsedDate> {
    let date = ymd(num(caps, 1)?, num(caps, 2)?, num(caps, 3)?)?;
    match (num(caps, 4), num(caps, 5)) {
        (Some(hour), Some(minute)) if hour < 24 && minute < 60 => Some(ParsedDate::new(
            DateKind::Time,
            format!("{date} {hour:02}:{minute:02}"),
        )),
        (Some(_), Some(_)) => None,
        _ => Some(ParsedDate::new(DateKind::Simple, date)),
    }
}

fn month_year(caps: &Captures<'_>) -> Option<ParsedDate> {
    let (month, year) = (month_number(&caps[1])?, num(caps, 2)?);
    Some(ParsedDate::new(
        DateKind::Simple,
        format!("{year:04}-{month:02}"),
    ))
}

/// Parse one complete date expression.
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    let text = text.trim();
    ANCHORED
        .iter()
        .find_map(|(re, build)| re.captures(text).and_then(|caps| build(&caps)))
}

/// Rewrite every recognised date in `text`.
///
/// Returns the rewritten text and the number of tokens created.
/// Existing `[[date:...]]` tokens pass through and are not counted.
pub fn normalize_dates(text: &str) -> (String, usize) {
    let mut created = 0;
    let replaced = RE_CANDIDATE.replace_all(text, |caps: &Captures<'_>| {
        let source = &caps[0];
        match parse_date(source) {
            Some(date) if !date.already_formatted => {
                created += 1;
                date.token()
            }
            _ => source.to_string(),
        }
    });

    if created < 2 {
        return (replaced.into_owned(), created);
    }

    let merged = RE_TOKEN_RANGE.replace_all(&replaced, |caps: &Captures<'_>| {
        created -= 1;
        format!("[[date:{}/{}]]", &caps[1], &caps[2])
    });
    (merged.into_owned(), created)
}
