//! Locale-aware formatting for the Egyptian storefront.
//!
//! Pure, stateless helpers: EGP currency, Arabic dates and times, relative
//! time buckets. Rendered with Arabic-Indic digits the way `ar-EG` locale
//! output looks in the browser.

use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};
use rust_decimal::Decimal;

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Thousands separator used by `ar-EG`.
const THOUSANDS_SEPARATOR: char = '٬';

/// Decimal separator used by `ar-EG`.
const DECIMAL_SEPARATOR: char = '٫';

const MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

const WEEKDAYS_AR: [&str; 7] = [
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
    "الأحد",
];

/// Transliterate ASCII digits to Arabic-Indic digits.
fn arabic_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => ARABIC_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Group an ASCII integer string into thousands.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(*c);
    }
    grouped
}

/// Format an amount in Egyptian pounds, e.g. `١٬٠٥٠ جنيه`.
///
/// No fraction digits are shown for whole amounts; at most two otherwise.
#[must_use]
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let plain = rounded.to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut formatted = arabic_digits(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        formatted.push(DECIMAL_SEPARATOR);
        formatted.push_str(&arabic_digits(frac));
    }
    format!("{formatted} جنيه")
}

/// Format a date the long Egyptian way, e.g. `الجمعة، ١٤ فبراير ٢٠٢٥`.
#[must_use]
pub fn date(value: DateTime<Utc>) -> String {
    let weekday = WEEKDAYS_AR[value.weekday().num_days_from_monday() as usize];
    let month = MONTHS_AR[value.month0() as usize];
    let day = arabic_digits(&value.day().to_string());
    let year = arabic_digits(&value.year().to_string());
    format!("{weekday}، {day} {month} {year}")
}

/// Format a time of day with a 12-hour clock, e.g. `٠٦:٣٠ م`.
#[must_use]
pub fn time(value: DateTime<Utc>) -> String {
    let (pm, hour) = value.hour12();
    let period = if pm { "م" } else { "ص" };
    let clock = arabic_digits(&format!("{:02}:{:02}", hour, value.minute()));
    format!("{clock} {period}")
}

/// Arabic count phrase respecting the singular/dual/plural rules.
fn count_unit(n: i64, singular: &str, dual: &str, plural: &str) -> String {
    match n {
        1 => singular.to_owned(),
        2 => dual.to_owned(),
        3..=10 => format!("{} {plural}", arabic_digits(&n.to_string())),
        _ => format!("{} {singular}", arabic_digits(&n.to_string())),
    }
}

/// Format how far `value` lies from `now`, e.g. `منذ ٥ دقائق`.
///
/// Buckets: under a minute, minutes, hours, days, then months.
#[must_use]
pub fn relative(value: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = value - now;
    let future = delta > TimeDelta::zero();
    let prefix = if future { "بعد" } else { "منذ" };

    let minutes = delta.num_minutes().abs();
    let hours = delta.num_hours().abs();
    let days = delta.num_days().abs();

    if minutes < 1 {
        return "الآن".to_owned();
    }

    let phrase = if hours < 1 {
        count_unit(minutes, "دقيقة", "دقيقتين", "دقائق")
    } else if days < 1 {
        count_unit(hours, "ساعة", "ساعتين", "ساعات")
    } else if days < 30 {
        count_unit(days, "يوم", "يومين", "أيام")
    } else {
        count_unit(days / 30, "شهر", "شهرين", "أشهر")
    };

    format!("{prefix} {phrase}")
}
