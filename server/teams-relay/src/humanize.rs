//! Human-readable elapsed time between two instants ("3 hours", "1 day").

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 12 * MONTH;
const LONG_TIME: u64 = 37 * YEAR;

enum Label {
  Fixed(&'static str),
  /// Gap divided by the unit, then the plural noun.
  Count(u64, &'static str),
}

/// First entry whose bound exceeds the gap wins.
const MAGNITUDES: &[(u64, Label)] = &[
  (SECOND, Label::Fixed("now")),
  (2 * SECOND, Label::Fixed("1 second")),
  (MINUTE, Label::Count(SECOND, "seconds")),
  (2 * MINUTE, Label::Fixed("1 minute")),
  (HOUR, Label::Count(MINUTE, "minutes")),
  (2 * HOUR, Label::Fixed("1 hour")),
  (DAY, Label::Count(HOUR, "hours")),
  (2 * DAY, Label::Fixed("1 day")),
  (WEEK, Label::Count(DAY, "days")),
  (2 * WEEK, Label::Fixed("1 week")),
  (MONTH, Label::Count(WEEK, "weeks")),
  (2 * MONTH, Label::Fixed("1 month")),
  (YEAR, Label::Count(MONTH, "months")),
  (18 * MONTH, Label::Fixed("1 year")),
  (2 * YEAR, Label::Fixed("2 years")),
  (LONG_TIME, Label::Count(YEAR, "years")),
];

/// Render the gap between `from` and `to` (epoch seconds). Order does not matter.
pub fn elapsed(from: i64, to: i64) -> String {
  let gap = from.abs_diff(to);
  for (bound, label) in MAGNITUDES {
    if gap < *bound {
      return match label {
        Label::Fixed(text) => (*text).to_string(),
        Label::Count(unit, noun) => format!("{} {}", gap / unit, noun),
      };
    }
  }
  "a long while".to_string()
}
