//! Expiry-status classification for vehicle and garage document dates.
//!
//! Detail views flag insurance/inspection/registration expiry by bucketing
//! the whole-day difference between the document date and a caller-supplied
//! reference date. Classification is a pure function of its inputs: "now" is
//! always passed in explicitly, never sampled inside this module.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Days-remaining upper bound for the `Critical` bucket.
pub const CRITICAL_WINDOW_DAYS: i64 = 7;
/// Days-remaining upper bound for the `Warning` bucket (and the coarse
/// "expiring soon" check).
pub const WARNING_WINDOW_DAYS: i64 = 30;

/// Discrete expiry-status category, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryBucket {
    /// No date was provided, or the raw value could not be parsed.
    Unknown,
    Expired,
    ExpiresToday,
    Critical,
    Warning,
    Valid,
}

/// How a caller wants an absent expiry date treated.
///
/// The portal's detail views disagree on this: some render nothing for a
/// missing date, others render an explicit "No date provided" badge. Both
/// behaviors are preserved behind this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentDatePolicy {
    /// Absent date yields no status at all (the field is simply skipped).
    Skip,
    /// Absent date yields an [`ExpiryBucket::Unknown`] status.
    #[default]
    Unknown,
}

/// Result of classifying one document date against a reference date.
///
/// Recomputed on every evaluation and never persisted; the bucket is a total
/// function of `days_remaining`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryStatus {
    /// The "today" the classification was evaluated against, at day
    /// granularity.
    pub reference_date: NaiveDate,
    /// The document date, if one was supplied and parseable.
    pub target_date: Option<NaiveDate>,
    /// Signed whole-day difference (`target - reference`); negative means
    /// already expired. `None` when the target date is unknown.
    pub days_remaining: Option<i64>,
    pub bucket: ExpiryBucket,
    /// Human-readable rendering, e.g. "Expires in 5 days".
    pub message: String,
}

impl ExpiryStatus {
    fn unknown(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            target_date: None,
            days_remaining: None,
            bucket: ExpiryBucket::Unknown,
            message: "No date provided".to_string(),
        }
    }

    /// Coarse two-state check used by callers that only need warning-color
    /// highlighting: the date falls inside the warning window but has not
    /// passed yet.
    pub fn is_expiring_soon(&self) -> bool {
        matches!(self.days_remaining, Some(d) if (0..=WARNING_WINDOW_DAYS).contains(&d))
    }

    /// Coarse check for a date that has already passed.
    pub fn is_expired(&self) -> bool {
        matches!(self.days_remaining, Some(d) if d < 0)
    }
}

fn day_word(days: i64) -> &'static str {
    if days.abs() == 1 {
        "day"
    } else {
        "days"
    }
}

/// Classify a document date against a reference date.
///
/// `None` target yields [`ExpiryBucket::Unknown`]. Both operands are already
/// at day granularity, so the difference is a whole-day count by
/// construction; see [`classify_datetime`] for timestamped inputs.
pub fn classify(target: Option<NaiveDate>, now: NaiveDate) -> ExpiryStatus {
    let Some(target) = target else {
        return ExpiryStatus::unknown(now);
    };

    let days = (target - now).num_days();
    let (bucket, message) = if days < 0 {
        let ago = days.abs();
        (
            ExpiryBucket::Expired,
            format!("Expired {} {} ago", ago, day_word(ago)),
        )
    } else if days == 0 {
        (ExpiryBucket::ExpiresToday, "Expires today".to_string())
    } else {
        let bucket = if days <= CRITICAL_WINDOW_DAYS {
            ExpiryBucket::Critical
        } else if days <= WARNING_WINDOW_DAYS {
            ExpiryBucket::Warning
        } else {
            ExpiryBucket::Valid
        };
        (bucket, format!("Expires in {} {}", days, day_word(days)))
    };

    ExpiryStatus {
        reference_date: now,
        target_date: Some(target),
        days_remaining: Some(days),
        bucket,
        message,
    }
}

/// Classify timestamped inputs by truncating both to midnight first.
///
/// Truncation makes the result invariant to time-of-day skew: a target at
/// 23:59 tomorrow and one at 00:00 tomorrow both land one whole day out,
/// regardless of the clock on the reference instant.
pub fn classify_datetime<Tz: TimeZone>(
    target: Option<DateTime<Tz>>,
    now: DateTime<Tz>,
) -> ExpiryStatus {
    classify(target.map(|t| t.date_naive()), now.date_naive())
}

/// Classify a raw date string as received from the REST API.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 datetimes (truncated to the date).
/// Missing, empty, or unparsable input never errors; it classifies as
/// [`ExpiryBucket::Unknown`].
pub fn classify_str(raw: Option<&str>, now: NaiveDate) -> ExpiryStatus {
    classify(raw.and_then(parse_date_lenient), now)
}

/// [`classify_str`] with an explicit absent-date policy.
///
/// Returns `None` only when the date is absent (missing or blank) and the
/// policy is [`AbsentDatePolicy::Skip`]. A present-but-unparsable value is
/// bad data, not an absent field, and always classifies as unknown.
pub fn classify_with_policy(
    raw: Option<&str>,
    now: NaiveDate,
    policy: AbsentDatePolicy,
) -> Option<ExpiryStatus> {
    let absent = raw.map(|s| s.trim().is_empty()).unwrap_or(true);
    if absent && policy == AbsentDatePolicy::Skip {
        return None;
    }
    Some(classify_str(raw, now))
}

/// Lenient date parsing for API payload fields.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    // Datetime without offset, as some backends serialize.
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    None
}
