/// All row timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (sign-on/sign-off, diary date, date of birth) carry no
/// time-of-day component.
pub type CalendarDate = chrono::NaiveDate;
