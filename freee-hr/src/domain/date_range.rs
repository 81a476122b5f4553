use chrono::NaiveDate;

/// Inclusive `from_date`..`to_date` range for time clock queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn as_query(&self) -> [(&'static str, String); 2] {
        [
            ("from_date", self.from.format("%Y-%m-%d").to_string()),
            ("to_date", self.to.format("%Y-%m-%d").to_string()),
        ]
    }
}
