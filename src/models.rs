use crate::calendar::DayCell;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub booked_in_month: usize,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { booked: usize, skipped: usize },
    Degraded { reason: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
}
