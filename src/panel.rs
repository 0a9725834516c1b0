//! Pure data model of the calendar panel.
//!
//! Nothing here draws: the model describes what the host's side panel should
//! show and the [`DateChange`] request each control submits when activated.
//! Layout: a header with a today control, the month title, prev/next arrows,
//! then six week rows of seven day cells, each row tagged with its ISO week
//! number.

use crate::calendar::{
    add_days, iso_week, weekday, CalendarProps, DateChange, DAY_NAMES, MONTH_NAMES,
};
use serde::{Deserialize, Serialize};

pub const WEEK_ROWS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Month title, uppercased the way the panel renders it.
    pub title: String,
    /// Three-letter column headers, Monday first.
    pub day_headers: [String; 7],
    pub weeks: Vec<WeekRow>,
    /// The "jump to now" control.
    pub today: DateChange,
    pub prev: DateChange,
    pub next: DateChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    pub iso_week: u32,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    /// False for the leading/trailing days that belong to adjacent months.
    pub in_month: bool,
    /// True for the cell matching the calendar's current selection.
    pub selected: bool,
    /// The request this cell submits: its own day, month, and year, with the
    /// time fields untouched.
    pub change: DateChange,
}

impl MonthGrid {
    pub fn build(props: &CalendarProps) -> Self {
        let year = props.year();
        let month = props.month();
        // Column of the first of the month, 0 = Monday.
        let first_weekday = weekday(year, month, 1) as i64;

        let weeks = (0..WEEK_ROWS as i64)
            .map(|row| {
                let (wy, wm, wd) = add_days(year, month, 1, row * 7);
                WeekRow {
                    iso_week: iso_week(wy, wm, wd),
                    days: (0..7)
                        .map(|column| {
                            let (cy, cm, cd) =
                                add_days(year, month, 1, column + row * 7 - first_weekday);
                            DayCell {
                                day: cd,
                                in_month: cm == month && cy == year,
                                selected: cd == props.day() && cm == month && cy == year,
                                change: DateChange {
                                    year: Some(cy),
                                    month: Some(cm as i32),
                                    day: Some(cd),
                                    ..DateChange::default()
                                },
                            }
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            year,
            month,
            title: MONTH_NAMES[month as usize - 1].to_uppercase(),
            day_headers: DAY_NAMES.map(|name| name[..3].to_uppercase()),
            weeks,
            today: DateChange::today(),
            prev: DateChange::month_offset(props, -1),
            next: DateChange::month_offset(props, 1),
        }
    }
}
