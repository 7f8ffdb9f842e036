use crate::animal::Animal;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Derived reminder state. Computed from stored fields on every read,
/// never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CareStatus {
    pub vaccination_due: bool,
    pub deworming_due: bool,
}

impl CareStatus {
    pub fn any_due(&self) -> bool {
        self.vaccination_due || self.deworming_due
    }
}

/// A primo-vaccinated animal needs its booster one month after the first
/// shot; afterwards the interval is one year.
pub fn next_vaccination(last_vax: NaiveDate, is_primo_vax: bool) -> NaiveDate {
    if is_primo_vax {
        last_vax + Months::new(1)
    } else {
        last_vax + Months::new(12)
    }
}

/// First deworming is repeated after 15 days; afterwards monthly.
pub fn next_deworming(last_deworm: NaiveDate, is_first_deworm: bool) -> NaiveDate {
    if is_first_deworm {
        last_deworm + Days::new(15)
    } else {
        last_deworm + Months::new(1)
    }
}

impl Animal {
    /// Reminder state as of `today`. A missing date counts as due: the
    /// treatment was never recorded.
    pub fn care_status(&self, today: NaiveDate) -> CareStatus {
        let vaccination_due = match self.last_vax {
            Some(last) => today >= next_vaccination(last, self.is_primo_vax),
            None => true,
        };
        let deworming_due = match self.last_deworm {
            Some(last) => today >= next_deworming(last, self.is_first_deworm),
            None => true,
        };

        CareStatus {
            vaccination_due,
            deworming_due,
        }
    }
}

/// Human-readable age: full elapsed years when at least one, otherwise
/// elapsed months.
pub fn age_display(birth_date: NaiveDate, today: NaiveDate) -> String {
    use chrono::Datelike;

    let mut years = today.year() - birth_date.year();
    let mut months = today.month() as i32 - birth_date.month() as i32;

    if months < 0 {
        years -= 1;
        months += 12;
    }

    if years > 0 {
        format!("{} year{}", years, if years > 1 { "s" } else { "" })
    } else {
        format!("{} month{}", months, if months == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn animal(
        last_vax: Option<NaiveDate>,
        is_primo_vax: bool,
        last_deworm: Option<NaiveDate>,
        is_first_deworm: bool,
    ) -> Animal {
        Animal {
            id: Uuid::new_v4(),
            name: "Misha".to_string(),
            species: "cat".to_string(),
            sex: None,
            color: "grey".to_string(),
            birth_date: date(2022, 4, 15),
            is_neutered: false,
            last_vax,
            is_primo_vax,
            last_deworm,
            is_first_deworm,
            information: None,
            organization_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_primo_vaccination_due_at_one_month_boundary() {
        let today = date(2024, 6, 10);

        // Exactly one month ago: due today
        let a = animal(Some(date(2024, 5, 10)), true, Some(today), true);
        assert!(a.care_status(today).vaccination_due);

        // One month minus a day: not due yet
        let a = animal(Some(date(2024, 5, 11)), true, Some(today), true);
        assert!(!a.care_status(today).vaccination_due);
    }

    #[test]
    fn test_regular_vaccination_due_after_one_year() {
        let today = date(2024, 6, 10);

        let a = animal(Some(date(2023, 6, 10)), false, Some(today), true);
        assert!(a.care_status(today).vaccination_due);

        let a = animal(Some(date(2023, 6, 11)), false, Some(today), true);
        assert!(!a.care_status(today).vaccination_due);
    }

    #[test]
    fn test_first_deworming_due_at_fifteen_days() {
        let today = date(2024, 6, 16);

        // Exactly 15 days ago: due today
        let a = animal(Some(today), true, Some(date(2024, 6, 1)), true);
        assert!(a.care_status(today).deworming_due);

        // 14 days ago: not due yet
        let a = animal(Some(today), true, Some(date(2024, 6, 2)), true);
        assert!(!a.care_status(today).deworming_due);
    }

    #[test]
    fn test_regular_deworming_due_after_one_month() {
        let today = date(2024, 7, 1);

        let a = animal(Some(today), true, Some(date(2024, 6, 1)), false);
        assert!(a.care_status(today).deworming_due);

        let a = animal(Some(today), true, Some(date(2024, 6, 2)), false);
        assert!(!a.care_status(today).deworming_due);
    }

    #[test]
    fn test_missing_dates_count_as_due() {
        let today = date(2024, 6, 10);
        let a = animal(None, false, None, false);
        let status = a.care_status(today);
        assert!(status.vaccination_due);
        assert!(status.deworming_due);
        assert!(status.any_due());
    }

    #[test]
    fn test_age_display_years() {
        assert_eq!(age_display(date(2020, 3, 1), date(2024, 6, 10)), "4 years");
        assert_eq!(age_display(date(2023, 5, 1), date(2024, 6, 10)), "1 year");
    }

    #[test]
    fn test_age_display_months_under_one_year() {
        assert_eq!(age_display(date(2024, 1, 1), date(2024, 6, 10)), "5 months");
        assert_eq!(age_display(date(2024, 5, 20), date(2024, 6, 10)), "1 month");
    }
}
