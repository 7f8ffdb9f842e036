use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Recorded sex of an animal (unknown is represented as NULL)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar")]
pub enum Sex {
    #[sqlx(rename = "M")]
    M,
    #[sqlx(rename = "F")]
    F,
}

/// An animal record, exclusively scoped to one organization
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Animal {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub sex: Option<Sex>,
    pub color: String,
    pub birth_date: NaiveDate,
    pub is_neutered: bool,
    pub last_vax: Option<NaiveDate>,
    pub is_primo_vax: bool,
    pub last_deworm: Option<NaiveDate>,
    pub is_first_deworm: bool,
    pub information: Option<String>,
    pub organization_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BirthDateError {
    #[error("birth month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),

    #[error("birth day must be between 1 and 31, got {0}")]
    DayOutOfRange(u32),

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    NotACalendarDate { year: i32, month: u32, day: u32 },
}

/// Compose an ISO birth date from its parts. A day of zero means the exact
/// day is unknown and defaults to the 15th of the month.
pub fn compose_birth_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, BirthDateError> {
    let day = if day == 0 { 15 } else { day };

    if !(1..=12).contains(&month) {
        return Err(BirthDateError::MonthOutOfRange(month));
    }
    if !(1..=31).contains(&day) {
        return Err(BirthDateError::DayOutOfRange(day));
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(BirthDateError::NotACalendarDate { year, month, day })
}

/// Validated field set ready to be written to the store
#[derive(Debug, Clone)]
pub struct AnimalRecord {
    pub name: String,
    pub species: String,
    pub sex: Option<Sex>,
    pub color: String,
    pub birth_date: NaiveDate,
    pub is_neutered: bool,
    pub last_vax: Option<NaiveDate>,
    pub is_primo_vax: bool,
    pub last_deworm: Option<NaiveDate>,
    pub is_first_deworm: bool,
    pub information: Option<String>,
}

/// Create animal request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateAnimal {
    pub organization_id: Uuid,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub species: String,

    #[serde(default, deserialize_with = "sex_empty_as_none")]
    pub sex: Option<Sex>,

    #[serde(default)]
    pub color: String,

    pub birth_year: i32,
    pub birth_month: u32,

    #[serde(default)]
    pub birth_day: u32,

    #[serde(default)]
    pub is_neutered: bool,

    #[serde(default, deserialize_with = "date_empty_as_none")]
    pub last_vax: Option<NaiveDate>,

    #[serde(default)]
    pub is_primo_vax: bool,

    #[serde(default, deserialize_with = "date_empty_as_none")]
    pub last_deworm: Option<NaiveDate>,

    #[serde(default)]
    pub is_first_deworm: bool,

    #[serde(default)]
    pub information: Option<String>,
}

impl CreateAnimal {
    pub fn record(&self) -> Result<AnimalRecord, BirthDateError> {
        Ok(AnimalRecord {
            name: self.name.clone(),
            species: self.species.clone(),
            sex: self.sex,
            color: self.color.clone(),
            birth_date: compose_birth_date(self.birth_year, self.birth_month, self.birth_day)?,
            is_neutered: self.is_neutered,
            last_vax: self.last_vax,
            is_primo_vax: self.is_primo_vax,
            last_deworm: self.last_deworm,
            is_first_deworm: self.is_first_deworm,
            information: self.information.clone(),
        })
    }
}

/// Update animal request. The owning organization is resolved from the
/// stored record, never supplied by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateAnimal {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub species: String,

    #[serde(default, deserialize_with = "sex_empty_as_none")]
    pub sex: Option<Sex>,

    #[serde(default)]
    pub color: String,

    pub birth_year: i32,
    pub birth_month: u32,

    #[serde(default)]
    pub birth_day: u32,

    #[serde(default)]
    pub is_neutered: bool,

    #[serde(default, deserialize_with = "date_empty_as_none")]
    pub last_vax: Option<NaiveDate>,

    #[serde(default)]
    pub is_primo_vax: bool,

    #[serde(default, deserialize_with = "date_empty_as_none")]
    pub last_deworm: Option<NaiveDate>,

    #[serde(default)]
    pub is_first_deworm: bool,

    #[serde(default)]
    pub information: Option<String>,
}

impl UpdateAnimal {
    pub fn record(&self) -> Result<AnimalRecord, BirthDateError> {
        Ok(AnimalRecord {
            name: self.name.clone(),
            species: self.species.clone(),
            sex: self.sex,
            color: self.color.clone(),
            birth_date: compose_birth_date(self.birth_year, self.birth_month, self.birth_day)?,
            is_neutered: self.is_neutered,
            last_vax: self.last_vax,
            is_primo_vax: self.is_primo_vax,
            last_deworm: self.last_deworm,
            is_first_deworm: self.is_first_deworm,
            information: self.information.clone(),
        })
    }
}

/// Forms submit unknown sex as an empty string; store it as NULL.
fn sex_empty_as_none<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some("M") => Ok(Some(Sex::M)),
        Some("F") => Ok(Some(Sex::F)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "sex must be \"M\", \"F\" or empty, got {:?}",
            other
        ))),
    }
}

/// Empty-string vaccination/deworming dates are stored as NULL, never as
/// an empty string.
fn date_empty_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
