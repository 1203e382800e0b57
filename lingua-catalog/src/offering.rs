use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hourly rate used when a tutor record carries no (or a zero) price
pub const DEFAULT_TUTOR_RATE: u32 = 1000;

/// Courses with at least this many hours per week count as intensive
pub const INTENSIVE_COURSE_WEEK_HOURS: u32 = 5;

/// Tutoring orders with at least this many hours count as intensive
pub const INTENSIVE_TUTOR_HOURS: u32 = 10;

/// Tutoring hours are billed for personalized sessions in blocks of this size
pub const PERSONALIZED_BLOCK_HOURS: u32 = 10;

/// Group language course as published by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub level: String,
    /// Length of the course in weeks
    pub total_length: u32,
    /// Academic hours per week
    pub week_length: u32,
    #[serde(default)]
    pub start_dates: Vec<NaiveDateTime>,
    pub course_fee_per_hour: u32,
}

impl Course {
    pub fn duration_hours(&self) -> u32 {
        self.total_length.saturating_mul(self.week_length)
    }

    pub fn offering(&self) -> ServiceOffering {
        ServiceOffering::Course {
            fee_per_hour: self.course_fee_per_hour,
            total_length_weeks: self.total_length,
            week_length_hours: self.week_length,
        }
    }
}

/// Individual tutor as published by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tutor {
    pub id: u64,
    pub name: String,
    /// Years of teaching experience
    #[serde(default)]
    pub work_experience: u32,
    #[serde(default)]
    pub languages_spoken: Vec<String>,
    #[serde(default)]
    pub languages_offered: Vec<String>,
    #[serde(default)]
    pub language_level: String,
    #[serde(default)]
    pub price_per_hour: Option<u32>,
}

impl Tutor {
    pub fn offering(&self) -> ServiceOffering {
        ServiceOffering::Tutor {
            price_per_hour: self.price_per_hour,
        }
    }
}

/// The priced side of an order: either a course or a tutor, never both
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceOffering {
    Course {
        fee_per_hour: u32,
        total_length_weeks: u32,
        week_length_hours: u32,
    },
    Tutor {
        price_per_hour: Option<u32>,
    },
}

impl ServiceOffering {
    pub fn hourly_rate(&self) -> u32 {
        match self {
            ServiceOffering::Course { fee_per_hour, .. } => *fee_per_hour,
            ServiceOffering::Tutor { price_per_hour } => price_per_hour
                .filter(|rate| *rate > 0)
                .unwrap_or(DEFAULT_TUTOR_RATE),
        }
    }

    /// Total hours implied by a course; tutors have no intrinsic duration
    pub fn course_duration_hours(&self) -> Option<u32> {
        match self {
            ServiceOffering::Course {
                total_length_weeks,
                week_length_hours,
                ..
            } => Some(total_length_weeks.saturating_mul(*week_length_hours)),
            ServiceOffering::Tutor { .. } => None,
        }
    }

    pub fn meets_intensive_threshold(&self, duration_hours: u32) -> bool {
        match self {
            ServiceOffering::Course { week_length_hours, .. } => {
                *week_length_hours >= INTENSIVE_COURSE_WEEK_HOURS
            }
            ServiceOffering::Tutor { .. } => duration_hours >= INTENSIVE_TUTOR_HOURS,
        }
    }

    /// Quantity billed by the personalized-sessions add-on
    pub fn personalized_units(&self, duration_hours: u32) -> u32 {
        match self {
            ServiceOffering::Course { total_length_weeks, .. } => *total_length_weeks,
            ServiceOffering::Tutor { .. } => duration_hours.div_ceil(PERSONALIZED_BLOCK_HOURS),
        }
    }
}

/// Course search as offered on the catalog page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseFilter {
    /// Case-insensitive match on name, description or teacher
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(query) = self.name.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = [&course.name, &course.description, &course.teacher]
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        match self.level.as_deref().filter(|l| !l.is_empty()) {
            Some(level) => course.level == level,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorFilter {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub min_experience: Option<u32>,
}

impl TutorFilter {
    pub fn matches(&self, tutor: &Tutor) -> bool {
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            if !tutor.languages_offered.iter().any(|l| l == language) {
                return false;
            }
        }

        if let Some(level) = self.level.as_deref().filter(|l| !l.is_empty()) {
            if tutor.language_level != level {
                return false;
            }
        }

        tutor.work_experience >= self.min_experience.unwrap_or(0)
    }
}
