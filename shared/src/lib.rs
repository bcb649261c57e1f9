use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Textual format of enrollment dates, both on disk and in commands (dd/mm/yyyy)
pub const ENROLLMENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Surrogate identifier assigned by the store. Zero means "not yet saved".
pub type RecordId = u32;

/// Id carried by records that have never been saved
pub const NEW_RECORD_ID: RecordId = 0;

/// A student, identified for humans by a unique registration number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    /// Natural key, unique across students
    pub registration_number: String,
    pub email: String,
    pub phone: String,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        registration_number: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: NEW_RECORD_ID,
            name: name.into(),
            registration_number: registration_number.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.registration_number)
    }
}

/// A professor, identified for humans by a unique staff code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    pub id: RecordId,
    pub name: String,
    /// Natural key, unique across professors
    pub staff_code: String,
    pub email: String,
    pub department: String,
}

impl Professor {
    pub fn new(
        name: impl Into<String>,
        staff_code: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: NEW_RECORD_ID,
            name: name.into(),
            staff_code: staff_code.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }
}

impl fmt::Display for Professor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.staff_code)
    }
}

/// A course taught by one professor in one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    pub title: String,
    /// Natural key, unique across courses
    pub course_code: String,
    pub credit_hours: u32,
    /// Soft reference to a professor id, not checked by the store
    pub professor_id: RecordId,
    pub term: String,
}

impl Course {
    pub fn new(
        title: impl Into<String>,
        course_code: impl Into<String>,
        credit_hours: u32,
        professor_id: RecordId,
        term: impl Into<String>,
    ) -> Self {
        Self {
            id: NEW_RECORD_ID,
            title: title.into(),
            course_code: course_code.into(),
            credit_hours,
            professor_id,
            term: term.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.course_code)
    }
}

/// Lifecycle state of an enrollment.
///
/// Transitions are not restricted: any state may be written over any other.
/// Tokens outside the three known ones are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Active,
    Cancelled,
    Completed,
    Other(String),
}

impl EnrollmentStatus {
    /// Map a stored token to a status. Known tokens and their English names
    /// match ignoring case; anything else is kept as written.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "ATIVA" | "ACTIVE" => EnrollmentStatus::Active,
            "CANCELADA" | "CANCELLED" | "CANCELED" => EnrollmentStatus::Cancelled,
            "CONCLUIDA" | "COMPLETED" => EnrollmentStatus::Completed,
            _ => EnrollmentStatus::Other(token.to_string()),
        }
    }

    /// Token used in the enrollments file
    pub fn as_token(&self) -> &str {
        match self {
            EnrollmentStatus::Active => "ATIVA",
            EnrollmentStatus::Cancelled => "CANCELADA",
            EnrollmentStatus::Completed => "CONCLUIDA",
            EnrollmentStatus::Other(token) => token,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentStatus::Active)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Error returned when a status is given as blank text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankStatus;

impl fmt::Display for BlankStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("enrollment status cannot be empty")
    }
}

impl std::error::Error for BlankStatus {}

impl FromStr for EnrollmentStatus {
    type Err = BlankStatus;

    /// Parses user input: any non-blank text, trimmed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BlankStatus);
        }
        Ok(EnrollmentStatus::from_token(trimmed))
    }
}

/// Parse a date in exactly the dd/mm/yyyy form, zero-padded
pub fn parse_enrollment_date(text: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(text, ENROLLMENT_DATE_FORMAT).ok()?;
    (date.format(ENROLLMENT_DATE_FORMAT).to_string() == text).then_some(date)
}

/// A student's enrollment in a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: RecordId,
    /// Soft reference to a student id
    pub student_id: RecordId,
    /// Soft reference to a course id
    pub course_id: RecordId,
    pub enrollment_date: NaiveDate,
    pub status: EnrollmentStatus,
}

impl Enrollment {
    pub fn new(
        student_id: RecordId,
        course_id: RecordId,
        enrollment_date: NaiveDate,
        status: EnrollmentStatus,
    ) -> Self {
        Self {
            id: NEW_RECORD_ID,
            student_id,
            course_id,
            enrollment_date,
            status,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }

    /// True for an active enrollment of this student in this course
    pub fn is_active_for(&self, student_id: RecordId, course_id: RecordId) -> bool {
        self.student_id == student_id && self.course_id == course_id && self.status.is_active()
    }

    /// Enrollment date rendered as dd/mm/yyyy
    pub fn formatted_date(&self) -> String {
        self.enrollment_date.format(ENROLLMENT_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "student {} in course {} since {} ({})",
            self.student_id,
            self.course_id,
            self.formatted_date(),
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        assert_eq!(EnrollmentStatus::Active.to_string(), "ATIVA");
        assert_eq!(EnrollmentStatus::Cancelled.to_string(), "CANCELADA");
        assert_eq!(EnrollmentStatus::Completed.to_string(), "CONCLUIDA");
    }

    #[test]
    fn test_status_parsing_accepts_both_spellings() {
        assert_eq!("ATIVA".parse::<EnrollmentStatus>().unwrap(), EnrollmentStatus::Active);
        assert_eq!("active".parse::<EnrollmentStatus>().unwrap(), EnrollmentStatus::Active);
        assert_eq!("Cancelled".parse::<EnrollmentStatus>().unwrap(), EnrollmentStatus::Cancelled);
        assert_eq!("CONCLUIDA".parse::<EnrollmentStatus>().unwrap(), EnrollmentStatus::Completed);
        assert_eq!(
            "TRANCADA".parse::<EnrollmentStatus>().unwrap(),
            EnrollmentStatus::Other("TRANCADA".to_string())
        );
        assert_eq!("  ".parse::<EnrollmentStatus>(), Err(BlankStatus));
    }

    #[test]
    fn test_unknown_status_token_is_kept_verbatim() {
        let status = EnrollmentStatus::from_token("Trancada");
        assert_eq!(status, EnrollmentStatus::Other("Trancada".to_string()));
        assert_eq!(status.as_token(), "Trancada");
        assert!(!status.is_active());
    }

    #[test]
    fn test_parse_enrollment_date_is_strict() {
        assert_eq!(
            parse_enrollment_date("03/09/2024"),
            NaiveDate::from_ymd_opt(2024, 9, 3)
        );
        assert_eq!(parse_enrollment_date("3/9/2024"), None);
        assert_eq!(parse_enrollment_date("03/09/24"), None);
        assert_eq!(parse_enrollment_date("31/02/2024"), None);
        assert_eq!(parse_enrollment_date("2024-09-03"), None);
    }

    #[test]
    fn test_new_records_are_unsaved() {
        let student = Student::new("Ana", "R1", "a@x.com", "000");
        assert!(student.is_new());
        assert_eq!(student.to_string(), "Ana - R1");

        let course = Course::new("Algorithms", "CS101", 60, 1, "2024.2");
        assert!(course.is_new());
        assert_eq!(course.to_string(), "Algorithms - CS101");
    }

    #[test]
    fn test_enrollment_is_active_for() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        let enrollment = Enrollment::new(1, 2, date, EnrollmentStatus::Active);
        assert!(enrollment.is_active_for(1, 2));
        assert!(!enrollment.is_active_for(2, 1));
        assert_eq!(enrollment.formatted_date(), "03/09/2024");
        assert_eq!(enrollment.to_string(), "student 1 in course 2 since 03/09/2024 (ATIVA)");

        let cancelled = Enrollment { status: EnrollmentStatus::Cancelled, ..enrollment };
        assert!(!cancelled.is_active_for(1, 2));
    }

    #[test]
    fn test_records_serialize_to_json() {
        let professor = Professor::new("Bruno", "P7", "b@x.com", "Math");
        let json = serde_json::to_string(&professor).unwrap();
        let back: Professor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, professor);
    }
}
