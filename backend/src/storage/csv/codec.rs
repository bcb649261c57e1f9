//! # Record Codec
//!
//! Converts a record to and from one `;`-delimited line. Each record type
//! declares its fields in a fixed order; the line holds exactly those fields,
//! with no header row.
//!
//! ```text
//! 1;Ana;R1;a@x.com;000
//! 1;1;1;03/09/2024;ATIVA
//! ```
//!
//! Values containing `;` or `"` are quoted (`"a;b"`, inner quotes doubled), so
//! they survive a reload. Every other value is written verbatim. A record is
//! always exactly one physical line: values holding a line break are refused.

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use shared::{parse_enrollment_date, RecordId};

use crate::storage::error::{Result, StorageError};
use crate::storage::traits::Record;

pub const DELIMITER: u8 = b';';

/// Line format of one record type
pub trait LineCodec: Record {
    /// Entity name used in logs and errors
    const KIND: &'static str;

    /// Field names in on-disk order. The id always comes first.
    const FIELDS: &'static [&'static str];

    fn to_fields(&self) -> Vec<String>;

    /// Build the record from a line that already has the declared arity.
    /// The error is a human-readable reason.
    fn from_fields(fields: &Fields<'_>) -> std::result::Result<Self, String>;
}

/// Typed access to the fields of one line
pub struct Fields<'a> {
    record: &'a StringRecord,
    names: &'static [&'static str],
}

impl<'a> Fields<'a> {
    fn raw(&self, index: usize) -> &'a str {
        self.record.get(index).unwrap_or("")
    }

    fn name(&self, index: usize) -> &'static str {
        self.names.get(index).copied().unwrap_or("field")
    }

    pub fn text(&self, index: usize) -> String {
        self.raw(index).to_string()
    }

    pub fn number(&self, index: usize) -> std::result::Result<u32, String> {
        let value = self.raw(index);
        value
            .parse::<u32>()
            .map_err(|_| format!("{} is not a number: '{}'", self.name(index), value))
    }

    /// A surrogate id, which must be positive
    pub fn record_id(&self, index: usize) -> std::result::Result<RecordId, String> {
        match self.number(index)? {
            0 => Err(format!("{} must be positive", self.name(index))),
            id => Ok(id),
        }
    }

    pub fn date(&self, index: usize) -> std::result::Result<NaiveDate, String> {
        let value = self.raw(index);
        parse_enrollment_date(value)
            .ok_or_else(|| format!("{} is not a dd/mm/yyyy date: '{}'", self.name(index), value))
    }
}

pub(crate) fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None);
    builder
}

pub(crate) fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'));
    builder
}

/// Split one physical line into fields. Quoting only applies within the
/// line, so an unbalanced quote cannot reach into the lines after it.
pub(crate) fn split_line(line: &str) -> std::result::Result<StringRecord, String> {
    let mut reader = reader_builder().from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record).map_err(|e| e.to_string())?;
    Ok(record)
}

/// The id at the start of a line, if it reads as one
pub(crate) fn leading_id(record: &StringRecord) -> Option<RecordId> {
    record.get(0).and_then(|field| field.parse::<RecordId>().ok())
}

/// Decode one parsed line. `line` is only used for error reporting.
pub(crate) fn decode_record<R: LineCodec>(record: &StringRecord, line: u64) -> Result<R> {
    let malformed = |reason: String| StorageError::MalformedRecord {
        kind: R::KIND,
        line,
        reason,
    };

    if record.len() != R::FIELDS.len() {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            R::FIELDS.len(),
            record.len()
        )));
    }

    let fields = Fields {
        record,
        names: R::FIELDS,
    };
    R::from_fields(&fields).map_err(malformed)
}

/// Encode a record as one line, without the trailing newline
pub fn encode<R: LineCodec>(record: &R) -> Result<String> {
    let encoding = |reason: String| StorageError::Encoding {
        kind: R::KIND,
        id: record.id(),
        reason,
    };

    let fields = record.to_fields();
    if let Some(name) = fields
        .iter()
        .zip(R::FIELDS)
        .find(|(value, _)| value.contains(['\n', '\r']))
        .map(|(_, name)| name)
    {
        return Err(encoding(format!("{} contains a line break", name)));
    }

    let mut writer = writer_builder().from_writer(Vec::new());
    writer
        .write_record(&fields)
        .map_err(|e| encoding(e.to_string()))?;
    let bytes = writer.into_inner().map_err(|e| encoding(e.to_string()))?;
    let mut line = String::from_utf8(bytes).map_err(|e| encoding(e.to_string()))?;

    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Decode a single line. One trailing line terminator is allowed.
pub fn decode<R: LineCodec>(line: &str) -> Result<R> {
    let malformed = |reason: String| StorageError::MalformedRecord {
        kind: R::KIND,
        line: 1,
        reason,
    };

    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);
    if line.contains(['\n', '\r']) {
        return Err(malformed("line holds more than one record".to_string()));
    }
    if line.trim().is_empty() {
        return Err(malformed("line is empty".to_string()));
    }

    let record = split_line(line).map_err(malformed)?;
    decode_record::<R>(&record, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Course, Enrollment, EnrollmentStatus, Professor, Student};

    fn student() -> Student {
        Student {
            id: 1,
            name: "Ana".to_string(),
            registration_number: "R1".to_string(),
            email: "a@x.com".to_string(),
            phone: "000".to_string(),
        }
    }

    #[test]
    fn test_encode_plain_lines() {
        assert_eq!(encode(&student()).unwrap(), "1;Ana;R1;a@x.com;000");

        let professor = Professor {
            id: 3,
            name: "Bruno".to_string(),
            staff_code: "P7".to_string(),
            email: "b@x.com".to_string(),
            department: "Math".to_string(),
        };
        assert_eq!(encode(&professor).unwrap(), "3;Bruno;P7;b@x.com;Math");

        let course = Course {
            id: 2,
            title: "Algorithms".to_string(),
            course_code: "CS101".to_string(),
            credit_hours: 60,
            professor_id: 3,
            term: "2024.2".to_string(),
        };
        assert_eq!(encode(&course).unwrap(), "2;Algorithms;CS101;60;3;2024.2");

        let enrollment = Enrollment {
            id: 5,
            student_id: 1,
            course_id: 2,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(),
            status: EnrollmentStatus::Active,
        };
        assert_eq!(encode(&enrollment).unwrap(), "5;1;2;03/09/2024;ATIVA");
    }

    #[test]
    fn test_decode_matches_every_field() {
        assert_eq!(decode::<Student>("1;Ana;R1;a@x.com;000").unwrap(), student());

        let enrollment: Enrollment = decode("7;1;2;31/12/2023;CONCLUIDA").unwrap();
        assert_eq!(enrollment.id, 7);
        assert_eq!(enrollment.enrollment_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
    }

    #[test]
    fn test_delimiter_inside_value_survives_reload() {
        let mut tricky = student();
        tricky.name = "Silva; Ana \"Bia\"".to_string();

        let line = encode(&tricky).unwrap();
        assert_eq!(line, "1;\"Silva; Ana \"\"Bia\"\"\";R1;a@x.com;000");
        assert_eq!(decode::<Student>(&line).unwrap(), tricky);
    }

    #[test]
    fn test_decode_rejects_wrong_arity() {
        let err = decode::<Student>("1;Ana;R1").unwrap_err();
        match err {
            StorageError::MalformedRecord { kind, reason, .. } => {
                assert_eq!(kind, "student");
                assert_eq!(reason, "expected 5 fields, found 3");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(decode::<Student>("1;Ana;R1;a@x.com;000;extra").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_numbers_and_dates() {
        assert!(decode::<Student>("x;Ana;R1;a@x.com;000").is_err());
        assert!(decode::<Student>("0;Ana;R1;a@x.com;000").is_err());
        assert!(decode::<Course>("2;Algorithms;CS101;sixty;3;2024.2").is_err());
        assert!(decode::<Course>("2;Algorithms;CS101;60;-1;2024.2").is_err());
        assert!(decode::<Enrollment>("5;1;2;2024-09-03;ATIVA").is_err());
        assert!(decode::<Enrollment>("5;1;2;31/02/2024;ATIVA").is_err());
        assert!(decode::<Enrollment>("5;1;2;3/9/2024;ATIVA").is_err());
    }

    #[test]
    fn test_decode_rejects_blank_line() {
        assert!(decode::<Student>("").is_err());
        assert!(decode::<Student>("   ").is_err());
    }

    #[test]
    fn test_split_line_and_leading_id() {
        let partial = split_line("12;Ana;R1").unwrap();
        assert_eq!(partial.len(), 3);
        assert_eq!(leading_id(&partial), Some(12));
        assert_eq!(leading_id(&split_line("abc").unwrap()), None);

        // an unbalanced quote stays inside its own line
        let broken = split_line("2;\"Bia;R2;b@x.com;111").unwrap();
        assert_eq!(broken.len(), 2);
        assert_eq!(leading_id(&broken), Some(2));
    }

    #[test]
    fn test_unknown_status_round_trips_verbatim() {
        let enrollment: Enrollment = decode("1;1;1;03/09/2024;TRANCADA").unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Other("TRANCADA".to_string()));
        assert!(!enrollment.status.is_active());
        assert_eq!(encode(&enrollment).unwrap(), "1;1;1;03/09/2024;TRANCADA");
    }

    #[test]
    fn test_encode_refuses_line_breaks() {
        let mut multi_line = student();
        multi_line.name = "Ana\nBia".to_string();

        match encode(&multi_line).unwrap_err() {
            StorageError::Encoding { reason, .. } => assert_eq!(reason, "name contains a line break"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_accepts_one_trailing_newline() {
        assert_eq!(decode::<Student>("1;Ana;R1;a@x.com;000\n").unwrap(), student());
        assert!(decode::<Student>("1;Ana;R1;a@x.com;000\n2;Bia;R2;b@x.com;111").is_err());
    }
}
