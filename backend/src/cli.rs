//! CLI argument definitions using clap
//!
//! Commands:
//! - enrollment-tracker student|professor|course|enrollment add|update|delete|show|list
//! - enrollment-tracker enrollment status <id> <status>
//! - enrollment-tracker roster

use clap::{Args, Parser, Subcommand};
use shared::{EnrollmentStatus, RecordId};
use std::path::PathBuf;

/// Keeps students, professors, courses and enrollments in plain text files
#[derive(Parser, Debug)]
#[command(name = "enrollment-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the configuration file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage students
    #[command(subcommand)]
    Student(StudentCommand),

    /// Manage professors
    #[command(subcommand)]
    Professor(ProfessorCommand),

    /// Manage courses
    #[command(subcommand)]
    Course(CourseCommand),

    /// Manage enrollments
    #[command(subcommand)]
    Enrollment(EnrollmentCommand),

    /// List every enrollment with student, course and professor names
    Roster,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    Add(StudentFields),
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: StudentUpdate,
    },
    Delete { id: RecordId },
    Show { id: RecordId },
    List,
}

#[derive(Args, Debug)]
pub struct StudentFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub registration: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Args, Debug)]
pub struct StudentUpdate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub registration: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfessorCommand {
    Add(ProfessorFields),
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: ProfessorUpdate,
    },
    Delete { id: RecordId },
    Show { id: RecordId },
    List,
}

#[derive(Args, Debug)]
pub struct ProfessorFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub staff_code: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub department: String,
}

#[derive(Args, Debug)]
pub struct ProfessorUpdate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub staff_code: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CourseCommand {
    Add(CourseFields),
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: CourseUpdate,
    },
    Delete { id: RecordId },
    Show { id: RecordId },
    /// List courses with their professor's name
    List,
}

#[derive(Args, Debug)]
pub struct CourseFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub credit_hours: u32,
    /// Professor id
    #[arg(long)]
    pub professor: RecordId,
    #[arg(long)]
    pub term: String,
}

#[derive(Args, Debug)]
pub struct CourseUpdate {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub credit_hours: Option<u32>,
    #[arg(long)]
    pub professor: Option<RecordId>,
    #[arg(long)]
    pub term: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum EnrollmentCommand {
    Add(EnrollmentFields),
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: EnrollmentUpdate,
    },
    /// Set the status of an enrollment (ATIVA, CANCELADA, CONCLUIDA)
    Status { id: RecordId, status: EnrollmentStatus },
    Delete { id: RecordId },
    Show { id: RecordId },
    List,
}

#[derive(Args, Debug)]
pub struct EnrollmentFields {
    /// Student id
    #[arg(long)]
    pub student: RecordId,
    /// Course id
    #[arg(long)]
    pub course: RecordId,
    /// Enrollment date as dd/mm/yyyy
    #[arg(long)]
    pub date: String,
    #[arg(long, default_value = "ATIVA")]
    pub status: EnrollmentStatus,
}

#[derive(Args, Debug)]
pub struct EnrollmentUpdate {
    #[arg(long)]
    pub student: Option<RecordId>,
    #[arg(long)]
    pub course: Option<RecordId>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub status: Option<EnrollmentStatus>,
}
