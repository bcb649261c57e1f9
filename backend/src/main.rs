use anyhow::Result;
use clap::Parser;
use log::info;
use serde::Serialize;
use shared::RecordId;
use std::fmt::Display;

use enrollment_tracker::domain::commands::course::{CreateCourseCommand, UpdateCourseCommand};
use enrollment_tracker::domain::commands::enrollment::{
    ChangeStatusCommand, CreateEnrollmentCommand, UpdateEnrollmentCommand,
};
use enrollment_tracker::domain::commands::professor::{
    CreateProfessorCommand, UpdateProfessorCommand,
};
use enrollment_tracker::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use enrollment_tracker::storage::traits::Record;
use enrollment_tracker::{Backend, RecordKeeperConfig};

mod cli;

use cli::{Cli, Command, CourseCommand, EnrollmentCommand, ProfessorCommand, StudentCommand};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RecordKeeperConfig::load(path)?,
        None => RecordKeeperConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_directory = data_dir.clone();
    }

    let backend = Backend::new(&config)?;
    info!("Running {:?}", cli.command);

    let output = Output { json: cli.json };
    match cli.command {
        Command::Student(command) => run_student(&backend, &output, command),
        Command::Professor(command) => run_professor(&backend, &output, command),
        Command::Course(command) => run_course(&backend, &output, command),
        Command::Enrollment(command) => run_enrollment(&backend, &output, command),
        Command::Roster => {
            let roster = backend.roster_service.enrollment_roster()?;
            if output.json {
                return output.print_json(&roster);
            }
            for entry in roster {
                println!(
                    "{}: {} | {} | {} | {} | {}",
                    entry.enrollment_id,
                    entry.student_name,
                    entry.course_title,
                    entry.professor_name,
                    entry.enrollment_date,
                    entry.status
                );
            }
            Ok(())
        }
    }
}

fn run_student(backend: &Backend, output: &Output, command: StudentCommand) -> Result<()> {
    let service = &backend.student_service;
    match command {
        StudentCommand::Add(fields) => output.record(&service.create_student(CreateStudentCommand {
            name: fields.name,
            registration_number: fields.registration,
            email: fields.email,
            phone: fields.phone,
        })?),
        StudentCommand::Update { id, fields } => {
            output.record(&service.update_student(UpdateStudentCommand {
                student_id: id,
                name: fields.name,
                registration_number: fields.registration,
                email: fields.email,
                phone: fields.phone,
            })?)
        }
        StudentCommand::Delete { id } => output.deleted("student", id, service.delete_student(id)?),
        StudentCommand::Show { id } => output.found("student", id, service.get_student(id)?),
        StudentCommand::List => output.records(&service.list_students()?),
    }
}

fn run_professor(backend: &Backend, output: &Output, command: ProfessorCommand) -> Result<()> {
    let service = &backend.professor_service;
    match command {
        ProfessorCommand::Add(fields) => {
            output.record(&service.create_professor(CreateProfessorCommand {
                name: fields.name,
                staff_code: fields.staff_code,
                email: fields.email,
                department: fields.department,
            })?)
        }
        ProfessorCommand::Update { id, fields } => {
            output.record(&service.update_professor(UpdateProfessorCommand {
                professor_id: id,
                name: fields.name,
                staff_code: fields.staff_code,
                email: fields.email,
                department: fields.department,
            })?)
        }
        ProfessorCommand::Delete { id } => {
            output.deleted("professor", id, service.delete_professor(id)?)
        }
        ProfessorCommand::Show { id } => output.found("professor", id, service.get_professor(id)?),
        ProfessorCommand::List => output.records(&service.list_professors()?),
    }
}

fn run_course(backend: &Backend, output: &Output, command: CourseCommand) -> Result<()> {
    let service = &backend.course_service;
    match command {
        CourseCommand::Add(fields) => output.record(&service.create_course(CreateCourseCommand {
            title: fields.title,
            course_code: fields.code,
            credit_hours: fields.credit_hours,
            professor_id: fields.professor,
            term: fields.term,
        })?),
        CourseCommand::Update { id, fields } => {
            output.record(&service.update_course(UpdateCourseCommand {
                course_id: id,
                title: fields.title,
                course_code: fields.code,
                credit_hours: fields.credit_hours,
                professor_id: fields.professor,
                term: fields.term,
            })?)
        }
        CourseCommand::Delete { id } => output.deleted("course", id, service.delete_course(id)?),
        CourseCommand::Show { id } => output.found("course", id, service.get_course(id)?),
        CourseCommand::List => {
            let courses = service.courses_with_professor()?;
            if output.json {
                return output.print_json(&courses);
            }
            for entry in courses {
                println!("{}: {} ({})", entry.course.id, entry.course, entry.professor_name);
            }
            Ok(())
        }
    }
}

fn run_enrollment(backend: &Backend, output: &Output, command: EnrollmentCommand) -> Result<()> {
    let service = &backend.enrollment_service;
    match command {
        EnrollmentCommand::Add(fields) => {
            output.record(&service.create_enrollment(CreateEnrollmentCommand {
                student_id: fields.student,
                course_id: fields.course,
                enrollment_date: fields.date,
                status: fields.status,
            })?)
        }
        EnrollmentCommand::Update { id, fields } => {
            output.record(&service.update_enrollment(UpdateEnrollmentCommand {
                enrollment_id: id,
                student_id: fields.student,
                course_id: fields.course,
                enrollment_date: fields.date,
                status: fields.status,
            })?)
        }
        EnrollmentCommand::Status { id, status } => {
            output.record(&service.change_status(ChangeStatusCommand {
                enrollment_id: id,
                status,
            })?)
        }
        EnrollmentCommand::Delete { id } => {
            output.deleted("enrollment", id, service.delete_enrollment(id)?)
        }
        EnrollmentCommand::Show { id } => output.found("enrollment", id, service.get_enrollment(id)?),
        EnrollmentCommand::List => output.records(&service.list_enrollments()?),
    }
}

/// Prints results either as `id: description` lines or as JSON
struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn record<T: Record + Serialize + Display>(&self, record: &T) -> Result<()> {
        if self.json {
            return self.print_json(record);
        }
        println!("{}: {}", record.id(), record);
        Ok(())
    }

    fn records<T: Record + Serialize + Display>(&self, records: &[T]) -> Result<()> {
        if self.json {
            return self.print_json(records);
        }
        for record in records {
            println!("{}: {}", record.id(), record);
        }
        Ok(())
    }

    /// A missing record is reported, not treated as a failure
    fn found<T: Record + Serialize + Display>(
        &self,
        kind: &str,
        id: RecordId,
        record: Option<T>,
    ) -> Result<()> {
        match record {
            Some(record) => self.record(&record),
            None => {
                println!("No {} with id {}", kind, id);
                Ok(())
            }
        }
    }

    fn deleted(&self, kind: &str, id: RecordId, deleted: bool) -> Result<()> {
        if deleted {
            println!("Deleted {} {}", kind, id);
        } else {
            println!("No {} with id {}", kind, id);
        }
        Ok(())
    }
}
