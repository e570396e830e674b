//! Timetable - Main Entry Point
//!
//! Command-line front end for the `timetable` library.

use anyhow::Result;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use timetable::{CourseInput, TimetableHandler, validation};

/// Timetable - manage terms, courses and weekly schedules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the timetable data file
    file: String,

    /// Date used to work out the current week (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List schedules
    Schedules,
    /// Create a schedule for a new term
    NewSchedule {
        name: String,
        /// First day of the term (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day of the term (YYYY-MM-DD)
        #[arg(long, conflicts_with = "weeks")]
        end: Option<String>,
        /// Length of the term in weeks
        #[arg(long)]
        weeks: Option<u32>,
        /// Select the new schedule
        #[arg(long)]
        select: bool,
    },
    /// Select the schedule other commands work on
    Select { schedule_id: String },
    /// Remove a schedule
    RemoveSchedule { schedule_id: String },
    /// Add a course to the selected schedule
    AddCourse {
        name: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Change fields of a course
    UpdateCourse {
        course_id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Remove a course
    RemoveCourse { course_id: String },
    /// List courses
    Courses {
        /// Only courses meeting in this week
        #[arg(long)]
        week: Option<u32>,
    },
    /// Weeks in which a slot is still free
    ValidWeeks {
        #[arg(long)]
        weekday: String,
        #[arg(long)]
        periods: String,
        /// Treat this course's weeks as free
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Slot view of one weekday
    Day {
        day: String,
        #[arg(long)]
        week: Option<u32>,
    },
    /// Slot view of every displayed weekday
    Week {
        #[arg(long)]
        week: Option<u32>,
    },
    /// Period table with overlap warnings
    Lessons,
    /// Set the theme (system, light, dark)
    Theme { mode: String },
    /// Show or hide weekends in the selected schedule
    Weekends {
        #[arg(action = ArgAction::Set)]
        show: bool,
    },
}

#[derive(Args, Debug)]
struct CourseFields {
    /// Day of the week (name or 1-7, 1 = Monday)
    #[arg(long)]
    weekday: Option<String>,
    /// Periods, e.g. "3-4"
    #[arg(long)]
    periods: Option<String>,
    /// Explicit weeks, e.g. "1-8, 10"
    #[arg(long, conflicts_with = "parity")]
    weeks: Option<String>,
    /// Use the free weeks matching a parity (all, odd, even)
    #[arg(long)]
    parity: Option<String>,
    #[arg(long)]
    teacher: Option<String>,
    #[arg(long)]
    classroom: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    note: Option<String>,
}

impl CourseFields {
    fn into_input(self, name: Option<String>) -> CourseInput {
        CourseInput {
            name,
            teacher: self.teacher,
            classroom: self.classroom,
            weekday: self.weekday,
            periods: self.periods,
            weeks: self.weeks,
            parity: self.parity,
            color: self.color,
            note: self.note,
        }
    }
}

fn run(handler: &TimetableHandler, command: Command) -> Result<String> {
    match command {
        Command::Schedules => handler.handle_list_schedules(),
        Command::NewSchedule {
            name,
            start,
            end,
            weeks,
            select,
        } => handler.handle_new_schedule(name, start, end, weeks, select),
        Command::Select { schedule_id } => handler.handle_select_schedule(schedule_id),
        Command::RemoveSchedule { schedule_id } => handler.handle_remove_schedule(schedule_id),
        Command::AddCourse { name, fields } => {
            handler.handle_add_course(fields.into_input(Some(name)))
        }
        Command::UpdateCourse {
            course_id,
            name,
            fields,
        } => handler.handle_update_course(course_id, fields.into_input(name)),
        Command::RemoveCourse { course_id } => handler.handle_remove_course(course_id),
        Command::Courses { week } => handler.handle_list_courses(week),
        Command::ValidWeeks {
            weekday,
            periods,
            exclude,
        } => handler.handle_valid_weeks(weekday, periods, exclude),
        Command::Day { day, week } => handler.handle_day(day, week),
        Command::Week { week } => handler.handle_week(week),
        Command::Lessons => handler.handle_lessons(),
        Command::Theme { mode } => handler.handle_set_theme(mode),
        Command::Weekends { show } => handler.handle_set_weekends(show),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Cli::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let cli = Cli::parse();
    let mut handler = TimetableHandler::new(&cli.file)?;
    if let Some(today) = &cli.today {
        handler = handler.with_today(validation::parse_date(today)?);
    }
    println!("{}", run(&handler, cli.command)?);
    Ok(())
}
