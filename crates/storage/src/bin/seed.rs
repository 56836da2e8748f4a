use std::fmt;

use lms_core::model::{Course, CourseId, Lesson, LessonId};
use storage::repository::{CourseRepository, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    courses: u32,
    lessons: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCourses { raw: String },
    InvalidLessons { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCourses { raw } => write!(f, "invalid --courses value: {raw}"),
            ArgsError::InvalidLessons { raw } => write!(f, "invalid --lessons value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("LMS_DB_URL").unwrap_or_else(|_| "sqlite:lms.sqlite3?mode=rwc".into());
        let mut courses = std::env::var("LMS_SEED_COURSES")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(3);
        let mut lessons = std::env::var("LMS_SEED_LESSONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(4);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--courses" => {
                    let value = require_value(&mut args, "--courses")?;
                    courses = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidCourses { raw: value.clone() })?;
                }
                "--lessons" => {
                    let value = require_value(&mut args, "--lessons")?;
                    lessons = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidLessons { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            courses,
            lessons,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:lms.sqlite3?mode=rwc)");
    eprintln!("  --courses <n>             Number of courses to upsert (default: 3)");
    eprintln!("  --lessons <n>             Lessons per course (default: 4)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  LMS_DB_URL, LMS_SEED_COURSES, LMS_SEED_LESSONS");
}

const COURSES: [(&str, &str, &str); 3] = [
    (
        "web-basics",
        "Web Fundamentals",
        "How browsers, HTML and CSS fit together.",
    ),
    (
        "javascript",
        "JavaScript for Beginners",
        "Variables, functions and the event loop.",
    ),
    (
        "databases",
        "Intro to Databases",
        "Documents, tables and how to query them.",
    ),
];

const LESSON_TOPICS: [&str; 4] = ["Introduction", "Core Concepts", "Hands-on Practice", "Recap"];

fn lesson_body(course_title: &str, topic: &str) -> String {
    format!(
        "## {topic}\n\nThis lesson is part of **{course_title}**.\n\n\
         - Read the material\n- Try the exercise\n- Mark the lesson as complete\n"
    )
}

/// Build the `index`-th sample course and its lessons.
fn sample_course(index: u32, lessons: u32) -> Result<(Course, Vec<Lesson>), lms_core::Error> {
    let (slug, title, description) = COURSES[index as usize % COURSES.len()];
    let round = index as usize / COURSES.len();
    let (id, title) = if round == 0 {
        (slug.to_string(), title.to_string())
    } else {
        (format!("{slug}-{}", round + 1), format!("{title} {}", round + 1))
    };

    let course = Course::new(CourseId::new(id), title, description, i64::from(index + 1))?;
    let lessons = (0..lessons)
        .map(|j| {
            let topic = LESSON_TOPICS[j as usize % LESSON_TOPICS.len()];
            Lesson::new(
                LessonId::new(format!("lesson-{}", j + 1)),
                course.id().clone(),
                format!("{}. {topic}", j + 1),
                lesson_body(course.title(), topic),
                i64::from(j + 1),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((course, lessons))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;

    for i in 0..args.courses {
        let (course, lessons) = sample_course(i, args.lessons)?;
        storage.courses.upsert_course(&course).await?;
        for lesson in &lessons {
            storage.courses.upsert_lesson(lesson).await?;
        }
    }

    println!(
        "Seeded {} courses with {} lessons each into {}",
        args.courses, args.lessons, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
