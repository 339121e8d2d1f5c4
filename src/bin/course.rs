// Walks through every lesson (or the ones asked for) and prints the checks.
//
//   course [CONFIG.toml] [LESSON...]
//   course --list

use colored::Colorize;
use std::process::ExitCode;

use lessons::config::CourseConfig;
use lessons::lessons::LESSONS;
use lessons::report::{paint, Report};
use lessons::{LessonError, Result};

/// A leading `*.toml` argument is the config file; any names after it
/// replace its lesson list.
fn load_config(args: &[String]) -> Result<CourseConfig> {
    let (config_path, names) = match args.first() {
        Some(first) if first.ends_with(".toml") => (Some(first.as_str()), &args[1..]),
        _ => (None, args),
    };

    let mut config = match config_path {
        Some(path) => CourseConfig::load(path)?,
        None => CourseConfig::default(),
    };
    if !names.is_empty() {
        config.lessons = names.to_vec();
    }
    Ok(config)
}

/// Runs the selected lessons and returns how many checks failed.
fn run(config: &CourseConfig) -> Result<usize> {
    let mut report = Report::new();
    for lesson in config.selected()? {
        (lesson.walkthrough)(&mut report);
    }
    print!("{}", report.render(config.render_style()));
    Ok(report.failures())
}

fn print_lessons() {
    for (number, lesson) in LESSONS.iter().enumerate() {
        println!("{:>2}. {:<16} {}", number + 1, lesson.name, lesson.title);
    }
}

fn error_line(error: &LessonError, color: bool) -> String {
    format!("{} {}", paint("error:", color, |s| s.red().bold()), error)
}

fn print_error(error: &LessonError, color: bool) -> ExitCode {
    eprintln!("{}", error_line(error, color));
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--list") {
        print_lessons();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(error) => return print_error(&error, CourseConfig::default().render_style().color),
    };
    let color = config.render_style().color;

    match run(&config) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(count) => {
            eprintln!("{}", paint(&format!("{count} check(s) failed"), color, |s| s.red()));
            ExitCode::FAILURE
        }
        Err(error) => print_error(&error, color),
    }
}
