//! Lesson 11: lazy sequences in practice.
//!
//! Paginated responses, generated data and log files all share one shape:
//! produce the next item only when asked, and remember nothing once it has
//! been handed out.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use crate::error::{LessonError, Result};
use crate::lazy::{lazy, Lazy};
use crate::report::Report;

/// One page of a paginated API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub data: Vec<String>,
}

/// Parses a JSON array of pages, e.g. a recorded API fixture.
pub fn pages_from_json(text: &str) -> Result<Vec<Page>> {
    Ok(serde_json::from_str(text)?)
}

/// Hands pages out one at a time.
pub fn api_response_generator<I>(pages: I) -> Lazy<I::IntoIter>
where
    I: IntoIterator<Item = Page>,
{
    lazy(pages)
}

/// `0, 1, 4, 9, ...` for `size` items, computed on demand. Squares are
/// `u128`, wide enough for any `u64`.
pub fn heavy_data_generator(size: u64) -> Lazy<impl Iterator<Item = u128>> {
    lazy(0..size).map(|i| u128::from(i) * u128::from(i))
}

pub fn doubled(values: &[i64]) -> Lazy<impl Iterator<Item = i128> + '_> {
    lazy(values).map(|&v| i128::from(v) * 2)
}

/// Trimmed lines from any buffered reader.
pub fn read_lines_lazy<R: BufRead>(reader: R) -> Lazy<impl Iterator<Item = Result<String>>> {
    lazy(reader.lines()).map(|line| line.map(|l| l.trim().to_string()).map_err(LessonError::from))
}

/// Opens `path` and yields its lines one by one. Opening fails eagerly;
/// read errors show up as items.
pub fn read_large_file_lazy(path: impl AsRef<Path>) -> Result<Lazy<impl Iterator<Item = Result<String>>>> {
    let file = File::open(path)?;
    Ok(read_lines_lazy(BufReader::new(file)))
}

/// Keeps lines that mention `ERROR`.
pub fn filter_errors<I, S>(lines: I) -> Lazy<impl Iterator<Item = S>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lazy(lines).filter(|line| line.as_ref().contains("ERROR"))
}

/// The file-to-filter pipeline. Stops at the first read error.
pub fn error_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let lines = read_large_file_lazy(path)?;
    itertools::process_results(lines, |lines| filter_errors(lines).collect())
}

pub fn walkthrough(report: &mut Report) {
    report.section("Generators");

    let pages = vec![
        Page { page: 1, data: vec!["a".into(), "b".into()] },
        Page { page: 2, data: vec!["c".into(), "d".into()] },
    ];
    let mut responses = api_response_generator(pages);
    report.check("first page comes first", responses.next().map(|p| p.page) == Some(1));
    report.check("then the second", responses.next().map(|p| p.page) == Some(2));
    report.check("then nothing", responses.next().is_none());

    report.check(
        "heavy_data_generator(5) = [0, 1, 4, 9, 16]",
        heavy_data_generator(5).drain() == [0, 1, 4, 9, 16],
    );

    let mut twice = doubled(&[10, 20, 30]);
    let first = twice.drain();
    report.show("doubled", format!("{:?}", first));
    report.check("a spent sequence drains empty", first == [20, 40, 60] && twice.drain().is_empty());

    let log = Cursor::new("INFO init\nERROR db connection\n  ERROR timeout  \nINFO shutdown\n");
    let errors = itertools::process_results(read_lines_lazy(log), |lines| filter_errors(lines).collect::<Vec<_>>());
    report.check(
        "log pipeline keeps the two errors",
        errors.is_ok_and(|errors| errors == ["ERROR db connection", "ERROR timeout"]),
    );
    report.note("Each stage pulls one line at a time; the log is never held whole.");
}
