//! Lesson 5.2: map, filter and reduce over slices.

use itertools::Itertools;

use crate::error::{LessonError, Result};
use crate::report::Report;

pub fn double_numbers(numbers: &[i64]) -> Result<Vec<i64>> {
    numbers
        .iter()
        .map(|x| x.checked_mul(2).ok_or_else(|| LessonError::overflow("double_numbers")))
        .collect()
}

pub fn get_even_numbers(numbers: &[i64]) -> Vec<i64> {
    numbers.iter().copied().filter(|x| x % 2 == 0).collect()
}

/// Empty input sums to 0.
pub fn sum_numbers(numbers: &[i64]) -> Result<i64> {
    numbers
        .iter()
        .try_fold(0i64, |acc, &x| acc.checked_add(x))
        .ok_or_else(|| LessonError::overflow("sum_numbers"))
}

/// Empty input multiplies to 1.
pub fn multiply_numbers(numbers: &[i64]) -> Result<i64> {
    numbers
        .iter()
        .try_fold(1i64, |acc, &x| acc.checked_mul(x))
        .ok_or_else(|| LessonError::overflow("multiply_numbers"))
}

pub fn has_any_positive(numbers: &[i64]) -> bool {
    numbers.iter().any(|&x| x > 0)
}

pub fn are_all_positive(numbers: &[i64]) -> bool {
    numbers.iter().all(|&x| x > 0)
}

/// Stable: strings of equal length keep their order.
pub fn sort_by_length<S: AsRef<str>>(strings: &[S]) -> Vec<String> {
    strings
        .iter()
        .map(|s| s.as_ref().to_string())
        .sorted_by_key(|s| s.chars().count())
        .collect()
}

/// The first of the longest strings.
pub fn get_longest_string<S: AsRef<str>>(strings: &[S]) -> Option<&str> {
    strings
        .iter()
        .map(|s| s.as_ref())
        .reduce(|best, s| if s.chars().count() > best.chars().count() { s } else { best })
}

/// The first of the shortest strings.
pub fn get_shortest_string<S: AsRef<str>>(strings: &[S]) -> Option<&str> {
    strings
        .iter()
        .map(|s| s.as_ref())
        .min_by_key(|s| s.chars().count())
}

pub fn walkthrough(report: &mut Report) {
    report.section("Functional list helpers");

    let numbers = [1, 2, 3, 4, 5, 6];
    report.show("numbers", format!("{:?}", numbers));
    report.check("double", matches!(double_numbers(&numbers[..3]), Ok(v) if v == [2, 4, 6]));
    report.check("evens", get_even_numbers(&numbers) == vec![2, 4, 6]);
    report.check(
        "sum of [] is 0, product of [] is 1",
        matches!((sum_numbers(&[]), multiply_numbers(&[])), (Ok(0), Ok(1))),
    );
    report.check("product of 1..=4 is 24", matches!(multiply_numbers(&numbers[..4]), Ok(24)));
    report.check("i64::MAX + 1 overflows", sum_numbers(&[i64::MAX, 1]).is_err());
    report.check("any/all positive", has_any_positive(&[-1, -2, 3]) && !are_all_positive(&[1, -2, 3]));

    let words = ["aaa", "b", "cc"];
    report.check("sort by length", sort_by_length(&words) == vec!["b", "cc", "aaa"]);
    report.check("longest of [] is None", get_longest_string::<&str>(&[]).is_none());
    report.note("Empty inputs fall back to the identity of the operation.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_numbers() {
        assert_eq!(double_numbers(&[1, 2, 3]).unwrap(), vec![2, 4, 6]);
        assert_eq!(double_numbers(&[]).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_get_even_numbers() {
        assert_eq!(get_even_numbers(&[1, 2, 3, 4, 5, 6]), vec![2, 4, 6]);
        assert_eq!(get_even_numbers(&[-2, -1]), vec![-2]);
    }

    #[test]
    fn test_sum_numbers() {
        assert_eq!(sum_numbers(&[1, 2, 3, 4]).unwrap(), 10);
        assert_eq!(sum_numbers(&[]).unwrap(), 0);
        assert_eq!(sum_numbers(&[i64::MAX, -1, 1]).unwrap(), i64::MAX);
    }

    #[test]
    fn test_multiply_numbers() {
        assert_eq!(multiply_numbers(&[1, 2, 3, 4]).unwrap(), 24);
        assert_eq!(multiply_numbers(&[]).unwrap(), 1);
    }

    #[test]
    fn test_arithmetic_overflow_is_an_error() {
        assert!(matches!(
            double_numbers(&[1, i64::MAX]),
            Err(LessonError::Overflow { operation: "double_numbers" })
        ));
        assert!(matches!(
            sum_numbers(&[i64::MAX, 1]),
            Err(LessonError::Overflow { operation: "sum_numbers" })
        ));
        assert!(matches!(
            multiply_numbers(&[i64::MAX, 2]),
            Err(LessonError::Overflow { operation: "multiply_numbers" })
        ));
        assert_eq!(multiply_numbers(&[i64::MAX, 0]).unwrap(), 0);
    }

    #[test]
    fn test_positive_checks() {
        assert!(has_any_positive(&[-1, -2, 3]));
        assert!(!has_any_positive(&[-1, -2, -3]));
        assert!(are_all_positive(&[1, 2, 3]));
        assert!(!are_all_positive(&[1, -2, 3]));
        assert!(are_all_positive(&[]));
    }

    #[test]
    fn test_sort_by_length() {
        assert_eq!(sort_by_length(&["aaa", "b", "cc"]), vec!["b", "cc", "aaa"]);
        assert_eq!(sort_by_length(&["bb", "aa", "c"]), vec!["c", "bb", "aa"]);
    }

    #[test]
    fn test_get_longest_string() {
        assert_eq!(get_longest_string(&["a", "abcd", "abc"]), Some("abcd"));
        assert_eq!(get_longest_string(&["ab", "cd"]), Some("ab"));
        assert_eq!(get_longest_string::<&str>(&[]), None);
    }

    #[test]
    fn test_get_shortest_string() {
        assert_eq!(get_shortest_string(&["a", "abcd", "abc"]), Some("a"));
        assert_eq!(get_shortest_string(&["ab", "cd"]), Some("ab"));
        assert_eq!(get_shortest_string::<String>(&[]), None);
    }

    #[test]
    fn test_walkthrough_passes() {
        let mut report = Report::new();
        walkthrough(&mut report);
        assert_eq!(report.failures(), 0);
    }
}
