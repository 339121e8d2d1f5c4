//! The lessons, in course order.
//!
//! Each module pairs a handful of small functions with a `walkthrough` that
//! demonstrates them and records checks into a [`Report`].

pub mod conditions;
pub mod copying;
pub mod dict_functional;
pub mod dicts;
pub mod generators;
pub mod list_functional;
pub mod lists;
pub mod loops;
pub mod matrix;
pub mod numbers;
pub mod objects;
pub mod strings;
pub mod variables;

use crate::report::Report;

pub struct Lesson {
    pub name: &'static str,
    pub title: &'static str,
    pub walkthrough: fn(&mut Report),
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        name: "variables",
        title: "Variables and data types",
        walkthrough: variables::walkthrough,
    },
    Lesson {
        name: "conditions",
        title: "If/else conditions",
        walkthrough: conditions::walkthrough,
    },
    Lesson {
        name: "strings",
        title: "String methods",
        walkthrough: strings::walkthrough,
    },
    Lesson {
        name: "numbers",
        title: "Number methods",
        walkthrough: numbers::walkthrough,
    },
    Lesson {
        name: "lists",
        title: "List methods",
        walkthrough: lists::walkthrough,
    },
    Lesson {
        name: "list_functional",
        title: "Map, filter and reduce on lists",
        walkthrough: list_functional::walkthrough,
    },
    Lesson {
        name: "matrix",
        title: "Two-dimensional lists",
        walkthrough: matrix::walkthrough,
    },
    Lesson {
        name: "copying",
        title: "Shallow and deep copies",
        walkthrough: copying::walkthrough,
    },
    Lesson {
        name: "dicts",
        title: "Dictionary methods",
        walkthrough: dicts::walkthrough,
    },
    Lesson {
        name: "dict_functional",
        title: "Filtering and reducing dictionaries",
        walkthrough: dict_functional::walkthrough,
    },
    Lesson {
        name: "objects",
        title: "Objects and introspection",
        walkthrough: objects::walkthrough,
    },
    Lesson {
        name: "loops",
        title: "Loop styles",
        walkthrough: loops::walkthrough,
    },
    Lesson {
        name: "generators",
        title: "Lazy sequences",
        walkthrough: generators::walkthrough,
    },
];

pub fn find(name: &str) -> Option<&'static Lesson> {
    LESSONS.iter().find(|lesson| lesson.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    LESSONS.iter().map(|lesson| lesson.name)
}
