//! # Value Semantics Lessons
//!
//! A course on how names, values and containers relate: when two names share
//! one object, what a copy really copies, and how lazy sequences hand out
//! their items. Each lesson is a small module of functions with inline tests
//! and a walkthrough the `course` binary prints.
//!
//! ## Patterns Covered
//!
//! 1. **Shared containers** - `Rc<RefCell<..>>` handles make aliasing explicit ([`value`])
//! 2. **Bindings** - rebinding versus mutating through an alias ([`bindings`])
//! 3. **Copies** - assignment, shallow copy, cycle-safe deep copy ([`copy`])
//! 4. **Lazy sequences** - fused, single-pass iteration ([`lazy`])
//! 5. **Sentinels vs errors** - `Option` for expected misses, [`LessonError`] for the rest
//! 6. **Lessons** - strings, numbers, lists, dictionaries, objects, loops ([`lessons`])
//!
//! ## Running
//!
//! ```bash
//! # Every lesson
//! cargo run --bin course
//!
//! # A few lessons, or a config file
//! cargo run --bin course -- copying loops
//! cargo run --bin course -- course.toml
//!
//! # List the lessons
//! cargo run --bin course -- --list
//! ```
//!
//! ## Key Dependencies
//!
//! - `indexmap` - insertion-ordered dictionaries
//! - `thiserror` - the [`LessonError`] enum
//! - `serde` / `serde_json` / `toml` - fixtures and configuration
//! - `colored` - console output
//! - `itertools` - iterator helpers

pub mod bindings;
pub mod config;
pub mod copy;
pub mod error;
pub mod json;
pub mod lazy;
pub mod lessons;
pub mod report;
pub mod value;

pub use error::{LessonError, Result};
pub use value::{DictRef, ListRef, ObjectRef, Value, ValueKind};
