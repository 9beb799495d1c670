//! Data models module

pub mod student;

pub use student::{FieldValue, NewStudent, Student, StudentField};
