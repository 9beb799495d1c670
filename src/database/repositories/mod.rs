//! Repository implementations of the student store

pub mod memory;
pub mod student;

pub use memory::MemoryStudentRepository;
pub use student::StudentRepository;
