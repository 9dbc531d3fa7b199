use crate::{
    data::student::{Student, StudentFields},
    error::StudentsResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod student;

/// Everything the handlers need from a datastore. Every method is a single call that either
/// finishes or fails; retries and timeouts belong to the implementation's client library.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// Every student, ordered by id.
    async fn get_all(&self) -> StudentsResult<Vec<Student>>;
    async fn get_by_id(&self, id: i32) -> StudentsResult<Option<Student>>;
    /// Persists a new student, with the id picked by the store.
    async fn insert(&self, fields: StudentFields) -> StudentsResult<Student>;
    /// Inserts or overwrites the student with `student.id`.
    ///
    /// Ids chosen this way must never be handed out again by [`StudentStore::insert`].
    async fn save(&self, student: Student) -> StudentsResult<Student>;
    /// Returns whether a student was actually removed.
    async fn remove(&self, id: i32) -> StudentsResult<bool>;

    async fn close(&self) {}
}
