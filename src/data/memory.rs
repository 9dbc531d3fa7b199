use crate::{
    data::{
        StudentStore,
        student::{Student, StudentFields},
    },
    error::{StudentsError, StudentsResult},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Rows {
    last_id: i32,
    students: BTreeMap<i32, Student>,
}

/// Keeps students in a map, handing out ids the same way a serial column would.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    rows: Mutex<Rows>,
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn get_all(&self) -> StudentsResult<Vec<Student>> {
        Ok(self.rows.lock().await.students.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> StudentsResult<Option<Student>> {
        Ok(self.rows.lock().await.students.get(&id).cloned())
    }

    async fn insert(&self, fields: StudentFields) -> StudentsResult<Student> {
        let mut rows = self.rows.lock().await;
        rows.last_id += 1;
        let student = Student::from_fields(rows.last_id, fields);
        rows.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn save(&self, student: Student) -> StudentsResult<Student> {
        let mut rows = self.rows.lock().await;
        rows.last_id = rows.last_id.max(student.id);
        rows.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn remove(&self, id: i32) -> StudentsResult<bool> {
        Ok(self.rows.lock().await.students.remove(&id).is_some())
    }
}

/// Fails every call, as a store that lost its database would.
#[derive(Debug, Default)]
pub struct UnreachableStudentStore;

impl UnreachableStudentStore {
    fn error() -> StudentsError {
        StudentsError::MakeQuery {
            source: sqlx::Error::PoolTimedOut,
        }
    }
}

#[async_trait]
impl StudentStore for UnreachableStudentStore {
    async fn get_all(&self) -> StudentsResult<Vec<Student>> {
        Err(Self::error())
    }

    async fn get_by_id(&self, _id: i32) -> StudentsResult<Option<Student>> {
        Err(Self::error())
    }

    async fn insert(&self, _fields: StudentFields) -> StudentsResult<Student> {
        Err(Self::error())
    }

    async fn save(&self, _student: Student) -> StudentsResult<Student> {
        Err(Self::error())
    }

    async fn remove(&self, _id: i32) -> StudentsResult<bool> {
        Err(Self::error())
    }
}
