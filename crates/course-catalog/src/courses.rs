// Course persistence operations

use crate::error::CatalogResult;
use crate::schema::Catalog;
use coursimil::{Course, Instructor};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, OptionalExtension, Row, Transaction};
use std::collections::HashMap;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT course_code, course_title, department, university, credits, semester,
        instructor_name, instructor_email, instructor_office_hours, description,
        prerequisites, learning_outcomes
     FROM courses";

const UPSERT_SQL: &str = "INSERT INTO courses (course_code, course_title, department, university, credits, semester,
        instructor_name, instructor_email, instructor_office_hours, description,
        prerequisites, learning_outcomes, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
     ON CONFLICT(course_code) DO UPDATE SET
        course_title = excluded.course_title,
        department = excluded.department,
        university = excluded.university,
        credits = excluded.credits,
        semester = excluded.semester,
        instructor_name = excluded.instructor_name,
        instructor_email = excluded.instructor_email,
        instructor_office_hours = excluded.instructor_office_hours,
        description = excluded.description,
        prerequisites = excluded.prerequisites,
        learning_outcomes = excluded.learning_outcomes,
        updated_at = excluded.updated_at";

/// Course store for catalog CRUD operations
pub struct CourseStore<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> CourseStore<'a> {
    /// Create a new course store
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    /// Insert a course, replacing any existing course with the same code
    pub fn upsert(&mut self, course: &Course) -> CatalogResult<()> {
        let tx = self.catalog.conn_mut().transaction()?;
        upsert_in(&tx, course)?;
        tx.commit()?;
        Ok(())
    }

    /// Batch upsert courses in a single transaction
    ///
    /// One invalid course rolls back the whole batch.
    pub fn batch_upsert(&mut self, courses: &[Course]) -> CatalogResult<usize> {
        let tx = self.catalog.conn_mut().transaction()?;
        for course in courses {
            upsert_in(&tx, course)?;
        }
        tx.commit()?;

        debug!("Upserted {} courses", courses.len());
        Ok(courses.len())
    }

    /// Number of courses in the catalog
    pub fn count(&self) -> CatalogResult<usize> {
        let count: i64 = self
            .catalog
            .conn()
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Get every course, in insertion order
    pub fn get_all(&self) -> CatalogResult<Vec<Course>> {
        let mut stmt = self
            .catalog
            .conn()
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY rowid"))?;

        let courses = stmt
            .query_map([], course_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(courses)
    }

    /// Get course by code
    pub fn get_by_code(&self, course_code: &str) -> CatalogResult<Option<Course>> {
        let mut stmt = self
            .catalog
            .conn()
            .prepare(&format!("{SELECT_COLUMNS} WHERE course_code = ?1"))?;

        Ok(stmt.query_row(params![course_code], course_from_row).optional()?)
    }

    /// Get courses by code, in the order the codes were given
    ///
    /// Unknown codes are skipped and repeated codes are returned once.
    pub fn get_by_codes(&self, course_codes: &[String]) -> CatalogResult<Vec<Course>> {
        if course_codes.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=course_codes.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self
            .catalog
            .conn()
            .prepare(&format!("{SELECT_COLUMNS} WHERE course_code IN ({placeholders})"))?;

        let mut found: HashMap<String, Course> = stmt
            .query_map(params_from_iter(course_codes.iter()), course_from_row)?
            .map(|row| row.map(|course| (course.course_code.clone(), course)))
            .collect::<rusqlite::Result<_>>()?;

        Ok(course_codes
            .iter()
            .filter_map(|code| found.remove(code))
            .collect())
    }
}

fn upsert_in(tx: &Transaction<'_>, course: &Course) -> CatalogResult<()> {
    course.validate()?;

    let prerequisites = serde_json::to_string(&course.prerequisites)?;
    let learning_outcomes = serde_json::to_string(&course.learning_outcomes)?;

    tx.execute(
        UPSERT_SQL,
        params![
            course.course_code,
            course.course_title,
            course.department,
            course.university,
            course.credits,
            course.semester,
            course.instructor.name,
            course.instructor.email,
            course.instructor.office_hours,
            course.description,
            prerequisites,
            learning_outcomes,
            chrono::Utc::now().timestamp(),
        ],
    )?;

    Ok(())
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        course_code: row.get(0)?,
        course_title: row.get(1)?,
        department: row.get(2)?,
        university: row.get(3)?,
        credits: row.get(4)?,
        semester: row.get(5)?,
        instructor: Instructor {
            name: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            email: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            office_hours: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        },
        description: row.get(9)?,
        prerequisites: string_list(row, 10)?,
        learning_outcomes: string_list(row, 11)?,
    })
}

/// Decode a JSON array column, treating NULL as empty
fn string_list(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    match row.get::<_, Option<String>>(idx)? {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
    }
}
