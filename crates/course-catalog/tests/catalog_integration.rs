// Integration tests for the course catalog
//
// Exercise a file-backed catalog across reopen and feed its contents to the
// similarity engine the way the HTTP service does.

use coursecat::{Catalog, CourseStore};
use coursimil::{rank, Course};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn course(code: &str, department: &str, credits: f64, description: &str) -> Course {
    Course {
        department: department.to_string(),
        credits,
        semester: "Spring".to_string(),
        description: description.to_string(),
        ..Course::new(code)
    }
}

#[fixture]
fn catalog_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[rstest]
fn test_courses_survive_reopen(catalog_dir: TempDir) {
    let db_path = catalog_dir.path().join("courses.db");

    {
        let mut catalog = Catalog::open(&db_path).unwrap();
        let mut store = CourseStore::new(&mut catalog);
        store
            .batch_upsert(&[
                course("CS101", "CS", 3.0, "Programming basics"),
                course("CS102", "CS", 3.0, "Programming structures"),
            ])
            .unwrap();
        catalog.close().unwrap();
    }

    let mut catalog = Catalog::open(&db_path).unwrap();
    let store = CourseStore::new(&mut catalog);
    assert_eq!(store.count().unwrap(), 2);
    assert_eq!(
        store.get_by_code("CS102").unwrap().unwrap().description,
        "Programming structures"
    );
}

#[rstest]
fn test_catalog_feeds_ranking(catalog_dir: TempDir) {
    let db_path = catalog_dir.path().join("courses.db");
    let mut catalog = Catalog::open(&db_path).unwrap();
    let mut store = CourseStore::new(&mut catalog);

    store
        .batch_upsert(&[
            course("HIST100", "History", 3.0, "Medieval europe"),
            course("CS101", "CS", 3.0, "Programming fundamentals using python"),
            course("CS201", "CS", 4.0, "Programming fundamentals continued using java"),
        ])
        .unwrap();

    let target = store.get_by_code("CS101").unwrap().unwrap();
    let pool = store.get_all().unwrap();
    let ranked = rank(&target, &pool, 10).unwrap();

    let codes: Vec<&str> = ranked.iter().map(|c| c.course_code.as_str()).collect();
    assert_eq!(codes, vec!["CS201", "HIST100"]);
}
