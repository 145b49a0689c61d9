use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use plant_requirements::{DataSource, SourceError};

pub const COURSES: &str = r#"[
    {"course_code": "CS 2500", "title": "Fundamentals of Computer Science 1", "description": "",
     "credits": "4 Hours", "prerequisites": null, "attributes": null,
     "department": "CS", "elective": false, "difficulty": 3.0},
    {"course_code": "CS 4100", "title": "Artificial Intelligence", "description": "",
     "credits": "4 Hours", "prerequisites": "CS 3500", "attributes": null,
     "department": "CS", "elective": true, "difficulty": 4.5},
    {"course_code": "DS 3000", "title": "Foundations of Data Science", "description": "",
     "credits": "4 Hours", "prerequisites": null, "attributes": null,
     "department": "DS", "elective": true, "difficulty": 2.5},
    {"course_code": "BUSN 1103", "title": "Business Fundamentals", "description": "",
     "credits": "4 Hours", "prerequisites": null, "attributes": null,
     "department": "BUSN", "elective": true, "difficulty": 1.5}
]"#;

pub const CS_REQUIREMENTS: &str = r#"{
    "requirements": {"CS_Fundamental": {"minRequired": 1, "description": "Fundamentals"}},
    "CS_Fundamental": [{"code": "CS 2500", "name": "Fundamentals 1", "creditHours": 4}]
}"#;

pub const MAJORS: &str = r#"{"data": {"areas_of_study": [
    {"area_name": "Psychology", "school_name": "College of Science"},
    {"area_name": "Computer Science", "school_name": "Khoury College of Computer Sciences"},
    {"area_name": "Data Science", "school_name": "Khoury College of Computer Sciences"}
]}}"#;

/// In-memory source that counts fetches and can be switched off.
#[derive(Default)]
pub struct FakeSource {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fetches: AtomicUsize,
    offline: AtomicBool,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn with(files: &[(&str, &str)]) -> Self {
        let source = Self::default();
        for (name, content) in files {
            source.put(name, content);
        }

        source
    }

    pub fn put(&self, name: &str, content: &str) {
        self.files
            .lock()
            .expect("files lock")
            .insert(name.to_owned(), content.as_bytes().to_vec());
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl DataSource for FakeSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(SourceError::Network("offline".to_owned()));
        }

        self.files
            .lock()
            .expect("files lock")
            .get(resource)
            .cloned()
            .ok_or_else(|| SourceError::Status(404, resource.to_owned()))
    }
}
