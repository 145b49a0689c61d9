use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::source::{self, DataSource, fetch_json};

/// Autocomplete entry for the major picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

impl MajorOption {
    fn new(name: &str, school: &str) -> Self {
        Self {
            value: name.to_owned(),
            label: name.to_owned(),
            description: school.to_owned(),
        }
    }
}

#[derive(Deserialize)]
struct AreaOfStudy {
    #[serde(default)]
    area_name: String,
    #[serde(default)]
    school_name: String,
}

#[derive(Deserialize)]
struct AreasOfStudy {
    #[serde(default)]
    areas_of_study: Vec<AreaOfStudy>,
}

#[derive(Deserialize)]
struct MajorsFile {
    data: AreasOfStudy,
}

const FALLBACK_MAJORS: &[(&str, &str)] = &[
    ("Computer Science", "College of Computer and Information Science"),
    ("Business Administration", "D'Amore-McKim School of Business"),
    ("Engineering", "College of Engineering"),
    ("Psychology", "College of Science"),
    ("Biology", "College of Science"),
    ("Mathematics", "College of Science"),
    ("English", "College of Social Sciences and Humanities"),
    ("History", "College of Social Sciences and Humanities"),
    ("Art", "College of Arts, Media and Design"),
    ("Architecture", "College of Arts, Media and Design"),
];

pub fn fallback_majors() -> Vec<MajorOption> {
    FALLBACK_MAJORS
        .iter()
        .map(|(name, school)| MajorOption::new(name, school))
        .collect()
}

/// Major list loaded once and kept until cleared. When loading fails a short
/// built-in list is served and nothing is cached.
pub struct MajorDirectory {
    source: Arc<dyn DataSource>,
    majors: RwLock<Option<Arc<Vec<MajorOption>>>>,
}

impl MajorDirectory {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            majors: RwLock::new(None),
        }
    }

    pub async fn majors(&self) -> Arc<Vec<MajorOption>> {
        if let Some(majors) = self.majors.read().await.as_ref() {
            return majors.clone();
        }

        let file = match fetch_json::<MajorsFile>(self.source.as_ref(), source::MAJORS).await {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(err = %e, "failed to load majors, using fallback list");
                return Arc::new(fallback_majors());
            }
        };

        let mut majors = file
            .data
            .areas_of_study
            .iter()
            .map(|a| MajorOption::new(&a.area_name, &a.school_name))
            .collect::<Vec<_>>();
        majors.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));

        let majors = Arc::new(majors);
        *self.majors.write().await = Some(majors.clone());

        majors
    }

    pub async fn by_name(&self, name: &str) -> Option<MajorOption> {
        self.majors().await.iter().find(|m| m.value == name).cloned()
    }

    /// Case-insensitive match on the name or the school.
    pub async fn search(&self, query: &str) -> Vec<MajorOption> {
        let query = query.to_lowercase();

        self.majors()
            .await
            .iter()
            .filter(|m| {
                m.label.to_lowercase().contains(&query)
                    || m.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub async fn clear(&self) {
        *self.majors.write().await = None;
    }
}
