use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::catalog::{self, CourseDetails, CourseWithDifficulty};
use crate::clock::Clock;
use crate::cs::CsRequirements;
use crate::major::MajorRequirementsFile;
use crate::source::{self, DataSource, fetch_json};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct Slot<T> {
    value: Option<Arc<T>>,
    fetched_at: Option<Instant>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub courses_cached: bool,
    pub cs_requirements_cached: bool,
    /// Milliseconds since the last successful fetch, 0 when never fetched.
    pub courses_age: u64,
    pub cs_requirements_age: u64,
}

/// Reference data fetched on demand and kept for a freshness window.
///
/// A failed refresh is logged and the previous copy is served, however old.
/// Concurrent misses may fetch the same resource twice.
pub struct DataCache {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    courses: RwLock<Slot<Vec<CourseWithDifficulty>>>,
    cs_requirements: RwLock<Slot<CsRequirements>>,
    major_requirements: RwLock<Slot<MajorRequirementsFile>>,
    catalog: RwLock<Slot<Vec<CourseDetails>>>,
}

impl DataCache {
    pub fn new(source: Arc<dyn DataSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            courses: RwLock::default(),
            cs_requirements: RwLock::default(),
            major_requirements: RwLock::default(),
            catalog: RwLock::default(),
        }
    }

    pub fn source(&self) -> Arc<dyn DataSource> {
        self.source.clone()
    }

    async fn get_or_fetch<T: DeserializeOwned>(
        &self,
        slot: &RwLock<Slot<T>>,
        resource: &str,
    ) -> Option<Arc<T>> {
        let now = self.clock.now();

        {
            let slot = slot.read().await;
            if let (Some(value), Some(fetched_at)) = (&slot.value, slot.fetched_at) {
                if now.duration_since(fetched_at) < self.ttl {
                    return Some(value.clone());
                }
            }
        }

        match fetch_json::<T>(self.source.as_ref(), resource).await {
            Ok(value) => {
                let value = Arc::new(value);
                let mut slot = slot.write().await;
                slot.value = Some(value.clone());
                slot.fetched_at = Some(now);

                tracing::debug!(resource, "reference data refreshed");

                Some(value)
            }
            Err(e) => {
                tracing::error!(resource, err = %e, "failed to fetch reference data");

                slot.read().await.value.clone()
            }
        }
    }

    /// Catalog annotated with difficulty; empty when it never loaded.
    pub async fn courses_with_difficulty(&self) -> Arc<Vec<CourseWithDifficulty>> {
        self.get_or_fetch(&self.courses, source::COURSES_WITH_DIFFICULTY)
            .await
            .unwrap_or_default()
    }

    pub async fn cs_requirements(&self) -> Option<Arc<CsRequirements>> {
        self.get_or_fetch(&self.cs_requirements, source::CS_REQUIREMENTS)
            .await
    }

    pub async fn major_requirements(&self) -> Option<Arc<MajorRequirementsFile>> {
        self.get_or_fetch(&self.major_requirements, source::MAJOR_REQUIREMENTS)
            .await
    }

    pub async fn course_catalog(&self) -> Arc<Vec<CourseDetails>> {
        self.get_or_fetch(&self.catalog, source::COURSE_CATALOG)
            .await
            .unwrap_or_default()
    }

    async fn cached_courses(&self) -> Option<Arc<Vec<CourseWithDifficulty>>> {
        self.courses.read().await.value.clone()
    }

    /// Lookups below only read what is already cached.
    pub async fn course_by_code(&self, code: &str) -> Option<CourseWithDifficulty> {
        let courses = self.cached_courses().await?;

        catalog::course_by_code(&courses, code).cloned()
    }

    pub async fn courses_by_difficulty(&self, min: f64, max: f64) -> Vec<CourseWithDifficulty> {
        match self.cached_courses().await {
            Some(courses) => catalog::courses_by_difficulty(&courses, min, max),
            None => vec![],
        }
    }

    pub async fn courses_by_department(&self, department: &str) -> Vec<CourseWithDifficulty> {
        match self.cached_courses().await {
            Some(courses) => catalog::courses_by_department(&courses, department),
            None => vec![],
        }
    }

    pub async fn electives_for_career_goal(&self, career_goal: &str) -> Vec<CourseWithDifficulty> {
        match self.cached_courses().await {
            Some(courses) => catalog::electives_for_career_goal(&courses, career_goal),
            None => vec![],
        }
    }

    pub async fn clear(&self) {
        *self.courses.write().await = Slot::default();
        *self.cs_requirements.write().await = Slot::default();
        *self.major_requirements.write().await = Slot::default();
        *self.catalog.write().await = Slot::default();

        tracing::info!("reference data cache cleared");
    }

    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let age = |fetched_at: Option<Instant>| {
            fetched_at
                .map(|at| now.duration_since(at).as_millis() as u64)
                .unwrap_or(0)
        };

        let courses = self.courses.read().await;
        let cs_requirements = self.cs_requirements.read().await;

        CacheStats {
            courses_cached: courses.value.is_some(),
            cs_requirements_cached: cs_requirements.value.is_some(),
            courses_age: age(courses.fetched_at),
            cs_requirements_age: age(cs_requirements.fetched_at),
        }
    }
}
