pub mod cache;
pub mod catalog;
pub mod clock;
pub mod cs;
pub mod major;
pub mod majors;
pub mod mapping;
pub mod reconcile;
pub mod source;

pub use cache::{CacheStats, DataCache};
pub use catalog::{CourseDetails, CourseWithDifficulty};
pub use clock::{Clock, ManualClock, SystemClock};
pub use cs::{CsRequirements, cs_checklist};
pub use major::{MajorData, MajorRequirementsFile, major_checklist};
pub use majors::{MajorDirectory, MajorOption};
pub use mapping::{
    CS_MAJOR_CODE, is_computer_science_major, map_major_name_to_code, uses_cs_checklist,
};
pub use reconcile::{
    CategoryReport, ChecklistReport, CourseLedger, Progress, Provenance, RequirementState,
};
pub use source::{DataSource, DirSource, HttpSource, SourceError};
