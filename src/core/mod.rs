pub mod loader;
pub mod session;
pub mod store;

pub use crate::domain::model::{Course, CourseDetails, CourseSummary, KnownIds, RejectedRow};
pub use crate::domain::ports::{CatalogSource, SettingsProvider};
pub use crate::utils::error::Result;
pub use loader::{CatalogLoader, LoadReport};
pub use session::CatalogSession;
pub use store::{CatalogStore, LookupMode, DEFAULT_BUCKET_COUNT};
