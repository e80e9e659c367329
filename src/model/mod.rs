pub mod color;
pub mod project;
pub mod settings;
pub mod task;
pub mod timeline;
pub mod validate;

pub use project::Project;
pub use settings::{Holiday, Settings};
pub use task::Task;
pub use timeline::{DateChanges, ViewMode};
pub use validate::ValidationError;
