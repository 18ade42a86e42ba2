//! Entity records and their validators.
//!
//! Each record is built through a constructor that validates before
//! returning, and mutated through typed patches that re-validate the merged
//! result. Nothing here touches storage.

pub mod owner;
pub mod product_line;
pub mod project;
pub mod settings;

pub use owner::{Owner, OwnerPatch};
pub use product_line::ProductLine;
pub use project::{NewProject, Project, ProjectPatch, parse_date};
pub use settings::Settings;
