pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::create as jobs_create;
pub use collection::list as jobs_list;

pub use record::get as job_get;
pub use record::remove as job_remove;
pub use record::update as job_update;
