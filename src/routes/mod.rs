pub mod courses;

pub mod events;

pub use courses::configure_courses_routes;
pub use events::configure_events_routes;
