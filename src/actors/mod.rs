pub mod booking_intake;
pub mod health;
pub mod page_renderer;
pub mod ssg;
pub mod template_renderer;
