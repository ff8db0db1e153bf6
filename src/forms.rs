//! Contact, booking and brochure form validation.

pub mod feedback;
pub mod page;
pub mod rules;
pub mod submission;
pub mod validator;

pub use page::bind;
