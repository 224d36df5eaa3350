//! Page objects for the Kwiga sites

mod base;
mod catalog;
mod home;

pub use base::BasePage;
pub use catalog::CatalogPage;
pub use home::{HomePage, Language};
