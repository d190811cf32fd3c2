//! Repositories for database access.

#![allow(missing_docs)]

mod category;
mod media_upload;
mod nominee;
mod user;
mod vote;

pub use category::CategoryRepository;
pub use media_upload::MediaRepository;
pub use nominee::NomineeRepository;
pub use user::UserRepository;
pub use vote::{TallyEntry, VoteRepository};
