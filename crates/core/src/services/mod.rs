//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod category;
pub mod media;
pub mod nominee;
pub mod storage;
pub mod vote;

pub use account::{AccountService, AuthSession, LoginInput, RegisterInput};
pub use category::{CategoryService, CategoryWithNominees, CreateCategoryInput, UpdateCategoryInput};
pub use media::{
    CreateMediaInput, ListMediaQuery, MediaService, ReviewDecision, ReviewMediaInput,
    UploadMediaInput,
};
pub use nominee::{CreateNomineeInput, NomineeService, UpdateNomineeInput};
pub use storage::{LocalStorage, NoOpStorage, StorageBackend, StorageService};
pub use vote::{CastVoteInput, VoteService};
