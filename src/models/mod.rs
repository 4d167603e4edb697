mod job;
mod user;

pub use job::{JobPosting, JobType, UnknownJobType};
pub use user::{NewUser, User};
