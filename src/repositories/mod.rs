pub mod comment;

pub use comment::{CommentRepository, CommentStore};
