mod handler;
mod model;

pub use handler::{cast_vote, vote_page};
pub use model::{Ballot, LOAD_FAILED, SELECTION_REQUIRED, VOTE_FAILED, VOTE_RECORDED, VoteForm};
