// Recruiter side: query interpretation, filtered reads and ranking.

pub mod filter;
pub mod handlers;
pub mod pipeline;
pub mod ranker;
