pub mod activity_ctx;
pub mod activity_flow;

pub use activity_ctx::ActivityCtx;
pub use activity_flow::{ActivityFlow, ActivityReport};
