pub mod extraction;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod recognition;
pub mod shared;
