use thiserror::Error;

use crate::POSITION_COUNT;

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("carousel needs exactly {expect} items, found {found}", expect = POSITION_COUNT)]
    UnsupportedItemCount { found: usize },
    #[error("start offset {0} is outside the {count} positions", count = POSITION_COUNT)]
    InvalidStartOffset(usize),
    #[error("jump step of {jump_step_ms}ms must be shorter than the {transition_ms}ms transition")]
    JumpStepTooLong { jump_step_ms: u32, transition_ms: u32 },
    #[error("autoplay interval must be positive")]
    ZeroAutoplayInterval,
    #[error("duplicate carousel instance: {0}")]
    DuplicateInstance(String),
    #[error("invalid carousel config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
