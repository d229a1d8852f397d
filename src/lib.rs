// Reusable library API — visible to both CLI and WASM builds
pub mod annotate;
pub mod clue;
mod clue_kind;
pub mod clue_set;
pub mod errors;
pub mod game;
pub mod log;
pub mod session;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
