//! `wordsplit_core`：纯逻辑层，不做任何文件/终端 I/O。
//!
//! 设计目标：
//! - **核心可复用**：CLI/服务端都能复用同一套切分逻辑
//! - **分层清晰**：dictionary -> segmenter（穷举切分）-> stream（流水线输出）-> engine（编排）
//! - **惰性输出**：切分结果逐条产出，调用方可以随时停止
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod model;
pub mod segmenter;
pub mod stream;

pub use config::SplitConfig;
pub use dictionary::{Dictionary, WordSet};
pub use engine::Engine;
pub use error::{Result, SplitError};
pub use model::{Chunk, ChunkKind, Range, Sequence, Text};
pub use segmenter::Segmentations;
pub use stream::{CancelToken, SequenceStream, TryNext};
