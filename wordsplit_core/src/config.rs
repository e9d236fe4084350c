//! 切分参数与默认值。

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

/// 词的最小长度（码点数）。
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// 非词 chunk 的最大长度（码点数）。
pub const DEFAULT_MAX_NON_WORD_LENGTH: usize = 3;

/// 流水线模式下 channel 的缓冲条数；满了以后生产者阻塞。
pub const DEFAULT_STREAM_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// 词典词至少要这么长才算“词”
    pub min_word_length: usize,
    /// 非词 chunk 最多这么长；为 0 时不允许任何非词
    pub max_non_word_length: usize,
    /// `SequenceStream` 的 channel 容量
    pub stream_buffer: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_non_word_length: DEFAULT_MAX_NON_WORD_LENGTH,
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }
}

impl SplitConfig {
    pub fn new(min_word_length: usize, max_non_word_length: usize) -> Self {
        Self {
            min_word_length,
            max_non_word_length,
            ..Self::default()
        }
    }

    /// 检查前置条件；不合法时直接报错，而不是静默地产出空结果。
    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(SplitError::InvalidConfig {
                field: "min_word_length",
                value: self.min_word_length,
                reason: "必须 >= 1",
            });
        }
        if self.stream_buffer == 0 {
            return Err(SplitError::InvalidConfig {
                field: "stream_buffer",
                value: self.stream_buffer,
                reason: "必须 >= 1",
            });
        }
        Ok(())
    }
}
