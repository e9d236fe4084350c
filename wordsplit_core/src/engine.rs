use std::sync::Arc;

use tracing::debug;

use crate::config::SplitConfig;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::model::{Chunk, ChunkKind, Range, Sequence, Text};
use crate::segmenter::{self, Segmentations};
use crate::stream::{CancelToken, SequenceStream};

/// 引擎：持有只读词典与切分参数，对外提供切分/流水线/渲染。
///
/// 生命周期约定：词典先完整加载，再交给引擎；之后只读，可以被多个切分线程共享。
pub struct Engine<D> {
    /// 词典（共享、只读）
    dictionary: Arc<D>,
    /// 切分参数；在每次切分前校验
    config: SplitConfig,
}

impl<D> Engine<D>
where
    D: Dictionary,
{
    pub fn new(dictionary: D) -> Self {
        Self::from_shared(Arc::new(dictionary))
    }

    pub fn from_shared(dictionary: Arc<D>) -> Self {
        Self {
            dictionary,
            config: SplitConfig::default(),
        }
    }

    /// 词的最小长度（>= 1，否则切分时报错）。
    pub fn min_word_length(mut self, n: usize) -> Self {
        self.config.min_word_length = n;
        self
    }

    /// 非词的最大长度（0 表示不允许非词）。
    pub fn max_non_word_length(mut self, n: usize) -> Self {
        self.config.max_non_word_length = n;
        self
    }

    /// 流水线模式的 channel 容量。
    pub fn stream_buffer(mut self, n: usize) -> Self {
        self.config.stream_buffer = n;
        self
    }

    pub fn with_config(mut self, config: SplitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// 同步、惰性地枚举所有切分。
    pub fn split(&self, input: &str) -> Result<Segmentations<D>> {
        self.segmentations(input, None)
    }

    /// 收集全部切分；输入高度歧义时结果数量可能是指数级的。
    pub fn split_all(&self, input: &str) -> Result<Vec<Sequence>> {
        Ok(self.split(input)?.collect())
    }

    pub fn classify(&self, word: &str) -> ChunkKind {
        segmenter::classify(&*self.dictionary, word, self.config.min_word_length)
    }

    /// 把切分结果渲染成带分类的 chunk 列表（分类在此时重新查词典得到）。
    pub fn render(&self, text: &Text, sequence: &Sequence) -> Vec<Chunk> {
        sequence
            .iter()
            .map(|&range: &Range| {
                let word = text.slice(range);
                Chunk {
                    range,
                    kind: self.classify(&word),
                    text: word,
                }
            })
            .collect()
    }

    fn segmentations(&self, input: &str, cancel: Option<CancelToken>) -> Result<Segmentations<D>> {
        self.config.validate()?;
        let text = Text::new(input);
        debug!(
            chars = text.len(),
            min_word_length = self.config.min_word_length,
            max_non_word_length = self.config.max_non_word_length,
            "开始切分"
        );
        Ok(Segmentations::new(
            Arc::clone(&self.dictionary),
            text,
            self.config,
            cancel,
        ))
    }
}

impl<D> Engine<D>
where
    D: Dictionary + 'static,
{
    /// 流水线模式：在后台线程切分，调用方可以边收边处理，也可以提前停止。
    pub fn stream(&self, input: &str) -> Result<SequenceStream> {
        let cancel = CancelToken::new();
        let segmentations = self.segmentations(input, Some(cancel.clone()))?;
        SequenceStream::spawn(segmentations, cancel, self.config.stream_buffer)
    }
}

impl<D> Clone for Engine<D> {
    fn clone(&self) -> Self {
        Self {
            dictionary: Arc::clone(&self.dictionary),
            config: self.config,
        }
    }
}
