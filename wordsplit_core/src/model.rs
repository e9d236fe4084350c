use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// 输入串上的半开区间 `[start, end)`。
///
/// 注意：下标是**码点（char）位置**，不是字节位置，多字节字符不会被切开。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} > end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// 一种完整切分：按 start 递增、互不重叠、覆盖所有字母数字段的区间序列。
///
/// 由 segmenter 一次性产出，之后不可变；所有权整体交给消费方。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    ranges: Vec<Range>,
}

impl Sequence {
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn first(&self) -> Option<&Range> {
        self.ranges.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.ranges.iter()
    }

    pub fn into_ranges(self) -> Vec<Range> {
        self.ranges
    }
}

impl From<Vec<Range>> for Sequence {
    fn from(ranges: Vec<Range>) -> Self {
        Self { ranges }
    }
}

impl IntoIterator for Sequence {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// 输入串的码点视图（共享、clone 成本低）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    chars: Arc<[char]>,
}

impl Text {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// 非字母数字字符是天然边界，永远不会出现在任何 chunk 里。
    pub fn is_boundary(&self, pos: usize) -> bool {
        self.char_at(pos).is_none_or(|ch| !ch.is_alphanumeric())
    }

    /// 从 `from` 开始的第一个字母数字位置。
    pub fn next_alnum(&self, from: usize) -> Option<usize> {
        (from..self.len()).find(|&pos| !self.is_boundary(pos))
    }

    /// 从 `from` 开始的第一个边界位置；没有边界时为 `len()`。
    pub fn span_end(&self, from: usize) -> usize {
        (from..self.len())
            .find(|&pos| self.is_boundary(pos))
            .unwrap_or(self.len())
    }

    /// 取出 `range` 对应的文本；越界部分被截掉。
    pub fn slice(&self, range: Range) -> String {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }
}

impl From<&str> for Text {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}

/// chunk 分类：读取时由词典推导，不是存储状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// 词典里有、且长度不小于 `min_word_length`
    Word,
    /// 其余情况（包括长度不足的词典词）
    NonWord,
}

/// 渲染视图：区间 + 文本 + 分类。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(flatten)]
    pub range: Range,
    pub text: String,
    pub kind: ChunkKind,
}

impl Chunk {
    pub fn is_word(&self) -> bool {
        self.kind == ChunkKind::Word
    }
}

impl fmt::Display for Chunk {
    /// 词原样输出，非词用括号包起来（例如 `(xq)`）。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChunkKind::Word => f.write_str(&self.text),
            ChunkKind::NonWord => write!(f, "({})", self.text),
        }
    }
}
