//! `segmenter`：把输入穷举切分为 word / non-word chunk 序列。
//!
//! 算法（按码点、深度优先）：
//! - 非字母数字字符是边界，直接跳过，不进入任何 chunk
//! - 每个字母数字段（span）单独切分：先尝试“整段作为一个 chunk”，再按递增顺序尝试段内每个切点
//! - 词太短、非词太长的 chunk 直接拒绝
//! - 当前 chunk 与后续首区间都是非词且相邻时合并成一个更长的非词；合并后超长则丢弃该后续
//! - 每一层记录已经产出过的首区间，后面的候选再产出同一个首区间时跳过（合并会导致重复）
//!
//! 结果通过 `Segmentations`（惰性 iterator）逐条产出，不预先物化全部结果；
//! 深度优先的状态放在显式工作栈上，不走函数递归。

use std::collections::HashSet;
use std::iter::{Chain, FusedIterator};
use std::{ops, option};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::SplitConfig;
use crate::dictionary::Dictionary;
use crate::model::{ChunkKind, Range, Sequence, Text};
use crate::stream::CancelToken;

/// 分类规则：词典里有、且不短于 `min_word_length` 才是词，其余都是非词。
pub fn classify<D>(dictionary: &D, word: &str, min_word_length: usize) -> ChunkKind
where
    D: Dictionary + ?Sized,
{
    if word.chars().count() >= min_word_length && dictionary.contains(word) {
        ChunkKind::Word
    } else {
        ChunkKind::NonWord
    }
}

/// 一次切分共享的只读状态。
struct SplitContext<D> {
    dictionary: Arc<D>,
    text: Text,
    config: SplitConfig,
    cancel: Option<CancelToken>,
    /// chunk 长度上限：超过它的 chunk 既不是词，也放不进非词
    reach: usize,
}

impl<D: Dictionary> SplitContext<D> {
    fn classify(&self, range: Range) -> ChunkKind {
        classify(
            &*self.dictionary,
            &self.text.slice(range),
            self.config.min_word_length,
        )
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// 工作栈里的一层：从 `start` 开始切分剩余输入。
///
/// 内部产出的区间序列是**倒序**的（首区间在末尾），便于逐层 push，
/// 由 `Segmentations` 在最外层翻转。
struct Frame {
    start: usize,
    span_end: usize,
    /// 候选 chunk 的结束位置：先整段，再段内切点；超过 `reach` 的不列出
    ends: Chain<option::IntoIter<usize>, ops::Range<usize>>,
    current: Option<Candidate>,
    /// 之前的候选已经产出过的首区间
    seen: HashSet<Range>,
    /// 当前候选产出的首区间；换下一个候选时并入 `seen`
    produced: HashSet<Range>,
}

struct Candidate {
    chunk: Range,
    kind: ChunkKind,
    tail: Tail,
}

/// 候选 chunk 之后的部分。
#[derive(Debug, Clone, Copy)]
enum Tail {
    /// 后面已经没有字母数字：只有一个空的后续
    Empty { sent: bool },
    /// 从该位置开始的切分，由栈中紧挨着的上一层产出
    Nested(usize),
}

impl Frame {
    fn new<D>(ctx: &SplitContext<D>, start: usize) -> Self {
        let span_end = ctx.text.span_end(start);
        let limit = start.saturating_add(ctx.reach);
        let whole = (span_end <= limit).then_some(span_end);
        Self {
            start,
            span_end,
            ends: whole
                .into_iter()
                .chain(start + 1..span_end.min(limit.saturating_add(1))),
            current: None,
            seen: HashSet::new(),
            produced: HashSet::new(),
        }
    }

    /// 换到下一个候选，返回它的后续形态；候选用完（或已取消）时返回 `None`。
    fn advance<D: Dictionary>(&mut self, ctx: &SplitContext<D>) -> Option<Tail> {
        self.seen.extend(self.produced.drain());
        loop {
            if ctx.is_cancelled() {
                return None;
            }
            let end = self.ends.next()?;
            let chunk = Range::new(self.start, end);
            let kind = ctx.classify(chunk);
            if kind == ChunkKind::NonWord && chunk.len() > ctx.config.max_non_word_length {
                continue;
            }

            // 整段 chunk：跳过边界，接着切下一段
            let next = if end < self.span_end {
                Some(end)
            } else {
                ctx.text.next_alnum(end)
            };
            let tail = match next {
                Some(next) => Tail::Nested(next),
                None => Tail::Empty { sent: false },
            };
            self.current = Some(Candidate { chunk, kind, tail });
            return Some(tail);
        }
    }

    /// 当前候选后面没有子层时交出唯一的空后续；第二次调用时结束该候选。
    fn empty_tail(&mut self) -> Option<Vec<Range>> {
        if let Some(Candidate {
            tail: Tail::Empty { sent },
            ..
        }) = &mut self.current
        {
            if !*sent {
                *sent = true;
                return Some(Vec::new());
            }
        }
        self.current = None;
        None
    }

    /// 给上一层交来的后续套上当前候选的首区间（必要时合并）；重复或不合法时返回 `None`。
    fn accept<D: Dictionary>(
        &mut self,
        ctx: &SplitContext<D>,
        mut tail: Vec<Range>,
    ) -> Option<Vec<Range>> {
        let candidate = self.current.as_ref()?;
        let lead = match tail.last().copied() {
            Some(first)
                if candidate.kind == ChunkKind::NonWord
                    && first.start == candidate.chunk.end
                    && ctx.classify(first) == ChunkKind::NonWord =>
            {
                let merged = Range::new(candidate.chunk.start, first.end);
                if merged.len() > ctx.config.max_non_word_length {
                    trace!(%merged, "合并后的非词超长，丢弃");
                    return None;
                }
                if ctx.classify(merged) == ChunkKind::Word {
                    // 由直接以该词为 chunk 的候选负责产出
                    return None;
                }
                tail.pop();
                merged
            }
            _ => candidate.chunk,
        };

        if self.seen.contains(&lead) {
            trace!(%lead, start = self.start, "首区间已产出过，跳过");
            return None;
        }
        self.produced.insert(lead);
        tail.push(lead);
        Some(tail)
    }
}

/// 一次切分的全部结果（惰性、深度优先、确定顺序）。
///
/// 输入为空或只有边界字符时不产出任何结果；“无结果”表示在当前约束下无法切分，不是错误。
pub struct Segmentations<D> {
    ctx: SplitContext<D>,
    stack: Vec<Frame>,
    emitted: usize,
}

impl<D: Dictionary> Segmentations<D> {
    pub(crate) fn new(
        dictionary: Arc<D>,
        text: Text,
        config: SplitConfig,
        cancel: Option<CancelToken>,
    ) -> Self {
        let reach = dictionary
            .max_word_length()
            .map_or(usize::MAX, |longest| longest.max(config.max_non_word_length));
        let ctx = SplitContext {
            dictionary,
            text,
            config,
            cancel,
            reach,
        };
        let stack = ctx
            .text
            .next_alnum(0)
            .map(|start| Frame::new(&ctx, start))
            .into_iter()
            .collect();
        Self {
            ctx,
            stack,
            emitted: 0,
        }
    }

    pub fn text(&self) -> &Text {
        &self.ctx.text
    }

    pub fn config(&self) -> &SplitConfig {
        &self.ctx.config
    }

    /// 栈顶交出的后续自顶向下逐层处理；任一层拒绝，整条作废。
    fn deliver(&mut self, mut tail: Vec<Range>) -> Option<Vec<Range>> {
        for frame in self.stack.iter_mut().rev() {
            tail = frame.accept(&self.ctx, tail)?;
        }
        Some(tail)
    }
}

impl<D: Dictionary> Iterator for Segmentations<D> {
    type Item = Sequence;

    fn next(&mut self) -> Option<Sequence> {
        loop {
            let frame = self.stack.last_mut()?;
            if frame.current.is_none() {
                match frame.advance(&self.ctx) {
                    Some(Tail::Nested(start)) => {
                        let child = Frame::new(&self.ctx, start);
                        self.stack.push(child);
                    }
                    Some(Tail::Empty { .. }) => {}
                    None => {
                        // 这一层的候选用完：出栈，父层的当前候选也随之结束
                        self.stack.pop();
                        match self.stack.last_mut() {
                            Some(parent) => parent.current = None,
                            None => {
                                debug!(
                                    emitted = self.emitted,
                                    cancelled = self.ctx.is_cancelled(),
                                    "切分结束"
                                );
                                return None;
                            }
                        }
                    }
                }
                continue;
            }

            let Some(tail) = frame.empty_tail() else {
                continue;
            };
            if let Some(mut ranges) = self.deliver(tail) {
                ranges.reverse();
                self.emitted += 1;
                return Some(Sequence::from(ranges));
            }
        }
    }
}

impl<D: Dictionary> FusedIterator for Segmentations<D> {}
