use std::collections::HashSet;

/// 词典抽象：core 不关心词典来自文件/内存/网络。
///
/// 约定：
/// - 查询大小写不敏感
/// - 空串永远不是词
/// - 切分期间词典只读，可被多个线程同时查询
pub trait Dictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;

    /// 最长词的码点数（按折叠后的形式计）。
    ///
    /// 切分时比这更长、又超过非词上限的 chunk 不再查询。
    /// 返回 `None` 表示未知，此时不做这项剪枝。
    fn max_word_length(&self) -> Option<usize> {
        None
    }
}

/// 内存词表：插入与查询时统一做 trim + 小写折叠。
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String>,
    longest: usize,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一个词（幂等）；trim 之后为空的输入会被忽略。
    pub fn add(&mut self, word: &str) {
        let word = normalize(word);
        if word.is_empty() {
            return;
        }
        self.longest = self.longest.max(word.chars().count());
        self.words.insert(word);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordSet {
    fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.words.contains(&normalize(word))
    }

    fn max_word_length(&self) -> Option<usize> {
        Some(self.longest)
    }
}

impl<S: AsRef<str>> Extend<S> for WordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.add(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = WordSet::new();
        set.extend(iter);
        set
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
