//! 词表加载：一行一个词，加载成 `wordsplit_core::WordSet`。
//!
//! 格式（纯文本）：
//!
//! - 每行一个词，首尾空白会被去掉
//! - 空行直接跳过
//! - 大小写无所谓（查询时统一折叠）
//!
//! 加载遇到第一个 I/O 错误就停止并向上报告，不做重试。

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};
use wordsplit_core::WordSet;

#[derive(Debug, Error)]
pub enum DictError {
    /// 词表文件打不开
    #[error("无法打开词表 {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 读到某一行时出错（例如不是合法 UTF-8）
    #[error("读取词表第 {line} 行失败: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DictError>;

pub fn from_path(path: impl AsRef<Path>) -> Result<WordSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DictError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let words = from_reader(BufReader::new(file))?;
    info!(path = %path.display(), words = words.len(), "词表已加载");
    Ok(words)
}

pub fn from_reader<R: BufRead>(reader: R) -> Result<WordSet> {
    let mut words = WordSet::new();
    load_into(&mut words, reader)?;
    Ok(words)
}

pub fn from_lines(s: &str) -> WordSet {
    s.lines().collect()
}

/// 把 `reader` 里的词追加进已有词表；返回实际读到的非空行数。
pub fn load_into<R: BufRead>(words: &mut WordSet, reader: R) -> Result<usize> {
    let mut added = 0usize;
    let mut skipped = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DictError::Read {
            line: idx + 1,
            source,
        })?;
        let word = line.trim();
        if word.is_empty() {
            skipped += 1;
            continue;
        }
        words.add(word);
        added += 1;
    }
    debug!(added, skipped, "读入词表");
    Ok(added)
}
