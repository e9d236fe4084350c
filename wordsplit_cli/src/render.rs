//! 结果展示：把 chunk 列表格式化成一行文本或 JSON。

use serde::Serialize;
use wordsplit_core::Chunk;

use crate::error::Result;

/// `plain` 格式：`input -> ["the","(x)"]`，非词带括号。
pub fn plain_line(input: &str, chunks: &[Chunk]) -> Result<String> {
    let labels: Vec<String> = chunks.iter().map(ToString::to_string).collect();
    Ok(format!("{input} -> {}", serde_json::to_string(&labels)?))
}

/// 无法切分时的占位输出。
pub fn unsegmentable_line(input: &str) -> String {
    format!("{input} ???")
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub input: &'a str,
    pub segmentations: Vec<Vec<Chunk>>,
}

/// `json` 格式：每个输入一行 JSON 对象。
pub fn json_line(report: &Report<'_>) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
