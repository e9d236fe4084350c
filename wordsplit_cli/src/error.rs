use thiserror::Error;
use wordsplit_core::SplitError;
use wordsplit_dict::DictError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("没有指定词表：设置 WORDS_FILE 或使用 -f <path>")]
    MissingWordsFile,

    #[error("加载词表失败: {0}")]
    Dict(#[from] DictError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
