use thiserror::Error;

/// 切分相关错误。
///
/// “找不到任何切分”不是错误：那是一个空结果流。
#[derive(Debug, Error)]
pub enum SplitError {
    /// 配置违反前置条件
    #[error("配置无效：{field} = {value}（{reason}）")]
    InvalidConfig {
        field: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// 无法启动生产者线程
    #[error("无法启动切分线程：{0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = SplitError::InvalidConfig {
            field: "min_word_length",
            value: 0,
            reason: "必须 >= 1",
        };
        let msg = err.to_string();
        assert!(msg.contains("min_word_length"));
        assert!(msg.contains('0'));
    }
}
