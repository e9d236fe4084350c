//! `wordsplit` 命令行：加载词表，对每个输入输出所有切分。

use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::debug;
use wordsplit_core::config::{
    DEFAULT_MAX_NON_WORD_LENGTH, DEFAULT_MIN_WORD_LENGTH, DEFAULT_STREAM_BUFFER,
};
use wordsplit_core::{Dictionary, Engine, Sequence};

use crate::error::{CliError, Result};
use crate::render::{Report, json_line, plain_line, unsegmentable_line};

/// 把连写的字符串切分成词典词与非词片段。
///
/// 不给 INPUT 时从 stdin 读取（按空白分隔）。
#[derive(Debug, Parser)]
#[command(name = "wordsplit", version)]
pub struct Cli {
    /// 词的最小长度
    #[arg(short = 'w', long = "min-word-length", default_value_t = DEFAULT_MIN_WORD_LENGTH)]
    pub min_word_length: usize,

    /// 非词的最大长度
    #[arg(long = "nw", visible_alias = "max-non-word-length", default_value_t = DEFAULT_MAX_NON_WORD_LENGTH)]
    pub max_non_word_length: usize,

    /// 词表文件（一行一个词）
    #[arg(short = 'f', long = "words-file", env = "WORDS_FILE")]
    pub words_file: Option<PathBuf>,

    /// 每个输入最多输出多少种切分（至少 1）
    #[arg(long)]
    pub limit: Option<NonZeroUsize>,

    /// 后台切分线程的缓冲条数
    #[arg(long, default_value_t = DEFAULT_STREAM_BUFFER)]
    pub buffer: usize,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,

    /// 要切分的字符串
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `input -> ["word","(nonword)"]`，每种切分一行
    Plain,
    /// 每个输入一行 JSON
    Json,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let words_file = cli.words_file.as_ref().ok_or(CliError::MissingWordsFile)?;
    let dictionary = wordsplit_dict::from_path(words_file)?;
    let engine = Engine::new(dictionary)
        .min_word_length(cli.min_word_length)
        .max_non_word_length(cli.max_non_word_length)
        .stream_buffer(cli.buffer);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            for token in line.split_whitespace() {
                split_one(&engine, token, cli.limit, cli.format, &mut out)?;
            }
        }
    } else {
        for input in &cli.inputs {
            split_one(&engine, input, cli.limit, cli.format, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// 切分一个输入并写出结果；`limit` 达到后丢弃流（后台线程随之取消）。
pub fn split_one<D, W>(
    engine: &Engine<D>,
    input: &str,
    limit: Option<NonZeroUsize>,
    format: Format,
    out: &mut W,
) -> Result<()>
where
    D: Dictionary + 'static,
    W: Write,
{
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }

    let stream = engine.stream(input)?;
    let text = stream.text().clone();
    let sequences = stream.take(limit.map_or(usize::MAX, NonZeroUsize::get));

    match format {
        Format::Plain => {
            let mut count = 0usize;
            for sequence in sequences {
                let chunks = engine.render(&text, &sequence);
                writeln!(out, "{}", plain_line(input, &chunks)?)?;
                count += 1;
            }
            if count == 0 {
                writeln!(out, "{}", unsegmentable_line(input))?;
            }
            debug!(input, count, "输出完成");
        }
        Format::Json => {
            let segmentations = sequences
                .map(|sequence: Sequence| engine.render(&text, &sequence))
                .collect();
            let report = Report {
                input,
                segmentations,
            };
            writeln!(out, "{}", json_line(&report)?)?;
        }
    }
    Ok(())
}
