//! `stream`：流水线模式的切分输出。
//!
//! 生产者线程跑 `Segmentations`，通过有界 channel 把结果交给消费方：
//! - buffer 满了生产者阻塞（背压），消费方等不到结果时阻塞
//! - 消费方可以随时 `cancel()` 或直接 drop，生产者及其工作栈上的每一层都会尽快停下
//! - 产出的内容与顺序与同步 iterator 完全一致

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, TryRecvError};
use tracing::debug;

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::model::{Sequence, Text};
use crate::segmenter::Segmentations;

/// “不再需要结果”的信号；clone 之后共享同一个标志。
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// `SequenceStream::try_next` 的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryNext {
    Item(Sequence),
    /// 生产者还在跑，暂时没有新结果
    Pending,
    /// 生产者已结束且 buffer 已取空
    Done,
}

pub struct SequenceStream {
    text: Text,
    rx: Option<Receiver<Sequence>>,
    cancel: CancelToken,
    producer: Option<JoinHandle<usize>>,
}

impl SequenceStream {
    pub(crate) fn spawn<D>(
        segmentations: Segmentations<D>,
        cancel: CancelToken,
        buffer: usize,
    ) -> Result<Self>
    where
        D: Dictionary + 'static,
    {
        let text = segmentations.text().clone();
        let (tx, rx) = channel::bounded(buffer);
        let token = cancel.clone();
        let producer = thread::Builder::new()
            .name("wordsplit-producer".to_string())
            .spawn(move || {
                let mut sent = 0usize;
                for sequence in segmentations {
                    if token.is_cancelled() || tx.send(sequence).is_err() {
                        break;
                    }
                    sent += 1;
                }
                debug!(sent, cancelled = token.is_cancelled(), "切分线程结束");
                sent
            })?;
        debug!(chars = text.len(), buffer, "切分线程已启动");

        Ok(Self {
            text,
            rx: Some(rx),
            cancel,
            producer: Some(producer),
        })
    }

    /// 被切分的输入（用于渲染结果）。
    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 通知生产者停止；已经进入 buffer 的结果仍可取出。
    pub fn cancel(&self) {
        debug!("取消切分");
        self.cancel.cancel();
    }

    /// 阻塞等待下一条结果；`None` 表示结束。
    pub fn recv(&self) -> Option<Sequence> {
        self.rx.as_ref()?.recv().ok()
    }

    /// 非阻塞地取下一条结果。
    pub fn try_next(&self) -> TryNext {
        let Some(rx) = self.rx.as_ref() else {
            return TryNext::Done;
        };
        match rx.try_recv() {
            Ok(sequence) => TryNext::Item(sequence),
            Err(TryRecvError::Empty) => TryNext::Pending,
            Err(TryRecvError::Disconnected) => TryNext::Done,
        }
    }
}

impl Iterator for SequenceStream {
    type Item = Sequence;

    fn next(&mut self) -> Option<Sequence> {
        self.recv()
    }
}

impl Drop for SequenceStream {
    fn drop(&mut self) {
        self.cancel.cancel();
        // 先断开 channel，阻塞在 send 上的生产者才能退出
        drop(self.rx.take());
        if let Some(producer) = self.producer.take() {
            let _ = producer.join();
        }
    }
}
