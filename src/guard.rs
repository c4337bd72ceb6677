//! # 幂等嵌入模块
//!
//! 先检测再嵌入：图像已带有效水印时不做任何修改，直接报告现有水印。
//! 这样 “生成 → 编辑 → 编辑” 这样的链式流程不会覆盖或叠加水印。

use crate::detect::{DetectResult, detect, extract, read_payload};
use crate::embed::embed;
use crate::error::{EmbedError, ExtractError};
use crate::payload::{PayloadEncoding, decode_text};
use crate::pixels::PixelBuffer;
use tracing::debug;

/// 幂等嵌入的成功结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// 新写入了水印，缓冲区已被修改。
    Embedded { bits_written: usize },
    /// 已存在有效水印，缓冲区未被修改。
    AlreadyWatermarked { text: String },
}

/// 幂等嵌入。
///
/// 是否已有水印只看结构 (魔数、长度、完整载荷)，与文本编码无关：
/// 载荷不能按 `encoding` 解码时按 Latin-1 报告，缓冲区同样保持不变。
/// `Corrupted` 和 `Truncated` 都不算有效水印，会像 `NotWatermarked` 一样继续嵌入。
///
/// # Errors
///
/// 透传 `embed` 的错误；此时缓冲区保持原样。
pub fn embed_idempotent(
    buffer: &mut PixelBuffer,
    text: &str,
    encoding: PayloadEncoding,
) -> Result<EmbedOutcome, EmbedError> {
    match read_payload(buffer) {
        Ok(payload) => {
            let existing = decode_text(&payload, encoding)
                .or_else(|_| decode_text(&payload, PayloadEncoding::Latin1))
                .unwrap_or_default();
            debug!(existing = %existing, "Image already watermarked, skipping embed");
            Ok(EmbedOutcome::AlreadyWatermarked { text: existing })
        }
        Err(detected) => {
            debug!(detected = ?detected, "No valid watermark, embedding");
            let bits_written = embed(buffer, text, encoding)?;
            Ok(EmbedOutcome::Embedded { bits_written })
        }
    }
}

/// 携带载荷编码配置的水印器。默认使用 `Latin1`，与既有水印逐位兼容。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Watermarker {
    encoding: PayloadEncoding,
}

impl Watermarker {
    pub fn new(encoding: PayloadEncoding) -> Self {
        Self { encoding }
    }

    /// 见 [`embed_idempotent`]。
    pub fn embed(&self, buffer: &mut PixelBuffer, text: &str) -> Result<EmbedOutcome, EmbedError> {
        embed_idempotent(buffer, text, self.encoding)
    }

    pub fn detect(&self, buffer: &PixelBuffer) -> DetectResult {
        detect(buffer, self.encoding)
    }

    pub fn extract(&self, buffer: &PixelBuffer) -> Result<String, ExtractError> {
        extract(buffer, self.encoding)
    }
}
