//! # 水印检测与提取模块
//!
//! 按嵌入时相同的遍历顺序读回最低有效位，校验头部并还原文本。
//! 检测结果是类型化的 `DetectResult`，“没有水印”是正常结果而不是错误。

use crate::bits::{BitStream, bits_to_number};
use crate::constants::{FIELD_BITS, HEADER_BITS, MAGIC, MAX_TEXT_LEN};
use crate::error::ExtractError;
use crate::payload::{PayloadEncoding, decode_text};
use crate::pixels::PixelBuffer;
use tracing::debug;

/// 一次检测的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectResult {
    /// 魔数不匹配，图像未加水印。
    NotWatermarked,
    /// 找到完整有效的水印。
    Watermarked(String),
    /// 魔数匹配，但头部或载荷无效。
    Corrupted(String),
    /// 魔数和长度有效，但可读取的比特不足。
    Truncated { expected: usize, got: usize },
}

/// 只做结构解析：校验魔数与长度并读出完整的载荷比特，不涉及文本编码。
///
/// 最多读取 `64 + 8 * MAX_TEXT_LEN` 个可用字节，且只收集解析所需的比特，
/// 内存占用与图像尺寸无关。
///
/// # Errors
///
/// 没有完整水印时，返回对应的 `NotWatermarked`、`Corrupted` 或 `Truncated`。
pub fn read_payload(buffer: &PixelBuffer) -> Result<BitStream, DetectResult> {
    let window = HEADER_BITS + 8 * MAX_TEXT_LEN;
    let mut lsbs = buffer.eligible_lsbs().take(window);

    let header: BitStream = lsbs.by_ref().take(HEADER_BITS).collect();
    if header.len() < FIELD_BITS {
        return Err(DetectResult::NotWatermarked);
    }

    let magic = bits_to_number(&header[..FIELD_BITS]);
    if magic != MAGIC {
        debug!("Magic number mismatch: {magic:#010x}");
        return Err(DetectResult::NotWatermarked);
    }

    if header.len() < HEADER_BITS {
        return Err(DetectResult::Truncated {
            expected: HEADER_BITS,
            got: header.len(),
        });
    }

    let length = bits_to_number(&header[FIELD_BITS..HEADER_BITS]) as usize;
    debug!(length, "Found watermark header");
    if length == 0 || length > MAX_TEXT_LEN {
        return Err(DetectResult::Corrupted("invalid length".to_owned()));
    }

    let expected = 8 * length;
    let payload: BitStream = lsbs.take(expected).collect();
    if payload.len() < expected {
        return Err(DetectResult::Truncated {
            expected,
            got: payload.len(),
        });
    }

    Ok(payload)
}

/// 检测缓冲区中是否带有水印，并按 `encoding` 解码载荷。
pub fn detect(buffer: &PixelBuffer, encoding: PayloadEncoding) -> DetectResult {
    let payload = match read_payload(buffer) {
        Ok(payload) => payload,
        Err(result) => return result,
    };

    match decode_text(&payload, encoding) {
        Ok(text) => DetectResult::Watermarked(text),
        Err(_) => DetectResult::Corrupted("payload is not valid UTF-8".to_owned()),
    }
}

/// 单次提取接口：把 `detect` 的非成功结果映射为不同的错误。
///
/// # Errors
///
/// 分别对应 `NotWatermarked`、`Corrupted`、`Truncated`。
pub fn extract(buffer: &PixelBuffer, encoding: PayloadEncoding) -> Result<String, ExtractError> {
    match detect(buffer, encoding) {
        DetectResult::Watermarked(text) => Ok(text),
        DetectResult::NotWatermarked => Err(ExtractError::NotWatermarked),
        DetectResult::Corrupted(reason) => Err(ExtractError::Corrupted { reason }),
        DetectResult::Truncated { expected, got } => Err(ExtractError::Truncated { expected, got }),
    }
}
