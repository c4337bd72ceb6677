//! # 错误类型模块
//!
//! 水印编解码器对外返回的全部错误类型。
//! 库内部只返回这些类型化的错误，由调用方 (例如命令处理逻辑) 决定如何呈现给用户。

use thiserror::Error;

/// 水印载荷超出了图像可承载的容量。
///
/// `max_chars` 是该图像最多能写入的载荷字节数 (已扣除 64 bits 头部)，
/// 调用方可以直接把它报告给用户。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Watermark too long. Max capacity: {max_chars} characters, provided: {requested_chars}")]
pub struct CapacityExceeded {
    pub max_chars: usize,
    pub requested_chars: usize,
}

/// 嵌入水印时可能发生的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),

    #[error("Watermark text cannot be empty")]
    EmptyText,

    #[error("Watermark payload of {len} bytes exceeds the format limit of {max} bytes")]
    TextTooLong { len: usize, max: usize },
}

/// 单次提取接口的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No watermark found: magic number does not match")]
    NotWatermarked,

    #[error("Watermark header is corrupted: {reason}")]
    Corrupted { reason: String },

    #[error("Insufficient data. Expected {expected} bits, got {got} bits")]
    Truncated { expected: usize, got: usize },
}

/// 像素缓冲区的构造以及图像格式的解码/编码错误。
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid image: {0}")]
    InvalidImage(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),

    #[error(
        "Invalid pixel buffer: {width}x{height}x{channels} does not match data length {len}"
    )]
    InvalidDimensions {
        width: u32,
        height: u32,
        channels: u8,
        len: usize,
    },
}
