//! # 载荷文本编码模块
//!
//! 决定水印文本如何变成载荷比特，以及如何从比特还原成文本。

use crate::bits::{BitStream, bits_to_bytes, bits_to_text, bytes_to_bits, text_to_bits};
use clap::ValueEnum;
use std::str::Utf8Error;
use tracing::warn;

/// 水印文本的字节编码方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PayloadEncoding {
    /// 每个字符取码点的低 8 位，长度字段统计字符数。
    /// 与既有的已加水印图像逐位兼容；码点超过 U+00FF 的字符会被截断。
    #[default]
    Latin1,

    /// 载荷为文本的 UTF-8 字节，长度字段统计编码后的字节数。
    Utf8,
}

/// 把文本编码为载荷比特，长度总是 8 的倍数。
pub fn encode_text(text: &str, encoding: PayloadEncoding) -> BitStream {
    match encoding {
        PayloadEncoding::Latin1 => {
            let truncated = text.chars().filter(|&c| u32::from(c) > 0xFF).count();
            if truncated > 0 {
                warn!(
                    truncated,
                    "Watermark text contains characters above U+00FF; their high bits are discarded"
                );
            }
            text_to_bits(text)
        }
        PayloadEncoding::Utf8 => bytes_to_bits(text.as_bytes()),
    }
}

/// 把载荷比特解码为文本。
///
/// # Errors
///
/// 仅在 `Utf8` 编码下，字节不是合法的 UTF-8 时返回错误。
pub fn decode_text(bits: &[bool], encoding: PayloadEncoding) -> Result<String, Utf8Error> {
    match encoding {
        PayloadEncoding::Latin1 => Ok(bits_to_text(bits)),
        PayloadEncoding::Utf8 => String::from_utf8(bits_to_bytes(bits)).map_err(|e| e.utf8_error()),
    }
}
