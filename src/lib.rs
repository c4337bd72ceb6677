//! # lsb_watermark 库
//!
//! 本库包含 LSB 不可见水印的核心编解码逻辑，以及命令行工具使用的处理逻辑。
//!
//! 比特布局 (均为 MSB-first)：
//!
//! | 比特 | 字段 | 编码 |
//! |---|---|---|
//! | 0-31 | 魔数 | `0x574D3031` |
//! | 32-63 | 长度 (字节) | 无符号 32 位大端序 |
//! | 64.. | 载荷 | 每字节 8 bits |
//!
//! 4 通道图像的 alpha 字节在嵌入和提取时都会被跳过。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod detect;
pub mod embed;
pub mod error;
pub mod guard;
pub mod handler;
pub mod logger;
pub mod payload;
pub mod pixels;

pub use codec::{PixelCodec, PngCodec};
pub use detect::DetectResult;
pub use error::{CapacityExceeded, CodecError, EmbedError, ExtractError};
pub use guard::{EmbedOutcome, Watermarker};
pub use payload::PayloadEncoding;
pub use pixels::PixelBuffer;

/// 以默认配置 (Latin-1 载荷) 幂等地嵌入水印。
pub fn embed_watermark(buffer: &mut PixelBuffer, text: &str) -> Result<EmbedOutcome, EmbedError> {
    Watermarker::default().embed(buffer, text)
}

/// 以默认配置 (Latin-1 载荷) 提取水印。
pub fn extract_watermark(buffer: &PixelBuffer) -> Result<String, ExtractError> {
    Watermarker::default().extract(buffer)
}
