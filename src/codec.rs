//! # 图像格式适配模块
//!
//! 核心算法只依赖 `PixelCodec` trait，测试可以直接构造内存中的 `PixelBuffer`。
//! `PngCodec` 是基于 `image` crate 的默认实现。

use crate::error::CodecError;
use crate::pixels::PixelBuffer;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

/// 原始像素与图像文件字节之间的转换。
pub trait PixelCodec {
    /// 解码图像字节，结果总是带 alpha 通道 (4 通道)。
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError>;

    /// 把像素编码为无损容器，每个字节值都必须原样保留。
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError>;
}

/// 读取 PNG, BMP, TIFF, WebP, QOI，输出无调色板、无滤波的 PNG。
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl PixelCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
        let image = image::load_from_memory(bytes).map_err(CodecError::InvalidImage)?;

        debug!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Decoded source image"
        );

        // 缺少 alpha 的源图在这里补上不透明 alpha
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, 4, rgba.into_raw())
    }

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
        let color = match buffer.channels() {
            3 => ExtendedColorType::Rgb8,
            4 => ExtendedColorType::Rgba8,
            other => return Err(CodecError::UnsupportedChannels(other)),
        };

        let mut out = Vec::new();
        PngEncoder::new_with_quality(&mut out, CompressionType::Default, FilterType::NoFilter)
            .write_image(buffer.data(), buffer.width(), buffer.height(), color)
            .map_err(CodecError::Encode)?;

        debug!(bytes = out.len(), "Encoded lossless PNG");
        Ok(out)
    }
}
