//! # 像素缓冲区模块
//!
//! 解码后的原始像素数据 (行优先、通道交错)，以及嵌入和提取共用的“可用字节”遍历顺序。

use crate::error::CodecError;

/// 行优先、通道交错的原始像素数据。
///
/// 当 `channels == 4` 时，每个像素的第 4 个字节是 alpha，
/// 它既不承载水印比特，也永远不会被修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 构造像素缓冲区，并校验通道数和数据长度。
    ///
    /// # Errors
    ///
    /// * 通道数不是 3 或 4。
    /// * `data.len()` 不等于 `width * height * channels`。
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, CodecError> {
        if !matches!(channels, 3 | 4) {
            return Err(CodecError::UnsupportedChannels(channels));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels as usize));

        if expected != Some(data.len()) {
            return Err(CodecError::InvalidDimensions {
                width,
                height,
                channels,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 可承载比特的字节数：总字节数减去 alpha 字节。
    pub fn eligible_len(&self) -> usize {
        if self.channels == 4 {
            self.data.len() - self.data.len() / 4
        } else {
            self.data.len()
        }
    }

    /// 按索引顺序遍历所有非 alpha 字节的可变引用。
    pub fn eligible_bytes_mut(&mut self) -> impl Iterator<Item = &mut u8> {
        let skip_alpha = self.channels == 4;
        self.data
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| !(skip_alpha && i % 4 == 3))
            .map(|(_, byte)| byte)
    }

    /// 按与 `eligible_bytes_mut` 相同的顺序，惰性读出每个非 alpha 字节的最低有效位。
    pub fn eligible_lsbs(&self) -> impl Iterator<Item = bool> {
        let skip_alpha = self.channels == 4;
        self.data
            .iter()
            .enumerate()
            .filter(move |(i, _)| !(skip_alpha && i % 4 == 3))
            .map(|(_, &byte)| byte & 1 == 1)
    }
}
