use crate::bits::{BitStream, number_to_bits};
use crate::capacity::check_capacity;
use crate::constants::{FIELD_BITS, MAGIC, MAX_TEXT_LEN};
use crate::error::EmbedError;
use crate::payload::{PayloadEncoding, encode_text};
use crate::pixels::PixelBuffer;
use tracing::debug;

/// 构造完整比特流：魔数 (32 bits) + 长度 (32 bits, 以字节计) + 载荷。
pub fn watermark_bits(payload: &[bool]) -> BitStream {
    let mut bits = number_to_bits(MAGIC, FIELD_BITS);
    bits.extend(number_to_bits((payload.len() / 8) as u32, FIELD_BITS));
    bits.extend_from_slice(payload);
    bits
}

/// 把 `text` 写入缓冲区非 alpha 字节的最低有效位，返回写入的比特数。
///
/// 写入前先完成全部校验，失败时缓冲区保持原样。
/// 相同的 `(buffer, text, encoding)` 总是得到相同的输出字节。
///
/// # Errors
///
/// * `EmptyText`：编码后的载荷为空，写入后将无法被识别。
/// * `TextTooLong`：载荷超过 `MAX_TEXT_LEN` 字节。
/// * `CapacityExceeded`：图像容量不足。
pub fn embed(buffer: &mut PixelBuffer, text: &str, encoding: PayloadEncoding) -> Result<usize, EmbedError> {
    let payload = encode_text(text, encoding);
    let payload_bytes = payload.len() / 8;

    if payload_bytes == 0 {
        return Err(EmbedError::EmptyText);
    }
    if payload_bytes > MAX_TEXT_LEN {
        return Err(EmbedError::TextTooLong {
            len: payload_bytes,
            max: MAX_TEXT_LEN,
        });
    }

    let bits = watermark_bits(&payload);
    check_capacity(buffer, bits.len())?;

    // zip 在比特耗尽时停止，其余字节保持不变
    buffer
        .eligible_bytes_mut()
        .zip(bits.iter())
        .for_each(|(byte, &bit)| *byte = (*byte & 0xFE) | u8::from(bit));

    debug!(
        payload_bytes,
        bits = bits.len(),
        "Embedded watermark"
    );

    Ok(bits.len())
}
