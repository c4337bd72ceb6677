use crate::constants::HEADER_BITS;
use crate::error::CapacityExceeded;
use crate::pixels::PixelBuffer;

/// 缓冲区能承载的比特数：每个非 alpha 字节恰好 1 bit。
pub fn usable_bit_capacity(buffer: &PixelBuffer) -> usize {
    buffer.eligible_len()
}

/// 在修改任何像素之前，检查 `payload_bit_count` (含 64 bits 头部) 是否放得下。
///
/// # Errors
///
/// 超出容量时返回 `CapacityExceeded`，其中 `max_chars = (capacity - 64) / 8`。
pub fn check_capacity(buffer: &PixelBuffer, payload_bit_count: usize) -> Result<(), CapacityExceeded> {
    let capacity = usable_bit_capacity(buffer);

    if payload_bit_count > capacity {
        return Err(CapacityExceeded {
            max_chars: capacity.saturating_sub(HEADER_BITS) / 8,
            requested_chars: payload_bit_count.saturating_sub(HEADER_BITS) / 8,
        });
    }

    Ok(())
}
