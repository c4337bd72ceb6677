//! # 比特打包模块
//!
//! 文本、整数与定长比特序列之间的纯函数转换。所有比特序列均为高位在前 (MSB-first)。

/// 有序的 0/1 序列，只在一次嵌入或提取调用内存在。
pub type BitStream = Vec<bool>;

/// 文本转比特：每个字符取 `code & 0xFF`，按 MSB-first 追加 8 bits。
pub fn text_to_bits(text: &str) -> BitStream {
    let bytes: Vec<u8> = text.chars().map(|c| (u32::from(c) & 0xFF) as u8).collect();
    bytes_to_bits(&bytes)
}

/// 字节序列转比特，每个字节 8 bits，MSB-first。
pub fn bytes_to_bits(bytes: &[u8]) -> BitStream {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// 把 `n` 按大端序写成恰好 `width` 个比特，不足的高位补 0。
pub fn number_to_bits(n: u32, width: usize) -> BitStream {
    debug_assert!(width <= 32, "width must not exceed 32 bits");
    (0..width)
        .rev()
        .map(|shift| (u64::from(n) >> shift) & 1 == 1)
        .collect()
}

/// 比特转文本：每 8 bits 还原为一个 0-255 的字符，不足 8 bits 的尾部被丢弃。
pub fn bits_to_text(bits: &[bool]) -> String {
    bits_to_bytes(bits).into_iter().map(char::from).collect()
}

/// 比特转字节，每 8 bits 组成一个字节，不足 8 bits 的尾部被丢弃。
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

/// `number_to_bits` 的逆运算，按大端序解析。
pub fn bits_to_number(bits: &[bool]) -> u32 {
    bits.iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)) as u32
}
