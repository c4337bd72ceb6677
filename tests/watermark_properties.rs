use lsb_watermark::{
    DetectResult, EmbedError, EmbedOutcome, ExtractError, PayloadEncoding, PixelBuffer,
    PixelCodec, PngCodec, Watermarker, embed_watermark, extract_watermark,
};
use lsb_watermark::capacity::usable_bit_capacity;
use lsb_watermark::error::CapacityExceeded;
use rand::{Rng, RngCore};

/// 一个辅助函数，用于创建一个带有随机像素的 RGBA 缓冲区
fn random_rgba(width: u32, height: u32) -> PixelBuffer {
    let mut data = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut data);
    PixelBuffer::new(width, height, 4, data).expect("valid dimensions")
}

fn random_latin1(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len).map(|_| char::from(rng.random::<u8>())).collect()
}

/// 场景 A：64x64 RGBA 嵌入 "TectonicaAI" 后可被检测
#[test]
fn test_scenario_a_embed_and_detect() {
    let mut buffer = random_rgba(64, 64);
    assert_eq!(buffer.data().len(), 16_384);
    assert_eq!(usable_bit_capacity(&buffer), 12_288);

    let outcome = embed_watermark(&mut buffer, "TectonicaAI").unwrap();
    assert_eq!(
        outcome,
        EmbedOutcome::Embedded {
            bits_written: 64 + 8 * 11
        }
    );
    assert_eq!(
        Watermarker::default().detect(&buffer),
        DetectResult::Watermarked("TectonicaAI".to_owned())
    );
}

/// 场景 B：10x10 RGBA (300 个可用比特) 的容量边界
#[test]
fn test_scenario_b_capacity_boundary() {
    let mut fits = random_rgba(10, 10);
    assert_eq!(usable_bit_capacity(&fits), 300);
    let text29 = "a".repeat(29);
    assert!(matches!(
        embed_watermark(&mut fits, &text29),
        Ok(EmbedOutcome::Embedded { bits_written: 296 })
    ));
    assert_eq!(extract_watermark(&fits).unwrap(), text29);

    let mut too_small = random_rgba(10, 10);
    let snapshot = too_small.clone();
    let text30 = "a".repeat(30);
    let err = Watermarker::default()
        .embed(&mut too_small, &text30)
        .unwrap_err();
    assert_eq!(
        err,
        EmbedError::CapacityExceeded(CapacityExceeded {
            max_chars: 29,
            requested_chars: 30
        })
    );
    assert_eq!(too_small, snapshot, "rejected embed must not mutate pixels");
}

/// 场景 C：先嵌入 "A"，再次嵌入 "B" 时报告已有水印
#[test]
fn test_scenario_c_idempotent_chain() {
    let mut buffer = random_rgba(32, 32);

    embed_watermark(&mut buffer, "A").unwrap();
    let snapshot = buffer.clone();

    let outcome = embed_watermark(&mut buffer, "B").unwrap();
    assert_eq!(
        outcome,
        EmbedOutcome::AlreadyWatermarked {
            text: "A".to_owned()
        }
    );
    assert_eq!(buffer, snapshot);
    assert_eq!(extract_watermark(&buffer).unwrap(), "A");
}

/// 换用 UTF-8 编码的水印器也不会覆盖已有的 Latin-1 水印
#[test]
fn test_utf8_embed_keeps_latin1_mark() {
    let mut buffer = random_rgba(32, 32);
    embed_watermark(&mut buffer, "café").unwrap();
    let snapshot = buffer.clone();

    let outcome = Watermarker::new(PayloadEncoding::Utf8)
        .embed(&mut buffer, "other")
        .unwrap();
    assert_eq!(
        outcome,
        EmbedOutcome::AlreadyWatermarked {
            text: "café".to_owned()
        }
    );
    assert_eq!(buffer, snapshot);
    assert_eq!(extract_watermark(&buffer).unwrap(), "café");
}

/// 任意 0-255 字节值的文本都能原样往返
#[test]
fn test_round_trip_random_latin1_text() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let len = rng.random_range(1..=1000);
        let text = random_latin1(len);
        let mut buffer = random_rgba(100, 100);

        embed_watermark(&mut buffer, &text).unwrap();
        assert_eq!(extract_watermark(&buffer).unwrap(), text);
    }
}

/// RGB 缓冲区没有 alpha，所有字节都参与
#[test]
fn test_round_trip_on_rgb_buffer() {
    let mut data = vec![0u8; 20 * 20 * 3];
    rand::rng().fill_bytes(&mut data);
    let mut buffer = PixelBuffer::new(20, 20, 3, data).unwrap();

    embed_watermark(&mut buffer, "rgb only").unwrap();
    assert_eq!(extract_watermark(&buffer).unwrap(), "rgb only");
}

/// 嵌入前后 alpha 字节保持不变，且每个字节最多改变 1
#[test]
fn test_alpha_bytes_are_never_touched() {
    let original = random_rgba(50, 50);
    let mut buffer = original.clone();
    embed_watermark(&mut buffer, &random_latin1(200)).unwrap();

    for (i, (&before, &after)) in original.data().iter().zip(buffer.data()).enumerate() {
        if i % 4 == 3 {
            assert_eq!(before, after, "alpha byte {i} changed");
        } else {
            assert!(before.abs_diff(after) <= 1, "byte {i} changed by more than 1");
        }
    }
}

/// 相同输入总是得到相同输出
#[test]
fn test_embedding_is_deterministic() {
    let original = random_rgba(16, 16);
    let mut first = original.clone();
    let mut second = original.clone();

    embed_watermark(&mut first, "same").unwrap();
    embed_watermark(&mut second, "same").unwrap();
    assert_eq!(first, second);
}

/// 随机像素几乎不可能与魔数碰撞
#[test]
fn test_random_pixels_are_not_watermarked() {
    for _ in 0..50 {
        let buffer = random_rgba(32, 32);
        assert_eq!(
            Watermarker::default().detect(&buffer),
            DetectResult::NotWatermarked
        );
        assert_eq!(
            extract_watermark(&buffer),
            Err(ExtractError::NotWatermarked)
        );
    }
}

/// 过长的载荷即使图像放得下也会被拒绝，否则之后无法被识别
#[test]
fn test_payload_over_format_limit_is_rejected() {
    let mut buffer = random_rgba(200, 200);
    let err = embed_watermark(&mut buffer, &"x".repeat(10_001)).unwrap_err();
    assert_eq!(
        err,
        EmbedError::TextTooLong {
            len: 10_001,
            max: 10_000
        }
    );
}

/// 载荷尾部被破坏 (图像被裁小) 时报告 Truncated，幂等嵌入会重新写入
#[test]
fn test_truncated_mark_is_replaced_by_idempotent_embed() {
    let mut large = random_rgba(20, 20);
    embed_watermark(&mut large, &"z".repeat(100)).unwrap();

    // 只保留前 10 个像素：30 个可用比特之后的载荷都丢失了
    let cropped_len = 10 * 4;
    let mut cropped = PixelBuffer::new(10, 1, 4, large.data()[..cropped_len].to_vec()).unwrap();
    assert_eq!(
        Watermarker::default().detect(&cropped),
        DetectResult::NotWatermarked
    );

    // 保留 30 个像素 (90 个可用比特)：头部完整，载荷只剩 26 bits
    let mut partial = PixelBuffer::new(30, 1, 4, large.data()[..120].to_vec()).unwrap();
    assert_eq!(
        Watermarker::default().detect(&partial),
        DetectResult::Truncated {
            expected: 800,
            got: 26
        }
    );

    let outcome = embed_watermark(&mut partial, "ok").unwrap();
    assert!(matches!(outcome, EmbedOutcome::Embedded { .. }));
    assert_eq!(extract_watermark(&partial).unwrap(), "ok");

    // 10 个像素只有 30 个可用比特，连头部都放不下
    assert!(matches!(
        embed_watermark(&mut cropped, "ok"),
        Err(EmbedError::CapacityExceeded(CapacityExceeded { max_chars: 0, .. }))
    ));
}

/// 经过真实 PNG 编码/解码后水印依然完整
#[test]
fn test_watermark_survives_png_round_trip() {
    let codec = PngCodec;
    let mut buffer = random_rgba(40, 30);
    let watermarker = Watermarker::new(PayloadEncoding::Utf8);

    watermarker.embed(&mut buffer, "版权所有 TectonicaAI").unwrap();

    let png = codec.encode(&buffer).unwrap();
    let decoded = codec.decode(&png).unwrap();

    assert_eq!(decoded, buffer, "PNG encoding must preserve every byte");
    assert_eq!(watermarker.extract(&decoded).unwrap(), "版权所有 TectonicaAI");
}

/// 解码 RGB 图像时会补上不透明的 alpha 通道
#[test]
fn test_decode_forces_alpha_channel() {
    let codec = PngCodec;
    let rgb = PixelBuffer::new(4, 4, 3, vec![7u8; 48]).unwrap();
    let png = codec.encode(&rgb).unwrap();

    let decoded = codec.decode(&png).unwrap();
    assert_eq!(decoded.channels(), 4);
    assert!(decoded.data().chunks_exact(4).all(|px| px == [7, 7, 7, 255]));
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(PngCodec.decode(b"definitely not an image").is_err());
}
