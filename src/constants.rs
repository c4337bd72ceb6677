/// 水印格式的魔数，ASCII 为 "WM01"。
/// 位于比特流最前面，用于区分“已加水印”与“普通图像”。
pub const MAGIC: u32 = 0x574D_3031;

/// 头部中每个定长字段 (魔数、长度) 占用的比特数。
pub const FIELD_BITS: usize = 32;

/// 头部总比特数：魔数 32 bits + 长度 32 bits。
pub const HEADER_BITS: usize = FIELD_BITS * 2;

/// 载荷允许的最大字节数。
/// 提取时只扫描 `HEADER_BITS + 8 * MAX_TEXT_LEN` 个比特，与图像大小无关。
pub const MAX_TEXT_LEN: usize = 10_000;

/// 调用方未指定水印文本时使用的默认值。
pub const DEFAULT_WATERMARK: &str = "TectonicaAI";

/// 命令行层面允许的水印最大字符数。
pub const MAX_WATERMARK_CHARS: usize = 1_000;
