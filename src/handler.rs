//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像解码/编码、调用水印核心算法以及向用户报告结果。

use crate::cli::{EmbedArgs, ExtractArgs};
use crate::codec::{PixelCodec, PngCodec};
use crate::constants::{DEFAULT_WATERMARK, MAX_WATERMARK_CHARS};
use crate::guard::{EmbedOutcome, Watermarker};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 未指定输出路径时，在输入文件旁生成 `watermarked_<原文件名>.png`。
fn default_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    image.with_file_name(format!("watermarked_{stem}.png"))
}

/// 目标文件已存在且未指定 `--force` 时拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 去掉编辑器在文件末尾添加的一个换行符。
fn strip_line_ending(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// 按 `--text`、`--text-file`、默认值的顺序确定水印文本。
fn resolve_text(args: &EmbedArgs) -> Result<String> {
    match (&args.text, &args.text_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => {
            let content = fs::read_to_string(path).with_context(|| {
                format!(
                    "Unable to read watermark text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            Ok(strip_line_ending(&content).to_owned())
        }
        (None, None) => Ok(DEFAULT_WATERMARK.to_owned()),
    }
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// 读取并解码输入图像，校验水印文本，幂等地嵌入水印，最后把结果编码为无损 PNG 写入目标路径。
/// 若图像已带有效水印，则不写入任何文件，只报告现有水印，此时也不检查目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与水印文本的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 水印文本为空，或超过 1000 个字符。
/// * 无法读取或解码输入图像。
/// * 图像容量不足以容纳水印。
/// * 无法编码或写入目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let dest = args.dest.clone().unwrap_or_else(|| default_dest(&args.image));

    let text = resolve_text(&args)?;
    anyhow::ensure!(!text.trim().is_empty(), "Watermark text cannot be empty.");

    let char_count = text.chars().count();
    anyhow::ensure!(
        char_count <= MAX_WATERMARK_CHARS,
        "Watermark too long. \nMaximum: {}, Provided: {}",
        MAX_WATERMARK_CHARS.to_string().green().bold(),
        char_count.to_string().red().bold()
    );

    let bytes = fs::read(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let codec = PngCodec;
    let mut buffer = codec.decode(&bytes).with_context(|| {
        format!(
            "Unable to decode image: {}. \nOnly lossless formats (PNG, BMP, TIFF, WebP, QOI) are supported.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels(),
        "Decoded image"
    );

    let watermarker = Watermarker::new(args.encoding);
    let outcome = watermarker
        .embed(&mut buffer, &text)
        .with_context(|| "Failed to embed the watermark into the image.")?;

    match outcome {
        EmbedOutcome::AlreadyWatermarked { text: existing } => {
            info!(existing = %existing, "Skipped embedding, image already watermarked");
            println!(
                "The image is already watermarked with: {}. \nNo file was written.",
                existing.yellow().bold()
            );
        }
        EmbedOutcome::Embedded { bits_written } => {
            ensure_writable(&dest, args.force)?;

            let encoded = codec
                .encode(&buffer)
                .with_context(|| "Failed to encode the watermarked image as PNG.")?;

            fs::write(&dest, encoded).with_context(|| {
                format!(
                    "Unable to write to target image file: {}",
                    dest.to_string_lossy().red().bold()
                )
            })?;

            info!(bits_written, dest = %dest.display(), "Watermark embedded");
            println!(
                "The watermark has been successfully embedded and saved: {}",
                dest.to_string_lossy().green().bold()
            );
        }
    }

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 读取并解码图像、提取水印文本，最后写入目标文本文件或打印到标准输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取或解码输入图像。
/// * 图像中没有水印，或水印已损坏/不完整。
/// * 无法写入到目标文本文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    if let Some(output) = &args.output {
        ensure_writable(output, args.force)?;
    }

    let bytes = fs::read(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let buffer = PngCodec.decode(&bytes).with_context(|| {
        format!(
            "Unable to decode image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = Watermarker::new(args.encoding)
        .extract(&buffer)
        .with_context(|| {
            format!(
                "Failed to extract a watermark from '{}'. \nThe image may not be watermarked, or was compressed/modified.",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    info!(chars = text.chars().count(), "Watermark extracted");

    match &args.output {
        Some(output) => {
            fs::write(output, &text).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    output.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The watermark has been successfully extracted and saved: {}",
                output.to_string_lossy().green().bold()
            );
        }
        None => println!("{text}"),
    }

    Ok(())
}
