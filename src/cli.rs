//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::payload::PayloadEncoding;
use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 的不可见水印工具，用于在无损格式图像 (如 PNG, BMP) 中嵌入或提取文本水印。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 的不可见水印工具，用于在无损格式图像 (如 PNG, BMP) 中嵌入或提取文本水印。已带水印的图像不会被重复嵌入。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中嵌入不可见文本水印，输出为 PNG。
    Embed(EmbedArgs),

    /// 从带水印的图像中提取水印文本。
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 待加水印的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 水印文本；与 `--text-file` 都未提供时使用默认值 "TectonicaAI"。
    #[arg(short, long, conflicts_with = "text_file")]
    pub text: Option<String>,

    /// 从文件读取水印文本。
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// 输出 PNG 路径，默认为输入文件旁的 `watermarked_<原文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 载荷文本编码。
    #[arg(short, long, value_enum, default_value_t = PayloadEncoding::Latin1)]
    pub encoding: PayloadEncoding,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 带水印的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存水印文本的输出路径；未提供时打印到标准输出。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 载荷文本编码，必须与嵌入时一致。
    #[arg(short, long, value_enum, default_value_t = PayloadEncoding::Latin1)]
    pub encoding: PayloadEncoding,
}
