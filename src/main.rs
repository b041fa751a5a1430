//! CLI 主程序入口
//!
//! 读取一份标记文件，运行转换流程，把改写后的文本写到标准输出或
//! 指定文件。诊断信息走 stderr，致命错误以非零退出码结束。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use modulith::core::{render_import_manifest, transform, TransformOptions};
use modulith::parsers::html::sources::SourceRules;

#[derive(Parser)]
#[command(
    name = "modulith",
    version,
    about = "Turn markup files into modules with tracked resource dependencies"
)]
struct Cli {
    /// 输入的标记文件
    input: PathBuf,

    /// 改写结果的输出文件（缺省写到标准输出）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 根相对路径（/...）的解析基底
    #[arg(long)]
    root: Option<String>,

    /// 关闭内置的源属性规则表（不重写任何属性）
    #[arg(long)]
    no_sources: bool,

    /// 在标准错误上打印导入清单
    #[arg(long)]
    show_imports: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let markup = match fs::read_to_string(&cli.input) {
        Ok(markup) => markup,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", cli.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let options = TransformOptions {
        sources: if cli.no_sources {
            SourceRules::none()
        } else {
            SourceRules::default()
        },
        root: cli.root,
        ..TransformOptions::default()
    };

    let output = match transform(&markup, &options) {
        Ok(output) => output,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &output.diagnostics {
        eprintln!("Warning: {}: {}", cli.input.display(), diagnostic);
    }

    if cli.show_imports {
        eprint!("{}", render_import_manifest(&output.imports));
    }

    match cli.output {
        Some(path) => {
            if let Err(error) = fs::write(&path, output.markup) {
                eprintln!("Error: could not write {}: {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        }
        None => print!("{}", output.markup),
    }

    ExitCode::SUCCESS
}
