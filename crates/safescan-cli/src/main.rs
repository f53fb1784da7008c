use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use safescan_core::{scan_and_write, ScanOptions, DEFAULT_REPORT_PATH};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "safescan", version, about = "SafeScan - 简易本地文件扫描器")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描目录，可选隔离可疑文件，并生成 JSON 报告
    Scan {
        /// 扫描根目录
        #[arg(long, short = 'p')]
        path: PathBuf,

        /// 隔离目录（不指定则只报告、不移动文件）
        #[arg(long, short = 'q')]
        quarantine: Option<PathBuf>,

        /// 报告输出文件（JSON）
        #[arg(long, short = 'r', default_value = DEFAULT_REPORT_PATH)]
        report: PathBuf,

        /// 规则文件路径（TOML），不指定则使用内置规则
        #[arg(long)]
        rules: Option<PathBuf>,

        /// 跟随符号链接进入目录（带环路检测）
        #[arg(long)]
        follow_links: bool,

        /// 输出详细过程（可疑文件、隔离动作）
        #[arg(long, short = 'v')]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { path, quarantine, report, rules, follow_links, verbose } => {
            // 初始化日志（RUST_LOG 优先；否则 --verbose 决定 info / warn）
            init_tracing(verbose);
            info!(?path, ?quarantine, ?report, "starting safescan");

            let opts = ScanOptions {
                root: path,
                quarantine_dir: quarantine,
                report_path: report,
                rules_path: rules,
                follow_links,
            };
            let result = scan_and_write(&opts).context("scan failed")?;

            println!(
                "scanned {} files, {} suspicious; report saved to {}",
                result.total_visited(),
                result.total_flagged(),
                opts.report_path.display()
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let default = if verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
