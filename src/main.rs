use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use profile_store::{
    cli,
    config::{default_data_dir, StoreConfig},
    logging, FileStorage, ProfileStore,
};

/// Profile Store CLI
///
/// 读写本地持久化的用户档案
#[derive(Parser)]
#[command(name = "profile-store")]
#[command(author, version, about)]
#[command(
    long_about = "Reads and writes the locally persisted user profile.\n\
                  Set PROFILE_DEMO_MODE=1 to seed a demo profile on first run."
)]
struct Cli {
    /// 数据目录（默认：平台数据目录下的 profile-store）
    #[arg(long, global = true, env = "PROFILE_STORE_DIR")]
    data_dir: Option<PathBuf>,

    /// 强制开启演示模式
    #[arg(long, global = true)]
    demo_mode: bool,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示当前档案
    Show {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 更新部分字段（field=value）
    Set {
        /// 例如：name="Jisoo Jang" phone=604-555-0192
        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// 清空档案并删除存储数据
    Reset,

    /// 加载演示档案
    Demo,

    /// 列出所有字段
    Fields,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Commands::Fields = cli.command {
        return cli::list_fields();
    }

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let mut config = StoreConfig::from_env();
    if cli.demo_mode {
        config = config.with_demo_mode(true);
    }

    let store = ProfileStore::open(Arc::new(FileStorage::new(data_dir)), config).await;

    let result = match cli.command {
        Commands::Show { json } => cli::show_profile(&store, json),
        Commands::Set { assignments } => cli::set_fields(&store, &assignments),
        Commands::Reset => cli::reset_profile(&store),
        Commands::Demo => cli::run_live_demo(&store),
        Commands::Fields => cli::list_fields(),
    };

    // 进程退出前等待后台持久化完成
    store.flush().await;
    result
}
