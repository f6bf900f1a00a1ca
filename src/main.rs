use anyhow::Result;
use bulletin_grades::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    let stats = App::initialize(config).await?.run().await?;

    if stats.total > 0 && stats.success == 0 {
        anyhow::bail!("所有班级均处理失败");
    }

    Ok(())
}
