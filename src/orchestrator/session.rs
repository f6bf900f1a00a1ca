//! 交互会话 - 编排层
//!
//! 保存最近一次完成加载的 [`GradeTable`]，供渲染器反复使用：
//! - 后完成的加载覆盖先完成的（watch 通道，last-writer-wins）
//! - 切换学年/学期标签时直接重新组装，不重新取数和解析
//! - 进行中的加载可以取消，取消点在取数的 await 上

use crate::clients::TabularSource;
use crate::error::{AppError, AppResult};
use crate::models::grade::GradeTable;
use crate::models::report::ClassReport;
use crate::models::school::SchoolConfig;
use crate::workflow::{ClassCtx, ClassFlow};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 一次完成的加载
#[derive(Debug)]
pub struct LoadedTable {
    pub ctx: ClassCtx,
    pub source: String,
    pub table: GradeTable,
}

/// 报告会话
pub struct ReportSession {
    school: Arc<SchoolConfig>,
    latest: Arc<watch::Sender<Option<Arc<LoadedTable>>>>,
}

impl ReportSession {
    pub fn new(school: SchoolConfig) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            school: Arc::new(school),
            latest: Arc::new(latest),
        }
    }

    /// 订阅加载结果的变化
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<LoadedTable>>> {
        self.latest.subscribe()
    }

    /// 当前最新的加载结果
    pub fn latest(&self) -> Option<Arc<LoadedTable>> {
        self.latest.borrow().clone()
    }

    /// 在后台加载一个班级
    ///
    /// 成功后发布到会话；失败只记录日志，不影响已有结果。
    pub fn spawn_load<S>(&self, source: S, ctx: ClassCtx) -> LoadHandle
    where
        S: TabularSource + Send + Sync + 'static,
    {
        let school = self.school.clone();
        let latest = self.latest.clone();

        let handle = tokio::spawn(async move {
            let table = ClassFlow::new(&school).load(&source, &ctx).await?;
            let loaded = Arc::new(LoadedTable {
                ctx,
                source: source.location(),
                table,
            });
            latest.send_replace(Some(loaded.clone()));
            Ok::<_, AppError>(loaded)
        });

        LoadHandle { handle }
    }

    /// 用最新的表格重新组装成绩单
    ///
    /// `year` / `semester` 只影响标题等标签，计算结果不变。没有已完成的加载时返回 None。
    pub fn render(&self, year: &str, semester: &str) -> Option<ClassReport> {
        let loaded = self.latest()?;
        let ctx = ClassCtx::new(year, semester, loaded.ctx.class_name.clone());
        Some(ClassFlow::new(&self.school).render(&loaded.table, &ctx, &loaded.source))
    }
}

/// 后台加载任务句柄
pub struct LoadHandle {
    handle: JoinHandle<AppResult<Arc<LoadedTable>>>,
}

impl LoadHandle {
    /// 取消加载
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 等待加载结束
    ///
    /// 被取消时返回 None
    pub async fn wait(self) -> Option<AppResult<Arc<LoadedTable>>> {
        match self.handle.await {
            Ok(result) => Some(result),
            Err(e) if e.is_cancelled() => {
                info!("⏹️ 加载已取消");
                None
            }
            Err(e) => {
                warn!("加载任务异常结束: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InlineSource;
    use crate::models::table::RawTable;
    use std::time::Duration;

    fn source(name: &str, score: &str) -> InlineSource {
        InlineSource::new(
            name,
            RawTable::from_rows([
                vec!["#", "NOM", "PRÉNOM", "FIQH"],
                vec!["", "", "", "20"],
                vec!["1", "Ali", "Omar", score],
            ]),
        )
    }

    struct SlowSource;

    impl TabularSource for SlowSource {
        fn location(&self) -> String {
            "slow".to_string()
        }

        async fn fetch(&self) -> AppResult<RawTable> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(RawTable::default())
        }
    }

    #[tokio::test]
    async fn test_latest_completed_load_wins() {
        let session = ReportSession::new(SchoolConfig::default());
        assert!(session.latest().is_none());

        let first = session.spawn_load(source("a", "10"), ClassCtx::new("2025-2026", "1", "M06"));
        first.wait().await.unwrap().unwrap();
        let second = session.spawn_load(source("b", "16"), ClassCtx::new("2025-2026", "1", "M07"));
        second.wait().await.unwrap().unwrap();

        let latest = session.latest().unwrap();
        assert_eq!(latest.source, "b");
        assert_eq!(latest.ctx.class_name, "M07");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous() {
        let session = ReportSession::new(SchoolConfig::default());
        session
            .spawn_load(source("ok", "12"), ClassCtx::new("2025-2026", "1", "M06"))
            .wait()
            .await
            .unwrap()
            .unwrap();

        let broken = InlineSource::new("broken", RawTable::from_rows([vec!["#"]]));
        let result = session
            .spawn_load(broken, ClassCtx::new("2025-2026", "1", "M07"))
            .wait()
            .await
            .unwrap();
        assert!(result.is_err());
        assert_eq!(session.latest().unwrap().source, "ok");
    }

    #[tokio::test]
    async fn test_cancelled_load_publishes_nothing() {
        let session = ReportSession::new(SchoolConfig::default());
        let handle = session.spawn_load(SlowSource, ClassCtx::new("2025-2026", "1", "M06"));
        handle.cancel();
        assert!(handle.wait().await.is_none());
        assert!(session.latest().is_none());
    }

    #[tokio::test]
    async fn test_rerender_for_other_semester() {
        let session = ReportSession::new(SchoolConfig::default());
        let updates = session.subscribe();
        session
            .spawn_load(source("a", "14"), ClassCtx::new("2025-2026", "1", "M06"))
            .wait()
            .await
            .unwrap()
            .unwrap();
        assert!(updates.has_changed().unwrap());

        let first = session.render("2025-2026", "1").unwrap();
        let second = session.render("2024-2025", "2").unwrap();
        assert_eq!(first.cards[0].title, "BULLETIN DU 1ER SEMESTRE 2025/2026");
        assert_eq!(second.cards[0].title, "BULLETIN DU 2ND SEMESTRE 2024/2025");
        assert_eq!(first.cards[0].metrics, second.cards[0].metrics);
        assert_eq!(second.class_name, "M06");
    }
}
