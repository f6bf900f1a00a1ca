//! # Bulletin Grades
//!
//! 把学校导出的成绩 CSV 计算为成绩单数据（科目统计 + 学生指标）
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/` - 单元格、表头角色、科目字典、学校配置、成绩单结构
//!
//! ### ② 能力层（Services / Clients）
//! - `ColumnClassifier` - 表头分类（指标规则优先于忽略列表）
//! - `SubjectStatsBuilder` - 科目最低/最高/平均分
//! - `StudentMetricsCalculator` - 学生平均分、排名、评语、荣誉
//! - `TabularSource` - 取回 CSV（本地文件 / HTTP），唯一的异步边界
//!
//! ### ③ 流程层（Workflow）
//! - `ClassCtx` - 上下文封装（学年 + 学期 + 班级）
//! - `GradePipeline` - 原始表格 → 只读的 GradeTable
//! - `ClassFlow` - 流程编排（取数 → 计算 → 组装）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量班级处理器，管理并发
//! - `orchestrator/class_processor` - 单个班级处理器，写出 JSON
//! - `orchestrator/session` - 最新结果会话（last-writer-wins）
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ClassReport, GradeTable, RawTable, SchoolConfig, StudentMetrics};
pub use orchestrator::{App, ReportSession};
pub use workflow::{ClassCtx, ClassFlow, GradePipeline};
