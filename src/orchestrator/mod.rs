//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量班级处理器
//! - 管理应用生命周期（初始化、运行）
//! - 控制并发数量（Semaphore），单个班级失败不影响其他班级
//! - 输出全局统计信息
//!
//! ### `class_processor` - 单个班级处理器
//! - 选择数据源，运行 ClassFlow，写出 JSON
//!
//! ### `session` - 交互会话
//! - 保存最新的 GradeTable（last-writer-wins），支持取消和重新组装
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ClassCtx>)
//!     ↓
//! class_processor (处理单个班级)
//!     ↓
//! workflow::ClassFlow (取数 → 计算 → 组装)
//!     ↓
//! services / clients (能力层：分类 / 统计 / 指标 / 取数)
//! ```

pub mod batch_processor;
pub mod class_processor;
pub mod session;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use class_processor::{process_class, write_report};
pub use session::{LoadHandle, LoadedTable, ReportSession};
