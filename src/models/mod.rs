pub mod cell;
pub mod column;
pub mod grade;
pub mod loaders;
pub mod report;
pub mod school;
pub mod subject;
pub mod table;

pub use cell::CellValue;
pub use column::{ColumnRole, IndicatorKind};
pub use grade::{ColumnRecord, GradeTable, MentionCategory, ScoreDisplay, StudentMetrics, SubjectStat};
pub use loaders::{load_school_config, load_school_config_or_default};
pub use report::{ClassReport, ReportCard, SubjectLine};
pub use school::{ClassInfo, SchoolConfig};
pub use subject::SubjectLabel;
pub use table::RawTable;
