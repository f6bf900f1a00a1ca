//! 科目统计服务 - 业务能力层
//!
//! 对每个科目列计算班级最低分、最高分、平均分和满分。
//! 纯函数：相同输入总是得到相同结果。

use crate::models::cell::{cell_at, CellValue};
use crate::models::column::ColumnRole;
use crate::models::grade::{ColumnRecord, SubjectStat};
use crate::services::column_classifier::ColumnClassifier;
use std::collections::BTreeMap;
use tracing::debug;

/// 科目统计构建器
pub struct SubjectStatsBuilder<'a> {
    classifier: &'a ColumnClassifier,
    default_max_score: f64,
}

impl<'a> SubjectStatsBuilder<'a> {
    pub fn new(classifier: &'a ColumnClassifier, default_max_score: f64) -> Self {
        Self {
            classifier,
            default_max_score,
        }
    }

    /// 构建所有列的分类记录（科目列附带统计）
    ///
    /// # 参数
    /// - `headers`: 表头行
    /// - `bareme`: 满分行
    /// - `students`: 已过滤的学生行
    pub fn build_columns(
        &self,
        headers: &[String],
        bareme: &[String],
        students: &[Vec<String>],
    ) -> Vec<ColumnRecord> {
        headers
            .iter()
            .zip(self.classifier.classify_all(headers))
            .enumerate()
            .map(|(column_index, (header, role))| {
                let stat = match &role {
                    ColumnRole::Subject(key) => {
                        let stat = self.column_stat(column_index, bareme, students);
                        if stat.is_none() {
                            debug!("科目 {} (第 {} 列) 没有有效分数，不计入统计", key, column_index);
                        }
                        stat
                    }
                    _ => None,
                };
                ColumnRecord {
                    column_index,
                    header: header.clone(),
                    role,
                    stat,
                }
            })
            .collect()
    }

    /// 原始列索引 -> 统计
    pub fn build(
        &self,
        headers: &[String],
        bareme: &[String],
        students: &[Vec<String>],
    ) -> BTreeMap<usize, SubjectStat> {
        stats_map(&self.build_columns(headers, bareme, students))
    }

    /// 单列统计，没有任何有效分数时返回 `None`
    fn column_stat(
        &self,
        column_index: usize,
        bareme: &[String],
        students: &[Vec<String>],
    ) -> Option<SubjectStat> {
        let entries: Vec<f64> = students
            .iter()
            .filter_map(|row| CellValue::parse(cell_at(row, column_index)).as_number())
            .collect();

        if entries.is_empty() {
            return None;
        }

        let min = entries.iter().copied().fold(f64::INFINITY, f64::min);
        let max = entries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = entries.iter().sum::<f64>() / entries.len() as f64;

        Some(SubjectStat {
            min,
            max,
            avg,
            max_score: self.max_score(column_index, bareme),
        })
    }

    /// 满分行中的满分，缺失或无法解析时使用默认值
    ///
    /// `0` 是合法满分（附加分列），照原值保留。
    pub fn max_score(&self, column_index: usize, bareme: &[String]) -> f64 {
        CellValue::parse(cell_at(bareme, column_index))
            .as_number()
            .unwrap_or(self.default_max_score)
    }
}

/// 从分类记录中收集统计表
pub fn stats_map(columns: &[ColumnRecord]) -> BTreeMap<usize, SubjectStat> {
    columns
        .iter()
        .filter_map(|column| column.stat.map(|stat| (column.column_index, stat)))
        .collect()
}
