//! 列分类服务 - 业务能力层
//!
//! 只负责"这一列是什么"，规则按顺序逐条匹配，第一条命中的规则决定角色；
//! 没有规则命中的非空表头就是科目列。

use crate::models::column::{fold_accents, normalize_header, ColumnRole, IndicatorKind};
use crate::models::school::SchoolConfig;
use std::collections::BTreeSet;

/// 平均分列的同义表头（精确匹配）
pub const AVERAGE_SYNONYMS: [&str; 7] = [
    "MOYENNE",
    "MOYENNE GÉNÉRALE",
    "MOYENNE GENERALE",
    "MOY",
    "MOY G.",
    "MOY. G.",
    "MOY G",
];

/// 表头匹配条件（作用于归一化后的表头）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatcher {
    /// 空表头
    Blank,
    /// 等于其中之一
    OneOf(Vec<String>),
    /// 去重音后包含子串
    ContainsFolded(String),
    /// 在配置的忽略列表中
    IgnoredColumn,
}

/// 规则命中后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Ignore,
    Indicator(IndicatorKind),
}

/// 一条分类规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    pub matcher: HeaderMatcher,
    pub outcome: RuleOutcome,
}

impl ColumnRule {
    fn new(matcher: HeaderMatcher, outcome: RuleOutcome) -> Self {
        Self { matcher, outcome }
    }
}

/// 列分类器
///
/// 指标列优先于忽略列表：`MOYENNE` 既不参与科目统计，
/// 又作为平均分指标被读取。
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    rules: Vec<ColumnRule>,
    ignored_columns: BTreeSet<String>,
}

impl ColumnClassifier {
    /// 使用学校配置创建分类器
    pub fn new(config: &SchoolConfig) -> Self {
        let rules = vec![
            ColumnRule::new(HeaderMatcher::Blank, RuleOutcome::Ignore),
            ColumnRule::new(
                HeaderMatcher::ContainsFolded("APPRECIATION".to_string()),
                RuleOutcome::Indicator(IndicatorKind::Appreciation),
            ),
            ColumnRule::new(
                HeaderMatcher::OneOf(AVERAGE_SYNONYMS.iter().map(|s| s.to_string()).collect()),
                RuleOutcome::Indicator(IndicatorKind::Average),
            ),
            ColumnRule::new(
                HeaderMatcher::OneOf(vec!["RANG".to_string()]),
                RuleOutcome::Indicator(IndicatorKind::Rank),
            ),
            ColumnRule::new(
                HeaderMatcher::OneOf(vec!["MENTION".to_string()]),
                RuleOutcome::Indicator(IndicatorKind::Mention),
            ),
            ColumnRule::new(HeaderMatcher::IgnoredColumn, RuleOutcome::Ignore),
        ];

        Self {
            rules,
            ignored_columns: config
                .ignored_columns
                .iter()
                .map(|name| normalize_header(name))
                .collect(),
        }
    }

    /// 分类规则（按优先级排列）
    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    /// 对单个表头分类
    pub fn classify(&self, header: &str) -> ColumnRole {
        let normalized = normalize_header(header);

        for rule in &self.rules {
            if self.matches(&rule.matcher, &normalized) {
                return match rule.outcome {
                    RuleOutcome::Ignore => ColumnRole::Ignored,
                    RuleOutcome::Indicator(kind) => ColumnRole::Indicator(kind),
                };
            }
        }

        ColumnRole::Subject(normalized)
    }

    /// 对整行表头分类，保持列顺序
    pub fn classify_all(&self, headers: &[String]) -> Vec<ColumnRole> {
        headers.iter().map(|header| self.classify(header)).collect()
    }

    fn matches(&self, matcher: &HeaderMatcher, normalized: &str) -> bool {
        match matcher {
            HeaderMatcher::Blank => normalized.is_empty(),
            HeaderMatcher::OneOf(candidates) => candidates.iter().any(|c| c == normalized),
            HeaderMatcher::ContainsFolded(needle) => {
                fold_accents(normalized).contains(&fold_accents(needle))
            }
            HeaderMatcher::IgnoredColumn => self.ignored_columns.contains(normalized),
        }
    }
}
