use serde::{Deserialize, Serialize};

/// 原始表格：第 0 行表头，第 1 行满分（barème），之后每行一个学生
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// 便于测试和内联数据的构造方式
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bareme(&self) -> &[String] {
        self.rows.get(1).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 第 2 行起的所有行（未过滤）
    pub fn student_rows(&self) -> &[Vec<String>] {
        self.rows.get(2..).unwrap_or(&[])
    }
}
