//! 交互驱动
//!
//! 记录表格渲染与用户选择解析

use inv_domain_core::ItemRecord;

pub const TABLE_HEADER: &str = "Index\tInstance ID\tDefinition number\tQuantity\tFlags";
pub const SELECTION_HINT: &str = "Enter index of item to get details of. Enter not a number to exit.";
pub const SELECTION_PROMPT: &str = "Index: ";
pub const OUT_OF_RANGE: &str = "Index out of range, try again.";
pub const DIVIDER: &str =
    "--------------------------------------------------------------------------------";

/// 用户的一次选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 非数字输入（或输入结束），结束交互循环
    Exit,
    /// 数字但越界，重新提示
    OutOfRange(i32),
    /// 有效索引
    Index(usize),
}

/// 解析一行输入
///
/// 允许首尾空白和符号；超出 `i32` 范围视为非数字
pub fn parse_selection(input: Option<&str>, record_count: usize) -> Selection {
    let Some(Ok(value)) = input.map(|line| line.trim().parse::<i32>()) else {
        return Selection::Exit;
    };

    match usize::try_from(value) {
        Ok(index) if index < record_count => Selection::Index(index),
        _ => Selection::OutOfRange(value),
    }
}

/// 渲染带索引的记录表格
pub fn render_table(records: &[ItemRecord]) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(TABLE_HEADER.to_string());
    for (index, item) in records.iter().enumerate() {
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}",
            index, item.instance_id, item.definition, item.quantity, item.flags
        ));
    }
    lines
}

/// 渲染单条记录的基本字段
pub fn render_detail(item: &ItemRecord) -> Vec<String> {
    vec![
        format!("Instance ID: {}", item.instance_id),
        format!("Definition number: {}", item.definition),
        format!("Quantity: {}", item.quantity),
        format!("Flags: {}", item.flags),
    ]
}
