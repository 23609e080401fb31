//! 库存演示流程
//!
//! 全部物品 -> 交互选择 -> 按 ID 查询详情 -> 回到交互选择

use std::sync::Arc;

use inv_bootstrap::ShutdownController;
use inv_domain_core::ItemRecord;
use inv_errors::{AppError, AppResult};
use inv_orchestration::{OperationSequencer, PropertyReader, SequencerHost};
use inv_ports::{InventoryGateway, ResultHandle};
use tracing::{debug, info};

use crate::console::Console;
use crate::driver::{
    DIVIDER, OUT_OF_RANGE, SELECTION_HINT, SELECTION_PROMPT, Selection, parse_selection,
    render_detail, render_table,
};

/// 演示宿主：持有请求序列器、已取得的记录和控制台
pub struct InventoryDemo {
    sequencer: OperationSequencer<InventoryDemo>,
    console: Box<dyn Console>,
    records: Option<Vec<ItemRecord>>,
    shutdown: ShutdownController,
}

impl SequencerHost for InventoryDemo {
    fn sequencer(&mut self) -> &mut OperationSequencer<Self> {
        &mut self.sequencer
    }
}

impl InventoryDemo {
    pub fn new(
        gateway: Arc<dyn InventoryGateway>,
        properties: PropertyReader,
        console: Box<dyn Console>,
        shutdown: ShutdownController,
    ) -> Self {
        Self {
            sequencer: OperationSequencer::new(gateway).with_property_reader(properties),
            console,
            records: None,
            shutdown,
        }
    }

    /// 当前已取得的记录
    pub fn records(&self) -> Option<&[ItemRecord]> {
        self.records.as_deref()
    }

    pub fn owned_handle(&self) -> Option<ResultHandle> {
        self.sequencer.owned_handle()
    }

    fn say(&mut self, line: &str) -> AppResult<()> {
        self.console.write_line(line)?;
        Ok(())
    }

    /// 第一步：请求全部物品，完成后列出
    pub fn run_demo(&mut self) -> AppResult<ResultHandle> {
        self.sequencer
            .begin_all_items_query(Box::new(Self::list_items))
    }

    fn list_items(&mut self) -> AppResult<()> {
        let records = self.sequencer.complete_and_release()?;
        self.say("Items obtained.")?;
        info!(count = records.len(), "Inventory listed");

        self.records = Some(records);
        self.interactive_get_details()
    }

    /// 交互循环：展示记录并等待选择
    ///
    /// 非数字输入请求退出；越界数字重新提示；有效索引发起按 ID 查询后返回
    pub fn interactive_get_details(&mut self) -> AppResult<()> {
        if !self.sequencer.is_idle() {
            return Err(AppError::precondition(
                "There is already an ongoing operation.",
            ));
        }
        let Some(records) = self.records.clone() else {
            return Err(AppError::precondition("Items have not been fetched."));
        };

        loop {
            self.say("")?;
            for line in render_table(&records) {
                self.say(&line)?;
            }
            self.say(SELECTION_HINT)?;

            let input = self.console.read_line(SELECTION_PROMPT)?;
            match parse_selection(input.as_deref(), records.len()) {
                Selection::Exit => {
                    debug!("Non-numeric selection, leaving interactive loop");
                    self.shutdown.shutdown();
                    return Ok(());
                }
                Selection::OutOfRange(value) => {
                    debug!(value, "Selection out of range");
                    self.say(OUT_OF_RANGE)?;
                }
                Selection::Index(index) => {
                    let ids = [records[index].instance_id];
                    self.sequencer
                        .begin_query_by_ids(&ids, Box::new(Self::print_item_detail))?;
                    return Ok(());
                }
            }
        }
    }

    fn print_item_detail(&mut self) -> AppResult<()> {
        let details = self.sequencer.fetch_records()?;
        self.say("Items by ID obtained.")?;

        let [item] = details.as_slice() else {
            return Err(AppError::inconsistency(format!(
                "expected exactly one item, got {}",
                details.len()
            )));
        };
        let item = *item;

        self.say("")?;
        for line in render_detail(&item) {
            self.say(&line)?;
        }

        for entry in self.sequencer.record_properties(0)? {
            self.say(&entry.to_string())?;
        }

        self.say(DIVIDER)?;

        self.say(&format!("Definition number: {}", item.definition))?;
        for entry in self.sequencer.definition_properties(item.definition) {
            self.say(&entry.to_string())?;
        }

        self.sequencer.release()?;
        self.interactive_get_details()
    }
}
