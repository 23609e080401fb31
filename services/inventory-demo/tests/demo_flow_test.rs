//! 演示流程测试

use std::collections::BTreeMap;
use std::sync::Arc;

use inv_adapter_simulated::{Inventory, SimulatedInventoryService, StoredItem};
use inv_bootstrap::{PumpTarget, ShutdownController};
use inv_domain_core::{ItemDefId, ItemFlags, ItemInstanceId, ItemRecord};
use inv_errors::AppError;
use inv_orchestration::PropertyReader;
use inv_ports::{GatewayEventKind, ResultStatus};
use inventory_demo::application::DemoRunner;
use inventory_demo::console::{ConsoleTranscript, ScriptedConsole};
use inventory_demo::driver::{DIVIDER, OUT_OF_RANGE};

fn service() -> Arc<SimulatedInventoryService> {
    let mut inventory = Inventory::new();
    inventory.add_item(
        StoredItem::new(ItemRecord::new(
            ItemInstanceId::new(1001),
            ItemDefId::new(10),
            1,
            ItemFlags::NO_TRADE,
        ))
        .with_property("name_color", "ff0000"),
    );
    inventory.add_item(StoredItem::new(ItemRecord::new(
        ItemInstanceId::new(1002),
        ItemDefId::new(20),
        4,
        ItemFlags::empty(),
    )));
    inventory.add_item(StoredItem::new(ItemRecord::new(
        ItemInstanceId::new(1003),
        ItemDefId::new(10),
        1,
        ItemFlags::empty(),
    )));

    let mut hat = BTreeMap::new();
    hat.insert("name".to_string(), "Red Hat".to_string());
    hat.insert("type".to_string(), "item".to_string());
    inventory.set_definition(ItemDefId::new(10), hat);

    Arc::new(SimulatedInventoryService::new(inventory).with_completion_delay(0))
}

fn start(
    gateway: Arc<SimulatedInventoryService>,
    inputs: &[&str],
) -> (DemoRunner, ConsoleTranscript, ShutdownController) {
    let (console, transcript) = ScriptedConsole::new(inputs.iter().copied());
    let shutdown = ShutdownController::new();
    let runner = DemoRunner::with_gateway(
        gateway,
        PropertyReader::default(),
        Box::new(console),
        shutdown.clone(),
    )
    .expect("demo starts");
    (runner, transcript, shutdown)
}

#[test]
fn test_non_numeric_input_exits_without_request() {
    let gateway = service();
    let (mut runner, transcript, shutdown) = start(gateway.clone(), &["abc"]);

    assert_eq!(gateway.live_handles(), 1);
    runner.pump().unwrap();

    assert!(transcript.contains("Items obtained."));
    assert!(transcript.contains("0\t1001\t10\t1\tNoTrade"));
    assert!(shutdown.is_shutdown());
    assert_eq!(runner.demo().owned_handle(), None);
    assert_eq!(gateway.live_handles(), 0);
    assert_eq!(runner.demo().records().map(|r| r.len()), Some(3));
}

#[test]
fn test_out_of_range_reprompts_without_gateway_call() {
    let gateway = service();
    let (mut runner, transcript, shutdown) = start(gateway.clone(), &["99", "-1", "abc"]);

    runner.pump().unwrap();

    assert_eq!(transcript.count(OUT_OF_RANGE), 2);
    assert_eq!(transcript.count("Index: "), 3);
    assert!(shutdown.is_shutdown());
    assert_eq!(gateway.live_handles(), 0);
    assert_eq!(runner.demo().owned_handle(), None);
}

#[test]
fn test_selection_prints_detail_and_returns_to_table() {
    let gateway = service();
    let (mut runner, transcript, shutdown) = start(gateway.clone(), &["0", "x"]);

    // 列出物品并选择第 0 项
    runner.pump().unwrap();
    assert!(runner.demo().owned_handle().is_some());
    assert_eq!(gateway.live_handles(), 1);
    assert!(!shutdown.is_shutdown());

    // 详情就绪
    runner.pump().unwrap();
    let lines = transcript.lines();
    assert!(lines.contains(&"Items by ID obtained.".to_string()));
    assert!(lines.contains(&"Instance ID: 1001".to_string()));
    assert!(lines.contains(&"Flags: NoTrade".to_string()));
    assert!(lines.contains(&"name_color: ff0000".to_string()));
    assert!(lines.contains(&DIVIDER.to_string()));
    assert!(lines.contains(&"Definition number: 10".to_string()));
    assert!(lines.contains(&"name: Red Hat".to_string()));
    assert!(lines.contains(&"type: item".to_string()));

    assert!(shutdown.is_shutdown());
    assert_eq!(gateway.live_handles(), 0);
    assert_eq!(runner.demo().owned_handle(), None);
}

#[test]
fn test_item_without_definition_has_no_definition_properties() {
    let gateway = service();
    let (mut runner, transcript, _shutdown) = start(gateway.clone(), &["1", "q"]);

    runner.pump().unwrap();
    runner.pump().unwrap();

    let lines = transcript.lines();
    let divider = lines.iter().position(|l| l == DIVIDER).unwrap();
    assert_eq!(lines[divider + 1], "Definition number: 20");
    assert_eq!(lines[divider + 2], "");
    assert_eq!(gateway.live_handles(), 0);
}

#[test]
fn test_end_of_input_exits() {
    let gateway = service();
    let (mut runner, _transcript, shutdown) = start(gateway.clone(), &[]);

    runner.pump().unwrap();
    assert!(shutdown.is_shutdown());
}

#[test]
fn test_refused_context_fails_start() {
    let gateway = Arc::new(SimulatedInventoryService::default().with_item_queries_allowed(false));
    let (console, _transcript) = ScriptedConsole::new(Vec::<String>::new());
    let result = DemoRunner::with_gateway(
        gateway,
        PropertyReader::default(),
        Box::new(console),
        ShutdownController::new(),
    );

    let err = result.err().expect("start must fail");
    assert!(matches!(err, AppError::GatewayRejected(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_failed_listing_surfaces_operation_failed() {
    let gateway = service();
    gateway.fail_next_result(ResultStatus::ServiceUnavailable);
    let (mut runner, transcript, shutdown) = start(gateway.clone(), &["0"]);

    let err = runner.pump().unwrap_err();
    assert!(matches!(err, AppError::OperationFailed { .. }));
    assert!(!transcript.contains("Items obtained."));
    assert!(!shutdown.is_shutdown());
    // 失败的句柄保留给诊断
    assert_eq!(gateway.live_handles(), 1);
}

#[test]
fn test_runner_records_received_notifications() {
    let gateway = service();
    let (mut runner, _transcript, _shutdown) = start(gateway.clone(), &["0", "x"]);

    runner.pump().unwrap();
    gateway.grant_item(StoredItem::new(ItemRecord::default()));
    runner.pump().unwrap();

    let events = runner.events();
    assert_eq!(events.count(GatewayEventKind::ResultReady), 2);
    assert_eq!(events.count(GatewayEventKind::InventoryChanged), 1);
    assert_eq!(events.get_events().len(), 3);
}
