//! Orchestrator tests

use super::*;
use crate::generator::{EMPTY_RESPONSE_FALLBACK, GENERATION_ERROR_FALLBACK};
use crate::classifier::ROUTING_FALLBACK_REASON;
use crate::session::ChatRole;
use garmen_llm::{Error, MockProvider};

fn orchestrator_with(mock: MockProvider) -> Orchestrator {
    Orchestrator::new(Arc::new(mock))
}

fn sales_decision() -> serde_json::Value {
    serde_json::json!({
        "targetAgent": "SALES_AND_REVENUE",
        "reason": "contains faktur/pesanan keywords",
    })
}

#[tokio::test]
async fn test_sales_routing_scenario() {
    let mock = MockProvider::new();
    mock.push_structured(sales_decision());
    mock.push_text("Invoice INV-101 sudah dibuat.");
    let mut orchestrator = orchestrator_with(mock);

    let outcome = orchestrator.submit("Buatkan invoice penjualan").await;
    assert_eq!(outcome, SubmitOutcome::Completed);

    let session = orchestrator.session();
    assert_eq!(session.active_agent(), AgentKey::SalesAndRevenue);
    assert!(!session.is_busy());

    // welcome + user + routing notice + agent reply
    let messages = session.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1].role, ChatRole::User);
    assert_eq!(messages[1].content, "Buatkan invoice penjualan");

    assert_eq!(messages[2].role, ChatRole::System);
    assert!(messages[2].content.contains("Sales & Revenue"));
    assert!(messages[2].content.contains("contains faktur/pesanan keywords"));

    assert_eq!(messages[3].role, ChatRole::Agent);
    assert_eq!(messages[3].agent, Some(AgentKey::SalesAndRevenue));
    assert_eq!(messages[3].content, "Invoice INV-101 sudah dibuat.");
}

#[tokio::test]
async fn test_no_notice_when_target_unchanged() {
    let mock = MockProvider::new();
    mock.push_structured(sales_decision());
    mock.push_structured(sales_decision());
    mock.push_text("Invoice dibuat.");
    mock.push_text("Status pesanan: lunas.");
    let mut orchestrator = orchestrator_with(mock);

    orchestrator.submit("Buatkan invoice").await;
    let before = orchestrator.session().messages().len();

    orchestrator.submit("Cek status pesanan itu").await;
    let messages = orchestrator.session().messages();

    // Second turn appends only user + reply, no second routing notice
    assert_eq!(messages.len(), before + 2);
    assert_eq!(messages[messages.len() - 1].role, ChatRole::Agent);
    assert_eq!(messages[messages.len() - 2].role, ChatRole::User);
}

#[tokio::test]
async fn test_notice_on_specialist_switch() {
    let mock = MockProvider::new();
    mock.push_structured(sales_decision());
    mock.push_structured(serde_json::json!({
        "targetAgent": "PURCHASING_AND_INVENTORY",
        "reason": "permintaan terkait stok",
    }));
    mock.push_text("Invoice dibuat.");
    mock.push_text("Stok kain katun: 1200 roll.");
    let mut orchestrator = orchestrator_with(mock);

    orchestrator.submit("Buatkan invoice").await;
    orchestrator.submit("Cek stok kain").await;

    let session = orchestrator.session();
    assert_eq!(session.active_agent(), AgentKey::PurchasingAndInventory);

    let notices: Vec<_> = session
        .messages()
        .iter()
        .filter(|m| m.role == ChatRole::System && m.content.contains("Mengalihkan"))
        .collect();
    assert_eq!(notices.len(), 2);
    assert!(notices[1].content.contains("Purchasing & Inventory"));
}

#[tokio::test]
async fn test_empty_submission_is_a_no_op() {
    let mut orchestrator = orchestrator_with(MockProvider::new());
    let before = orchestrator.session().messages().len();

    assert_eq!(orchestrator.submit("").await, SubmitOutcome::RejectedEmpty);
    assert_eq!(orchestrator.submit("   \t\n").await, SubmitOutcome::RejectedEmpty);

    assert_eq!(orchestrator.session().messages().len(), before);
    assert_eq!(orchestrator.session().active_agent(), AgentKey::Main);
}

#[tokio::test]
async fn test_busy_submission_is_dropped() {
    let mut orchestrator = orchestrator_with(MockProvider::new());
    orchestrator.session.set_busy(true);
    let before = orchestrator.session().messages().len();

    assert_eq!(
        orchestrator.submit("Cek stok kain").await,
        SubmitOutcome::RejectedBusy
    );
    assert_eq!(orchestrator.session().messages().len(), before);
    // The in-flight turn owns the flag; rejection must not clear it
    assert!(orchestrator.session().is_busy());
}

#[tokio::test]
async fn test_classifier_failure_defaults_to_main() {
    let mock = MockProvider::new();
    mock.push_structured_error(Error::Network("connection refused".to_string()));
    mock.push_text("Baik, ada yang bisa saya bantu?");
    let mut orchestrator = orchestrator_with(mock);

    let outcome = orchestrator.submit("Cek stok kain").await;
    assert_eq!(outcome, SubmitOutcome::Completed);

    let session = orchestrator.session();
    assert_eq!(session.active_agent(), AgentKey::Main);
    assert!(!session.is_busy());

    let fallback_notices: Vec<_> = session
        .messages()
        .iter()
        .filter(|m| m.role == ChatRole::System && m.content == ROUTING_FALLBACK_REASON)
        .collect();
    assert_eq!(fallback_notices.len(), 1);

    // The turn still produces a Main-agent reply
    let last = session.messages().last().unwrap();
    assert_eq!(last.role, ChatRole::Agent);
    assert_eq!(last.agent, Some(AgentKey::Main));
}

#[tokio::test]
async fn test_generation_failure_keeps_agent_attribution() {
    let mock = MockProvider::new();
    mock.push_structured(serde_json::json!({
        "targetAgent": "MANUFACTURING_COST_ACCOUNTING",
        "reason": "perhitungan HPP",
    }));
    mock.push_text_error(Error::Api("boom".to_string()));
    let mut orchestrator = orchestrator_with(mock);

    orchestrator.submit("Berapa HPP batch A?").await;

    let last = orchestrator.session().messages().last().unwrap();
    assert_eq!(last.role, ChatRole::Agent);
    assert_eq!(last.agent, Some(AgentKey::ManufacturingCostAccounting));
    assert_eq!(last.content, GENERATION_ERROR_FALLBACK);
    assert!(!orchestrator.session().is_busy());
}

#[tokio::test]
async fn test_empty_generation_output_keeps_agent_attribution() {
    let mock = MockProvider::new();
    mock.push_structured(sales_decision());
    mock.push_text("");
    let mut orchestrator = orchestrator_with(mock);

    orchestrator.submit("Buatkan invoice").await;

    let last = orchestrator.session().messages().last().unwrap();
    assert_eq!(last.agent, Some(AgentKey::SalesAndRevenue));
    assert_eq!(last.content, EMPTY_RESPONSE_FALLBACK);
}

#[tokio::test]
async fn test_history_window_excludes_current_user_message() {
    let mock = Arc::new(MockProvider::new());
    mock.push_structured(sales_decision());
    mock.push_text("Invoice dibuat.");
    let mut orchestrator = Orchestrator::new(mock.clone());

    orchestrator.submit("Buatkan invoice penjualan").await;

    let captured = mock.captured_completions();
    assert_eq!(captured.len(), 1);
    let prompt = &captured[0].messages.last().unwrap().content;
    assert!(prompt.starts_with("Context History:\n"));

    // The window holds only the welcome message; the current user text
    // appears in the request line, not the history block
    let history_block = prompt.split("\n\nUser Request:").next().unwrap();
    assert!(history_block.contains("system: Selamat datang"));
    assert!(!history_block.contains("user: Buatkan invoice penjualan"));
    assert!(prompt.ends_with("User Request: Buatkan invoice penjualan"));
}

#[tokio::test]
async fn test_history_window_never_exceeds_five_lines() {
    let mock = Arc::new(MockProvider::new());
    for _ in 0..4 {
        mock.push_structured(sales_decision());
        mock.push_text("ok");
    }
    let mut orchestrator = Orchestrator::new(mock.clone());
    for i in 0..4 {
        orchestrator.submit(&format!("pesan {i}")).await;
    }

    let captured = mock.captured_completions();
    let prompt = &captured.last().unwrap().messages.last().unwrap().content;
    let history_block = prompt.split("\n\nUser Request:").next().unwrap();
    let history_lines = history_block.lines().skip(1).count();
    assert_eq!(history_lines, 5);
}
