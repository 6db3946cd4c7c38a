//! Classifier/Router: picks the target specialist for a user message
//!
//! Delegates to a schema-constrained LLM call. The output schema lists only
//! the four specialists - Main is the fallback identity, never a routing
//! target. Failures of any kind collapse to a Main fallback decision; this
//! component never errors past its boundary.

use crate::agents::AgentKey;
use garmen_llm::{CompletionRequest, LlmProvider, Message, StructuredRequest};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routing temperature: low variability for consistent routing
const ROUTING_TEMPERATURE: f32 = 0.1;

/// Reason recorded when automatic routing fails
pub const ROUTING_FALLBACK_REASON: &str = "Gagal melakukan routing otomatis.";

/// System instruction for the Main router agent
const ROUTER_SYSTEM_INSTRUCTION: &str = "\
Sebagai Agen Utama dalam Sistem Informasi Akuntansi (SIA) Manufaktur Garmen, peran Anda adalah \
menjadi router cerdas (Manage Accounting Operations). Anda harus secara konsisten dan akurat \
mengarahkan permintaan pengguna ke salah satu dari empat Sub-Agen spesialis di bawah.

DEFINISI SUB-AGEN SPESIALIS:

1.  SALES_AND_REVENUE: Memproses pesanan penjualan, menghasilkan faktur, dan melacak pendapatan real-time.
2.  PURCHASING_AND_INVENTORY: Mengelola pengadaan bahan baku, memantau tingkat persediaan, dan menyediakan informasi pemasok.
3.  FINANCIAL_REPORTING: Menghasilkan laporan keuangan formal (Laba Rugi, Neraca, Arus Kas) dan laporan analitis.
4.  MANUFACTURING_COST_ACCOUNTING: Menghitung Harga Pokok Produksi (HPP) garmen per job order, melacak biaya (bahan baku, tenaga kerja, overhead), dan menilai persediaan WIP/Barang Jadi.

LOGIKA PERUTEAN (Wajib Dipatuhi):

*   Jika permintaan terkait FAKTUR, PESANAN PENJUALAN, atau PELACAKAN PENDAPATAN, teruskan ke: SALES_AND_REVENUE.
*   Jika permintaan terkait PEMBELIAN BAHAN BAKU, TINGKAT STOK/INVENTARIS, atau INFORMASI PEMASOK, teruskan ke: PURCHASING_AND_INVENTORY.
*   Jika permintaan terkait LAPORAN LABA RUGI, NERACA, ARUS KAS, atau KEPATUHAN AKUNTANSI, teruskan ke: FINANCIAL_REPORTING.
*   Jika permintaan terkait PERHITUNGAN HPP, BIAYA PRODUKSI, PENGGUNAAN BAHAN BAKU, atau PENILAIAN WIP, teruskan ke: MANUFACTURING_COST_ACCOUNTING.
*   JANGAN pernah meneruskan permintaan ke lebih dari satu Sub-Agen.

Hasilkan output JSON yang berisi kunci agen target dan alasan singkat.";

/// A routing decision: which specialist handles the message, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Target agent for this message
    pub target: AgentKey,
    /// Short human-readable justification
    pub reason: String,
    /// True when automatic routing failed and Main was used as the default
    pub fallback: bool,
}

impl RoutingDecision {
    /// The default-to-Main decision used when classification fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            target: AgentKey::Main,
            reason: ROUTING_FALLBACK_REASON.to_string(),
            fallback: true,
        }
    }
}

/// Expected shape of the classifier's structured output
#[derive(Debug, Deserialize)]
struct RouterWire {
    #[serde(rename = "targetAgent")]
    target_agent: AgentKey,
    reason: String,
}

/// Classifier over an LLM provider
pub struct Classifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl Classifier {
    /// Create a classifier using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        let model = provider.default_model().to_string();
        Self { provider, model }
    }

    /// Override the model used for routing calls
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Output schema: exactly one of the four specialist keys plus a reason
    fn routing_schema() -> serde_json::Value {
        let specialists: Vec<&str> = AgentKey::SPECIALISTS.iter().map(AgentKey::as_str).collect();
        serde_json::json!({
            "type": "object",
            "properties": {
                "targetAgent": {
                    "type": "string",
                    "enum": specialists,
                    "description": "The enum key of the target sub-agent.",
                },
                "reason": {
                    "type": "string",
                    "description": "A brief explanation of why this agent was selected.",
                },
            },
            "required": ["targetAgent", "reason"],
        })
    }

    /// Classify a user utterance into a routing decision.
    ///
    /// Always returns a value: any provider or parse failure becomes the
    /// Main fallback decision.
    pub async fn classify(&self, utterance: &str) -> RoutingDecision {
        let request = CompletionRequest::new(self.model.clone())
            .with_message(Message::system(ROUTER_SYSTEM_INSTRUCTION))
            .with_message(Message::user(utterance))
            .with_temperature(ROUTING_TEMPERATURE);
        let structured = StructuredRequest::new(request, Self::routing_schema());

        let value = match self.provider.complete_structured(structured).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Routing call failed, defaulting to Main");
                return RoutingDecision::fallback();
            }
        };

        match serde_json::from_value::<RouterWire>(value) {
            // The schema lists only specialists; a Main answer means the
            // model ignored the constraint, which counts as a failure.
            Ok(wire) if wire.target_agent == AgentKey::Main => {
                warn!("Classifier returned the Main key, defaulting to Main fallback");
                RoutingDecision::fallback()
            }
            Ok(wire) => {
                debug!(agent = %wire.target_agent, reason = %wire.reason, "Routed");
                RoutingDecision {
                    target: wire.target_agent,
                    reason: wire.reason,
                    fallback: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Unparseable routing output, defaulting to Main");
                RoutingDecision::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garmen_llm::{Error, MockProvider};

    fn classifier_with(mock: MockProvider) -> Classifier {
        Classifier::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_classify_routes_to_specialist() {
        let mock = MockProvider::new();
        mock.push_structured(serde_json::json!({
            "targetAgent": "SALES_AND_REVENUE",
            "reason": "permintaan terkait faktur",
        }));

        let decision = classifier_with(mock).classify("Buatkan invoice penjualan").await;
        assert_eq!(decision.target, AgentKey::SalesAndRevenue);
        assert_eq!(decision.reason, "permintaan terkait faktur");
        assert!(!decision.fallback);
    }

    #[tokio::test]
    async fn test_classify_failure_defaults_to_main() {
        let mock = MockProvider::new();
        mock.push_structured_error(Error::Network("connection refused".to_string()));

        let decision = classifier_with(mock).classify("Cek stok kain").await;
        assert_eq!(decision.target, AgentKey::Main);
        assert_eq!(decision.reason, ROUTING_FALLBACK_REASON);
        assert!(decision.fallback);
    }

    #[tokio::test]
    async fn test_classify_malformed_output_defaults_to_main() {
        let mock = MockProvider::new();
        mock.push_structured(serde_json::json!({ "agent": "SALES_AND_REVENUE" }));

        let decision = classifier_with(mock).classify("Berapa HPP batch A?").await;
        assert!(decision.fallback);
        assert_eq!(decision.target, AgentKey::Main);
    }

    #[tokio::test]
    async fn test_classify_unknown_enum_defaults_to_main() {
        let mock = MockProvider::new();
        mock.push_structured(serde_json::json!({
            "targetAgent": "HUMAN_RESOURCES",
            "reason": "x",
        }));

        let decision = classifier_with(mock).classify("Siapa HRD kita?").await;
        assert!(decision.fallback);
    }

    #[test]
    fn test_schema_lists_only_specialists() {
        let schema = Classifier::routing_schema();
        let values = schema["properties"]["targetAgent"]["enum"].as_array().unwrap();
        assert_eq!(values.len(), 4);
        assert!(!values.iter().any(|v| v == "MAIN_ROUTER"));
    }
}
