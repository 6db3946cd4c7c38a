//! Response Generator: produces the specialist's reply
//!
//! Selects the per-agent role instruction, prepends the trailing history
//! window, and calls the provider's plain completion. Failures and empty
//! outputs become fixed localized strings; this component never errors past
//! its boundary.

use crate::agents::AgentKey;
use garmen_llm::{CompletionRequest, LlmProvider, Message};
use std::sync::Arc;
use tracing::{debug, warn};

/// Generation temperature: more variability than routing
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Returned when the provider yields no text
pub const EMPTY_RESPONSE_FALLBACK: &str = "Maaf, saya tidak dapat menghasilkan respon saat ini.";

/// Returned when the generation call fails
pub const GENERATION_ERROR_FALLBACK: &str = "Terjadi kesalahan saat memproses permintaan Anda.";

/// Role instruction for a given agent
const fn role_instruction(agent: AgentKey) -> &'static str {
    match agent {
        AgentKey::SalesAndRevenue => {
            "Anda adalah Agen Penjualan & Pendapatan. Tugas Anda: Membuat invoice, cek status \
             pesanan, dan rekap pendapatan. Bersikaplah profesional dan ringkas. Gunakan format \
             tabel jika menyajikan data angka."
        }
        AgentKey::PurchasingAndInventory => {
            "Anda adalah Agen Pembelian & Persediaan. Tugas Anda: Cek stok kain/benang, buat PO \
             (Purchase Order) ke supplier, dan manajemen gudang. Berikan estimasi level stok \
             secara simulasi."
        }
        AgentKey::FinancialReporting => {
            "Anda adalah Agen Pelaporan Keuangan. Tugas Anda: Menyajikan Laba Rugi, Neraca, dan \
             Arus Kas. Gunakan bahasa akuntansi formal (PSAK)."
        }
        AgentKey::ManufacturingCostAccounting => {
            "Anda adalah Agen Akuntansi Biaya Manufaktur. Fokus: Job Order Costing, HPP, Overhead \
             Pabrik, dan WIP. Jelaskan perhitungan biaya dengan detail."
        }
        AgentKey::Main => "Anda adalah asisten umum.",
    }
}

/// Response generator over an LLM provider
pub struct ResponseGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl ResponseGenerator {
    /// Create a generator using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        let model = provider.default_model().to_string();
        Self { provider, model }
    }

    /// Override the model used for generation calls
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Generate a reply for `agent` to `utterance`, given the trailing
    /// history window (role-prefixed lines, oldest first).
    ///
    /// Always returns text: provider failures and empty outputs become fixed
    /// localized fallback strings.
    pub async fn generate(&self, agent: AgentKey, utterance: &str, history: &[String]) -> String {
        let prompt = format!(
            "Context History:\n{}\n\nUser Request: {}",
            history.join("\n"),
            utterance
        );
        let request = CompletionRequest::new(self.model.clone())
            .with_message(Message::system(role_instruction(agent)))
            .with_message(Message::user(prompt))
            .with_temperature(GENERATION_TEMPERATURE);

        match self.provider.complete(request).await {
            Ok(response) if response.content.trim().is_empty() => {
                warn!(agent = %agent, "Empty generation output, using fallback text");
                EMPTY_RESPONSE_FALLBACK.to_string()
            }
            Ok(response) => {
                debug!(agent = %agent, model = %response.model, "Generated reply");
                response.content
            }
            Err(e) => {
                warn!(agent = %agent, error = %e, "Generation call failed");
                GENERATION_ERROR_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garmen_llm::{Error, MockProvider};

    fn generator_with(mock: MockProvider) -> ResponseGenerator {
        ResponseGenerator::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_generate_returns_provider_text() {
        let mock = MockProvider::new();
        mock.push_text("Invoice INV-101 sudah dibuat.");

        let reply = generator_with(mock)
            .generate(AgentKey::SalesAndRevenue, "Buatkan invoice", &[])
            .await;
        assert_eq!(reply, "Invoice INV-101 sudah dibuat.");
    }

    #[tokio::test]
    async fn test_generate_empty_output_uses_fallback() {
        let mock = MockProvider::new();
        mock.push_text("   ");

        let reply = generator_with(mock)
            .generate(AgentKey::FinancialReporting, "Laporan laba rugi", &[])
            .await;
        assert_eq!(reply, EMPTY_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_generate_failure_uses_error_fallback() {
        let mock = MockProvider::new();
        mock.push_text_error(Error::Api("boom".to_string()));

        let reply = generator_with(mock)
            .generate(AgentKey::ManufacturingCostAccounting, "Berapa HPP?", &[])
            .await;
        assert_eq!(reply, GENERATION_ERROR_FALLBACK);
    }

    #[test]
    fn test_every_agent_has_role_instruction() {
        for key in AgentKey::ALL {
            assert!(!role_instruction(key).is_empty());
        }
    }
}
