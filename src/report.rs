//! User-facing wording of prediction results, in English and Portuguese.

use serde::{Deserialize, Serialize};

use crate::models::{CancellationPrediction, CreditDecision, LoanApplicant, ReservationFeatures};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }
}

/// `0.8` -> `"80.00%"`
pub fn format_percent(p: f32) -> String {
    format!("{:.2}%", p * 100.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub probability: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancellationReport {
    pub high_risk: bool,
    pub headline: &'static str,
    pub probability_label: &'static str,
    pub probability: String,
    pub chart: [ChartBar; 2],
    pub recommendations_title: &'static str,
    pub recommendations: Vec<&'static str>,
    pub details: Vec<(&'static str, String)>,
    pub influence_factors: Vec<&'static str>,
}

impl CancellationReport {
    pub fn new(
        prediction: &CancellationPrediction,
        features: &ReservationFeatures,
        locale: Locale,
    ) -> Self {
        let high_risk = prediction.will_cancel();
        let (keep, cancel) = match locale {
            Locale::En => ("Keep", "Cancel"),
            Locale::Pt => ("Não Cancelar", "Cancelar"),
        };

        let (headline, probability_label, recommendations_title, recommendations) =
            match (locale, high_risk) {
                (Locale::En, true) => (
                    "High probability of cancellation",
                    "Cancellation probability",
                    "Recommended actions to reduce the cancellation risk:",
                    vec![
                        "Contact the guest to confirm the reservation",
                        "Offer flexibility on dates or conditions",
                        "Check for special needs that have not been met",
                        "Consider offers or upgrades to win the guest's loyalty",
                    ],
                ),
                (Locale::En, false) => (
                    "Low probability of cancellation",
                    "Probability of keeping the reservation",
                    "Low cancellation risk reservation:",
                    vec![
                        "The guest will probably keep the reservation",
                        "Focus on providing an excellent experience",
                        "Prepare properly for the guest's arrival",
                    ],
                ),
                (Locale::Pt, true) => (
                    "Alta probabilidade de cancelamento",
                    "Probabilidade de Cancelamento",
                    "Ações Recomendadas para Reduzir o Risco de Cancelamento:",
                    vec![
                        "Entrar em contato com o cliente para confirmar a reserva",
                        "Oferecer flexibilidade nas datas ou condições",
                        "Verificar se há necessidades especiais não atendidas",
                        "Considerar ofertas ou upgrades para fidelizar o cliente",
                    ],
                ),
                (Locale::Pt, false) => (
                    "Baixa probabilidade de cancelamento",
                    "Probabilidade de Manutenção",
                    "Reserva com Baixo Risco de Cancelamento:",
                    vec![
                        "Cliente provavelmente manterá a reserva",
                        "Foque em proporcionar uma excelente experiência",
                        "Prepare-se adequadamente para a chegada do hóspede",
                    ],
                ),
            };

        Self {
            high_risk,
            headline,
            probability_label,
            probability: format_percent(prediction.headline_probability()),
            chart: [
                ChartBar {
                    label: keep,
                    probability: prediction.probabilities[0],
                },
                ChartBar {
                    label: cancel,
                    probability: prediction.probabilities[1],
                },
            ],
            recommendations_title,
            recommendations,
            details: reservation_details(features, locale),
            influence_factors: influence_factors(locale),
        }
    }
}

fn reservation_details(features: &ReservationFeatures, locale: Locale) -> Vec<(&'static str, String)> {
    let labels = match locale {
        Locale::En => [
            "Lead time",
            "Arrival month",
            "Arrival date",
            "Market segment",
            "Average price per room",
            "Special requests",
        ],
        Locale::Pt => [
            "Lead Time",
            "Mês de Chegada",
            "Data de Chegada",
            "Segmento de Mercado",
            "Preço Médio por Quarto",
            "Pedidos Especiais",
        ],
    };
    let days = match locale {
        Locale::En => "days",
        Locale::Pt => "dias",
    };

    vec![
        (labels[0], format!("{} {}", features.lead_time, days)),
        (labels[1], features.arrival_month.to_string()),
        (labels[2], features.arrival_date.to_string()),
        (labels[3], features.market_segment_type.to_string()),
        (labels[4], format!("R$ {:.2}", features.avg_price_per_room)),
        (labels[5], features.no_of_special_requests.to_string()),
    ]
}

fn influence_factors(locale: Locale) -> Vec<&'static str> {
    match locale {
        Locale::En => vec![
            "Lead time: reservations made far in advance tend to carry a higher cancellation risk",
            "Price: higher prices can weigh on the decision to cancel",
            "Special requests: guests with special requests tend to cancel less",
            "Market segment: each segment behaves differently",
        ],
        Locale::Pt => vec![
            "Lead Time: Reservas com muito tempo de antecedência tendem a ter maior risco de cancelamento",
            "Preço: Preços mais altos podem influenciar na decisão de cancelamento",
            "Pedidos Especiais: Clientes com pedidos especiais tendem a cancelar menos",
            "Segmento de Mercado: Diferentes segmentos têm comportamentos distintos",
        ],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditReport {
    pub grant: bool,
    pub message: &'static str,
}

impl CreditReport {
    pub fn new(decision: &CreditDecision, locale: Locale) -> Self {
        let grant = decision.grant();
        let message = match (locale, grant) {
            (Locale::En, true) => "Our model recommends granting credit.",
            (Locale::En, false) => "Our model recommends NOT granting credit.",
            (Locale::Pt, true) => "Nosso modelo recomenda conceder crédito.",
            (Locale::Pt, false) => "Nosso modelo recomenda NÃO conceder crédito.",
        };
        Self { grant, message }
    }
}

/// Echo of the submitted applicant, for the result page.
pub fn loan_details(applicant: &LoanApplicant) -> Vec<(&'static str, String)> {
    let mut details: Vec<(&'static str, String)> = applicant
        .numeric_fields()
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .collect();
    details.push((
        "person_home_ownership",
        applicant.person_home_ownership.as_str().to_string(),
    ));
    details.push(("loan_intent", applicant.loan_intent.as_str().to_string()));
    details.push(("loan_grade", applicant.loan_grade.as_str().to_string()));
    details.push((
        "cb_person_default_on_file",
        applicant.cb_person_default_on_file.as_str().to_string(),
    ));
    details
}
