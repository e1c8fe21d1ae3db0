use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel through which a reservation was made.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketSegment {
    Aviation,
    Complementary,
    Corporate,
    Online,
    Offline,
}

impl MarketSegment {
    pub const ALL: [MarketSegment; 5] = [
        MarketSegment::Aviation,
        MarketSegment::Complementary,
        MarketSegment::Corporate,
        MarketSegment::Online,
        MarketSegment::Offline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSegment::Aviation => "Aviation",
            MarketSegment::Complementary => "Complementary",
            MarketSegment::Corporate => "Corporate",
            MarketSegment::Online => "Online",
            MarketSegment::Offline => "Offline",
        }
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hotel reservation, as submitted by the form or the JSON API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReservationFeatures {
    pub lead_time: i64,
    pub arrival_month: i64,
    pub arrival_date: i64,
    pub market_segment_type: MarketSegment,
    pub avg_price_per_room: f64,
    pub no_of_special_requests: i64,
}

impl Default for ReservationFeatures {
    fn default() -> Self {
        Self {
            lead_time: 30,
            arrival_month: 6,
            arrival_date: 15,
            market_segment_type: MarketSegment::Online,
            avg_price_per_room: 150.0,
            no_of_special_requests: 1,
        }
    }
}

impl ReservationFeatures {
    pub fn validate(&self) -> Result<(), String> {
        let integers = [
            ("lead_time", self.lead_time, 0, 500),
            ("arrival_month", self.arrival_month, 1, 12),
            ("arrival_date", self.arrival_date, 1, 31),
            ("no_of_special_requests", self.no_of_special_requests, 0, 10),
        ];

        for (name, value, min, max) in integers {
            if !(min..=max).contains(&value) {
                return Err(format!(
                    "{} must be between {} and {} (got {})",
                    name, min, max, value
                ));
            }
        }

        if !(0.0..=10000.0).contains(&self.avg_price_per_room) {
            return Err(format!(
                "avg_price_per_room must be between 0 and 10000 (got {})",
                self.avg_price_per_room
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    Rent,
    Own,
    Mortgage,
    Other,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 4] = [
        HomeOwnership::Rent,
        HomeOwnership::Own,
        HomeOwnership::Mortgage,
        HomeOwnership::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeOwnership::Rent => "RENT",
            HomeOwnership::Own => "OWN",
            HomeOwnership::Mortgage => "MORTGAGE",
            HomeOwnership::Other => "OTHER",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    Personal,
    Education,
    Medical,
    Venture,
    HomeImprovement,
    DebtConsolidation,
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 6] = [
        LoanIntent::Personal,
        LoanIntent::Education,
        LoanIntent::Medical,
        LoanIntent::Venture,
        LoanIntent::HomeImprovement,
        LoanIntent::DebtConsolidation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanIntent::Personal => "PERSONAL",
            LoanIntent::Education => "EDUCATION",
            LoanIntent::Medical => "MEDICAL",
            LoanIntent::Venture => "VENTURE",
            LoanIntent::HomeImprovement => "HOMEIMPROVEMENT",
            LoanIntent::DebtConsolidation => "DEBTCONSOLIDATION",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LoanGrade {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl LoanGrade {
    /// Option order of the loan form.
    pub const FORM_ORDER: [LoanGrade; 7] = [
        LoanGrade::D,
        LoanGrade::B,
        LoanGrade::C,
        LoanGrade::A,
        LoanGrade::E,
        LoanGrade::F,
        LoanGrade::G,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanGrade::A => "A",
            LoanGrade::B => "B",
            LoanGrade::C => "C",
            LoanGrade::D => "D",
            LoanGrade::E => "E",
            LoanGrade::F => "F",
            LoanGrade::G => "G",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOnFile {
    Y,
    N,
}

impl DefaultOnFile {
    pub const ALL: [DefaultOnFile; 2] = [DefaultOnFile::Y, DefaultOnFile::N];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultOnFile::Y => "Y",
            DefaultOnFile::N => "N",
        }
    }
}

/// A credit applicant sent to the remote loan service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoanApplicant {
    pub person_age: f64,
    pub person_income: f64,
    pub person_emp_length: f64,
    pub loan_amnt: f64,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub cb_person_cred_hist_length: f64,
    pub person_home_ownership: HomeOwnership,
    pub loan_intent: LoanIntent,
    pub loan_grade: LoanGrade,
    pub cb_person_default_on_file: DefaultOnFile,
}

impl Default for LoanApplicant {
    fn default() -> Self {
        Self {
            person_age: 0.0,
            person_income: 0.0,
            person_emp_length: 0.0,
            loan_amnt: 0.0,
            loan_int_rate: 0.0,
            loan_percent_income: 0.0,
            cb_person_cred_hist_length: 0.0,
            person_home_ownership: HomeOwnership::Rent,
            loan_intent: LoanIntent::Personal,
            loan_grade: LoanGrade::D,
            cb_person_default_on_file: DefaultOnFile::Y,
        }
    }
}

impl LoanApplicant {
    /// Numeric fields in wire order.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("person_age", self.person_age),
            ("person_income", self.person_income),
            ("person_emp_length", self.person_emp_length),
            ("loan_amnt", self.loan_amnt),
            ("loan_int_rate", self.loan_int_rate),
            ("loan_percent_income", self.loan_percent_income),
            ("cb_person_cred_hist_length", self.cb_person_cred_hist_length),
        ]
    }

    /// The loan form has no bounds, so only non-finite values are refused.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number", name));
            }
        }
        Ok(())
    }
}

/// Outcome of the local cancellation model.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CancellationPrediction {
    pub label: i64,
    /// `[keep, cancel]`
    pub probabilities: [f32; 2],
}

impl CancellationPrediction {
    pub fn will_cancel(&self) -> bool {
        self.label == 1
    }

    /// Probability of the predicted outcome.
    pub fn headline_probability(&self) -> f32 {
        if self.will_cancel() {
            self.probabilities[1]
        } else {
            self.probabilities[0]
        }
    }
}

/// Outcome of the remote loan service. 1 means deny.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CreditDecision {
    pub prediction: i64,
}

impl CreditDecision {
    pub fn grant(&self) -> bool {
        self.prediction == 0
    }
}
