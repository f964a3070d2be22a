//! Audit domain model — a single service request tracked through a
//! processing lifecycle with an append-only timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Offered audit service categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    AiValidation,
    DocumentEnforcement,
    CalendarAutomation,
    CfpbAutomation,
    ZadarmaCrm,
    UccTracking,
    LegalViolation,
    ContractFlowchart,
    PartnerReferral,
    AdminVault,
    BusinessLoan,
    MedicalBilling,
    MortgageNotes,
    AutoInsurance,
    #[serde(rename = "401k-audit")]
    RetirementAudit,
    BankingFees,
    UtilitiesTelecom,
    UrlaProcessing,
    PayrollEmployment,
    StudentLoan,
    CompleteSuite,
}

impl ServiceType {
    pub const ALL: [ServiceType; 21] = [
        Self::AiValidation,
        Self::DocumentEnforcement,
        Self::CalendarAutomation,
        Self::CfpbAutomation,
        Self::ZadarmaCrm,
        Self::UccTracking,
        Self::LegalViolation,
        Self::ContractFlowchart,
        Self::PartnerReferral,
        Self::AdminVault,
        Self::BusinessLoan,
        Self::MedicalBilling,
        Self::MortgageNotes,
        Self::AutoInsurance,
        Self::RetirementAudit,
        Self::BankingFees,
        Self::UtilitiesTelecom,
        Self::UrlaProcessing,
        Self::PayrollEmployment,
        Self::StudentLoan,
        Self::CompleteSuite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiValidation => "ai-validation",
            Self::DocumentEnforcement => "document-enforcement",
            Self::CalendarAutomation => "calendar-automation",
            Self::CfpbAutomation => "cfpb-automation",
            Self::ZadarmaCrm => "zadarma-crm",
            Self::UccTracking => "ucc-tracking",
            Self::LegalViolation => "legal-violation",
            Self::ContractFlowchart => "contract-flowchart",
            Self::PartnerReferral => "partner-referral",
            Self::AdminVault => "admin-vault",
            Self::BusinessLoan => "business-loan",
            Self::MedicalBilling => "medical-billing",
            Self::MortgageNotes => "mortgage-notes",
            Self::AutoInsurance => "auto-insurance",
            Self::RetirementAudit => "401k-audit",
            Self::BankingFees => "banking-fees",
            Self::UtilitiesTelecom => "utilities-telecom",
            Self::UrlaProcessing => "urla-processing",
            Self::PayrollEmployment => "payroll-employment",
            Self::StudentLoan => "student-loan",
            Self::CompleteSuite => "complete-suite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// Audit processing status.
///
/// Statuses are ordered: a legal transition moves strictly forward in
/// this order, or branches to [`AuditStatus::Disputed`] from any
/// non-terminal state. `Completed` and `Disputed` are terminal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AuditStatus {
    #[default]
    Pending,
    Processing,
    AiAnalysis,
    UnderReview,
    Completed,
    Disputed,
}

impl AuditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::AiAnalysis => "ai-analysis",
            Self::UnderReview => "under-review",
            Self::Completed => "completed",
            Self::Disputed => "disputed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "ai-analysis" => Some(Self::AiAnalysis),
            "under-review" => Some(Self::UnderReview),
            "completed" => Some(Self::Completed),
            "disputed" => Some(Self::Disputed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Disputed)
    }

    /// Position in the forward progression. `Disputed` sits outside the
    /// chain and is only reachable as a branch.
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::AiAnalysis => 2,
            Self::UnderReview => 3,
            Self::Completed => 4,
            Self::Disputed => 5,
        }
    }

    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition_to(self, next: AuditStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Disputed => true,
            Self::Pending => false,
            _ => next.rank() > self.rank(),
        }
    }
}

/// Metadata for an uploaded document. The binary content lives in an
/// external file store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentMeta {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub size: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// One entry in an audit's append-only timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    pub event: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// `true` for system-driven events, `false` for human actions.
    pub automated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    pub service_type: ServiceType,
    pub service_name: String,
    pub price: f64,
    pub status: AuditStatus,
    pub documents: Vec<DocumentMeta>,
    pub recovery_amount: f64,
    pub timeline: Vec<TimelineEvent>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudit {
    pub user_id: Uuid,
    pub service_type: ServiceType,
    pub service_name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAudit {
    pub status: Option<AuditStatus>,
    pub recovery_amount: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A fully-decided status change, applied by the store as one write:
/// the new status and its `status_changed` timeline entry either both
/// land or neither does. `from` is the status the decision was made
/// against; the store refuses to apply if the record has moved on.
#[derive(Debug, Clone)]
pub struct TransitionRecord {
    pub from: AuditStatus,
    pub to: AuditStatus,
    pub description: String,
    pub automated: bool,
    pub recovery_amount: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use AuditStatus::*;

    #[test]
    fn forward_steps_are_legal() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(AiAnalysis));
        assert!(AiAnalysis.can_transition_to(UnderReview));
        assert!(UnderReview.can_transition_to(Completed));
    }

    #[test]
    fn forward_jumps_are_legal() {
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(UnderReview));
        assert!(Processing.can_transition_to(Completed));
    }

    #[test]
    fn backward_moves_are_rejected() {
        assert!(!Processing.can_transition_to(Pending));
        assert!(!UnderReview.can_transition_to(Processing));
        assert!(!AiAnalysis.can_transition_to(AiAnalysis));
    }

    #[test]
    fn disputed_reachable_from_any_non_terminal() {
        for status in [Pending, Processing, AiAnalysis, UnderReview] {
            assert!(status.can_transition_to(Disputed), "{status:?}");
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for terminal in [Completed, Disputed] {
            for target in [Pending, Processing, AiAnalysis, UnderReview, Completed, Disputed] {
                assert!(!terminal.can_transition_to(target), "{terminal:?} -> {target:?}");
            }
        }
    }

    #[test]
    fn service_type_wire_strings() {
        assert_eq!(ServiceType::RetirementAudit.as_str(), "401k-audit");
        assert_eq!(
            serde_json::to_value(ServiceType::RetirementAudit).unwrap(),
            "401k-audit"
        );
        for t in ServiceType::ALL {
            assert_eq!(ServiceType::parse(t.as_str()), Some(t));
            // serde name agrees with as_str
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
        }
    }

    #[test]
    fn status_wire_strings() {
        assert_eq!(AiAnalysis.as_str(), "ai-analysis");
        assert_eq!(UnderReview.as_str(), "under-review");
        for s in [Pending, Processing, AiAnalysis, UnderReview, Completed, Disputed] {
            assert_eq!(AuditStatus::parse(s.as_str()), Some(s));
            assert_eq!(serde_json::to_value(s).unwrap(), s.as_str());
        }
    }
}
