//! Static service catalog — reference data for the public services
//! endpoint. Not derived from stored audits.

use serde::Serialize;

use super::audit::ServiceType;

/// One offered audit service.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ServiceOffering {
    pub id: u32,
    pub service_type: ServiceType,
    pub name: &'static str,
    pub price: f64,
    pub description: &'static str,
    pub category: &'static str,
    /// Historical recovery rate, in percent.
    pub recovery_rate: u8,
    /// Average recovery amount in dollars.
    pub avg_recovery: f64,
}

static CATALOG: [ServiceOffering; 21] = [
    ServiceOffering {
        id: 1,
        service_type: ServiceType::AiValidation,
        name: "AI Validation System Audit",
        price: 299.99,
        description: "3-model consensus with OCR processing",
        category: "Core AI",
        recovery_rate: 98,
        avg_recovery: 4247.0,
    },
    ServiceOffering {
        id: 2,
        service_type: ServiceType::DocumentEnforcement,
        name: "Document Enforcement Audit",
        price: 249.99,
        description: "Automated document compliance and enforcement review",
        category: "Compliance",
        recovery_rate: 94,
        avg_recovery: 3120.0,
    },
    ServiceOffering {
        id: 3,
        service_type: ServiceType::CalendarAutomation,
        name: "Calendar Automation Audit",
        price: 149.99,
        description: "Deadline and statute tracking with automated reminders",
        category: "Automation",
        recovery_rate: 91,
        avg_recovery: 1850.0,
    },
    ServiceOffering {
        id: 4,
        service_type: ServiceType::CfpbAutomation,
        name: "CFPB Complaint Automation",
        price: 199.99,
        description: "Automated CFPB complaint drafting and filing",
        category: "Compliance",
        recovery_rate: 95,
        avg_recovery: 2780.0,
    },
    ServiceOffering {
        id: 5,
        service_type: ServiceType::ZadarmaCrm,
        name: "Zadarma CRM Integration Audit",
        price: 129.99,
        description: "Call-record and CRM trail reconciliation",
        category: "Automation",
        recovery_rate: 88,
        avg_recovery: 1240.0,
    },
    ServiceOffering {
        id: 6,
        service_type: ServiceType::UccTracking,
        name: "UCC Filing Tracker",
        price: 179.99,
        description: "UCC-1 lien discovery and release tracking",
        category: "Legal",
        recovery_rate: 90,
        avg_recovery: 2310.0,
    },
    ServiceOffering {
        id: 7,
        service_type: ServiceType::LegalViolation,
        name: "Legal Violation Scanner",
        price: 349.99,
        description: "FDCPA/FCRA/TILA violation detection across statements",
        category: "Legal",
        recovery_rate: 96,
        avg_recovery: 5130.0,
    },
    ServiceOffering {
        id: 8,
        service_type: ServiceType::ContractFlowchart,
        name: "Contract Flowchart Analysis",
        price: 159.99,
        description: "Obligation mapping and breach-point visualization",
        category: "Legal",
        recovery_rate: 87,
        avg_recovery: 1680.0,
    },
    ServiceOffering {
        id: 9,
        service_type: ServiceType::PartnerReferral,
        name: "Partner Referral Program Audit",
        price: 99.99,
        description: "Referral fee and commission reconciliation",
        category: "Business",
        recovery_rate: 85,
        avg_recovery: 980.0,
    },
    ServiceOffering {
        id: 10,
        service_type: ServiceType::AdminVault,
        name: "Admin Document Vault Audit",
        price: 119.99,
        description: "Secure records inventory with retention verification",
        category: "Compliance",
        recovery_rate: 89,
        avg_recovery: 1150.0,
    },
    ServiceOffering {
        id: 11,
        service_type: ServiceType::BusinessLoan,
        name: "Business Loan Audit",
        price: 449.99,
        description: "Commercial lending fee and covenant review",
        category: "Financial",
        recovery_rate: 93,
        avg_recovery: 7420.0,
    },
    ServiceOffering {
        id: 12,
        service_type: ServiceType::MedicalBilling,
        name: "Medical Billing Audit",
        price: 329.99,
        description: "CPT/ICD code verification and overcharge recovery",
        category: "Medical",
        recovery_rate: 97,
        avg_recovery: 3890.0,
    },
    ServiceOffering {
        id: 13,
        service_type: ServiceType::MortgageNotes,
        name: "Mortgage Note Audit",
        price: 499.99,
        description: "Note chain, escrow, and servicing error analysis",
        category: "Financial",
        recovery_rate: 94,
        avg_recovery: 8660.0,
    },
    ServiceOffering {
        id: 14,
        service_type: ServiceType::AutoInsurance,
        name: "Auto Insurance Audit",
        price: 189.99,
        description: "Premium, claim, and total-loss settlement review",
        category: "Insurance",
        recovery_rate: 92,
        avg_recovery: 2140.0,
    },
    ServiceOffering {
        id: 15,
        service_type: ServiceType::RetirementAudit,
        name: "401(k) Fee Audit",
        price: 279.99,
        description: "Plan fee benchmarking and fiduciary breach detection",
        category: "Financial",
        recovery_rate: 95,
        avg_recovery: 4520.0,
    },
    ServiceOffering {
        id: 16,
        service_type: ServiceType::BankingFees,
        name: "Banking Fee Audit",
        price: 139.99,
        description: "Overdraft, NSF, and maintenance fee recovery",
        category: "Financial",
        recovery_rate: 96,
        avg_recovery: 1320.0,
    },
    ServiceOffering {
        id: 17,
        service_type: ServiceType::UtilitiesTelecom,
        name: "Utilities & Telecom Audit",
        price: 109.99,
        description: "Billing error and tariff misapplication review",
        category: "Utilities",
        recovery_rate: 90,
        avg_recovery: 870.0,
    },
    ServiceOffering {
        id: 18,
        service_type: ServiceType::UrlaProcessing,
        name: "URLA Processing Audit",
        price: 219.99,
        description: "Uniform Residential Loan Application accuracy check",
        category: "Financial",
        recovery_rate: 88,
        avg_recovery: 2460.0,
    },
    ServiceOffering {
        id: 19,
        service_type: ServiceType::PayrollEmployment,
        name: "Payroll & Employment Audit",
        price: 259.99,
        description: "Wage, overtime, and withholding discrepancy analysis",
        category: "Employment",
        recovery_rate: 93,
        avg_recovery: 3340.0,
    },
    ServiceOffering {
        id: 20,
        service_type: ServiceType::StudentLoan,
        name: "Student Loan Audit",
        price: 229.99,
        description: "Servicer misapplication and forgiveness eligibility review",
        category: "Education",
        recovery_rate: 91,
        avg_recovery: 5210.0,
    },
    ServiceOffering {
        id: 21,
        service_type: ServiceType::CompleteSuite,
        name: "Complete Elite Protection Suite",
        price: 1999.99,
        description: "All 20+ audit services with AI priority processing",
        category: "Comprehensive",
        recovery_rate: 98,
        avg_recovery: 15789.0,
    },
];

/// The full catalog of offered services.
pub fn catalog() -> &'static [ServiceOffering] {
    &CATALOG
}

/// Look up the offering for a given service type.
pub fn offering_for(service_type: ServiceType) -> &'static ServiceOffering {
    // Every ServiceType has exactly one catalog entry (see tests).
    CATALOG
        .iter()
        .find(|o| o.service_type == service_type)
        .expect("catalog covers every service type")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_one_entry_per_service_type() {
        assert_eq!(catalog().len(), ServiceType::ALL.len());
        let types: HashSet<_> = catalog().iter().map(|o| o.service_type).collect();
        assert_eq!(types.len(), ServiceType::ALL.len());
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let ids: Vec<u32> = catalog().iter().map(|o| o.id).collect();
        assert_eq!(ids, (1..=21).collect::<Vec<u32>>());
    }

    #[test]
    fn prices_and_recoveries_are_positive() {
        for offering in catalog() {
            assert!(offering.price > 0.0, "{}", offering.name);
            assert!(offering.avg_recovery > 0.0, "{}", offering.name);
            assert!(offering.recovery_rate <= 100);
        }
    }

    #[test]
    fn anchor_entries_match_published_values() {
        let ai = offering_for(ServiceType::AiValidation);
        assert_eq!(ai.id, 1);
        assert_eq!(ai.price, 299.99);
        let suite = offering_for(ServiceType::CompleteSuite);
        assert_eq!(suite.id, 21);
        assert_eq!(suite.price, 1999.99);
    }
}
