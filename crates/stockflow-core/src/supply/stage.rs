//! Purchase-order stage catalog and the signed/unsigned trust model.
//!
//! The catalog is closed: 23 numbered production stages plus two special
//! codes. Stages 01-11 and both special codes classify as unsigned; stages
//! 12-23 classify as signed. Classification is stateless per order line.

use serde::{Deserialize, Serialize};

/// Trust classification of a supply commitment.
///
/// Signed supply counts against stockout risk; unsigned supply is excluded
/// from stockout coverage but still builds end-of-week inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Signed,
    Unsigned,
}

/// One stage of the purchase-order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoStage {
    PoApprovalPending,
    SupplierConfirmationPending,
    PiUploadPending,
    PiApprovalPending,
    PiPaymentPending,
    PackagingPending,
    TransparencyLabelPending,
    PrdPending,
    UnderProduction,
    PrdConfirmationPending,
    ImSignOffPending,
    ReadyForBatchingPending,
    BatchCreationPending,
    SmSignOffPending,
    CiApprovalPending,
    CiPaymentPending,
    QcSchedulePending,
    FfwBookingMissing,
    SupplierPickupDatePending,
    PrePickupCheck,
    FobPickupPending,
    NonFobPickupPending,
    InbCreationPending,
    AntiOrderLine,
    ComplianceBlocked,
}

impl PoStage {
    /// Every stage in catalog order.
    pub const ALL: [PoStage; 25] = [
        PoStage::PoApprovalPending,
        PoStage::SupplierConfirmationPending,
        PoStage::PiUploadPending,
        PoStage::PiApprovalPending,
        PoStage::PiPaymentPending,
        PoStage::PackagingPending,
        PoStage::TransparencyLabelPending,
        PoStage::PrdPending,
        PoStage::UnderProduction,
        PoStage::PrdConfirmationPending,
        PoStage::ImSignOffPending,
        PoStage::ReadyForBatchingPending,
        PoStage::BatchCreationPending,
        PoStage::SmSignOffPending,
        PoStage::CiApprovalPending,
        PoStage::CiPaymentPending,
        PoStage::QcSchedulePending,
        PoStage::FfwBookingMissing,
        PoStage::SupplierPickupDatePending,
        PoStage::PrePickupCheck,
        PoStage::FobPickupPending,
        PoStage::NonFobPickupPending,
        PoStage::InbCreationPending,
        PoStage::AntiOrderLine,
        PoStage::ComplianceBlocked,
    ];

    /// Parse a raw status code. Returns None for anything outside the
    /// closed catalog.
    pub fn from_code(code: &str) -> Option<PoStage> {
        let stage = match code.trim() {
            "01. PO Approval Pending" => PoStage::PoApprovalPending,
            "02. Supplier Confirmation Pending" => PoStage::SupplierConfirmationPending,
            "03. PI Upload Pending" => PoStage::PiUploadPending,
            "04. PI Approval Pending" => PoStage::PiApprovalPending,
            "05. PI Payment Pending" => PoStage::PiPaymentPending,
            "06. Packaging Pending" => PoStage::PackagingPending,
            // spelling matches the upstream status feed
            "07. Transperancy Label Pending" => PoStage::TransparencyLabelPending,
            "08. PRD Pending" => PoStage::PrdPending,
            "09. Under Production" => PoStage::UnderProduction,
            "10. PRD Confirmation Pending" => PoStage::PrdConfirmationPending,
            "11. IM Sign-Off Pending" => PoStage::ImSignOffPending,
            "12. Ready for Batching Pending" => PoStage::ReadyForBatchingPending,
            "13. Batch Creation Pending" => PoStage::BatchCreationPending,
            "14. SM Sign-Off Pending" => PoStage::SmSignOffPending,
            "15. CI Approval Pending" => PoStage::CiApprovalPending,
            "16. CI Payment Pending" => PoStage::CiPaymentPending,
            "17. QC Schedule Pending" => PoStage::QcSchedulePending,
            "18. FFW Booking Missing" => PoStage::FfwBookingMissing,
            "19. Supplier Pickup Date Pending" => PoStage::SupplierPickupDatePending,
            "20. Pre Pickup Check" => PoStage::PrePickupCheck,
            "21. FOB Pickup Pending" => PoStage::FobPickupPending,
            "22. Non FOB Pickup Pending" => PoStage::NonFobPickupPending,
            "23. INB Creation Pending" => PoStage::InbCreationPending,
            "A. Anti PO Line" => PoStage::AntiOrderLine,
            "B. Compliance Blocked" => PoStage::ComplianceBlocked,
            _ => return None,
        };
        Some(stage)
    }

    /// The catalog code for this stage.
    pub fn code(&self) -> &'static str {
        match self {
            PoStage::PoApprovalPending => "01. PO Approval Pending",
            PoStage::SupplierConfirmationPending => "02. Supplier Confirmation Pending",
            PoStage::PiUploadPending => "03. PI Upload Pending",
            PoStage::PiApprovalPending => "04. PI Approval Pending",
            PoStage::PiPaymentPending => "05. PI Payment Pending",
            PoStage::PackagingPending => "06. Packaging Pending",
            PoStage::TransparencyLabelPending => "07. Transperancy Label Pending",
            PoStage::PrdPending => "08. PRD Pending",
            PoStage::UnderProduction => "09. Under Production",
            PoStage::PrdConfirmationPending => "10. PRD Confirmation Pending",
            PoStage::ImSignOffPending => "11. IM Sign-Off Pending",
            PoStage::ReadyForBatchingPending => "12. Ready for Batching Pending",
            PoStage::BatchCreationPending => "13. Batch Creation Pending",
            PoStage::SmSignOffPending => "14. SM Sign-Off Pending",
            PoStage::CiApprovalPending => "15. CI Approval Pending",
            PoStage::CiPaymentPending => "16. CI Payment Pending",
            PoStage::QcSchedulePending => "17. QC Schedule Pending",
            PoStage::FfwBookingMissing => "18. FFW Booking Missing",
            PoStage::SupplierPickupDatePending => "19. Supplier Pickup Date Pending",
            PoStage::PrePickupCheck => "20. Pre Pickup Check",
            PoStage::FobPickupPending => "21. FOB Pickup Pending",
            PoStage::NonFobPickupPending => "22. Non FOB Pickup Pending",
            PoStage::InbCreationPending => "23. INB Creation Pending",
            PoStage::AntiOrderLine => "A. Anti PO Line",
            PoStage::ComplianceBlocked => "B. Compliance Blocked",
        }
    }

    /// Trust classification for this stage.
    pub fn classification(&self) -> Classification {
        match self {
            PoStage::ReadyForBatchingPending
            | PoStage::BatchCreationPending
            | PoStage::SmSignOffPending
            | PoStage::CiApprovalPending
            | PoStage::CiPaymentPending
            | PoStage::QcSchedulePending
            | PoStage::FfwBookingMissing
            | PoStage::SupplierPickupDatePending
            | PoStage::PrePickupCheck
            | PoStage::FobPickupPending
            | PoStage::NonFobPickupPending
            | PoStage::InbCreationPending => Classification::Signed,
            _ => Classification::Unsigned,
        }
    }
}

/// Classify a raw status code.
///
/// Unknown codes classify conservatively as unsigned; the caller records
/// the anomaly when the stage comes back None.
pub fn classify(raw_status: &str) -> (Classification, Option<PoStage>) {
    match PoStage::from_code(raw_status) {
        Some(stage) => (stage.classification(), Some(stage)),
        None => (Classification::Unsigned, None),
    }
}
