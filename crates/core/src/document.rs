//! The five business document kinds handled by the workflow service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discriminator for the five document types that share the workflow.
///
/// All five are structurally identical for workflow purposes; the kind
/// selects the business-id prefix, the workflow form, and the URL segment
/// the document is served under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    PurchaseRequest,
    PurchaseOrder,
    CustomerOrder,
    DeliveryOrder,
    SalesInvoice,
}

/// All document kinds, in workflow-form order.
pub const ALL_KINDS: &[DocKind] = &[
    DocKind::PurchaseRequest,
    DocKind::PurchaseOrder,
    DocKind::CustomerOrder,
    DocKind::DeliveryOrder,
    DocKind::SalesInvoice,
];

impl DocKind {
    /// Snake-case identifier stored in the `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::PurchaseRequest => "purchase_request",
            DocKind::PurchaseOrder => "purchase_order",
            DocKind::CustomerOrder => "customer_order",
            DocKind::DeliveryOrder => "delivery_order",
            DocKind::SalesInvoice => "sales_invoice",
        }
    }

    /// Two-letter prefix used when assigning business ids (e.g. `PR0001`).
    pub fn business_prefix(&self) -> &'static str {
        match self {
            DocKind::PurchaseRequest => "PR",
            DocKind::PurchaseOrder => "PO",
            DocKind::CustomerOrder => "CO",
            DocKind::DeliveryOrder => "DO",
            DocKind::SalesInvoice => "SI",
        }
    }

    /// Workflow form id referenced by `wf_trans` audit rows and the
    /// configured approval chains.
    pub fn wf_form_id(&self) -> i32 {
        match self {
            DocKind::PurchaseRequest => 1,
            DocKind::PurchaseOrder => 2,
            DocKind::CustomerOrder => 3,
            DocKind::DeliveryOrder => 4,
            DocKind::SalesInvoice => 5,
        }
    }

    /// Whether this kind tracks a revision counter across resubmissions.
    ///
    /// Only purchase requests and customer orders carry a revision that is
    /// bumped when a rejected document is submitted again.
    pub fn tracks_revision(&self) -> bool {
        matches!(self, DocKind::PurchaseRequest | DocKind::CustomerOrder)
    }

    /// URL path segment the kind's routes are nested under.
    pub fn path_segment(&self) -> &'static str {
        match self {
            DocKind::PurchaseRequest => "purchase-requests",
            DocKind::PurchaseOrder => "purchase-orders",
            DocKind::CustomerOrder => "customer-orders",
            DocKind::DeliveryOrder => "delivery-orders",
            DocKind::SalesInvoice => "sales-invoices",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase_request" => Ok(DocKind::PurchaseRequest),
            "purchase_order" => Ok(DocKind::PurchaseOrder),
            "customer_order" => Ok(DocKind::CustomerOrder),
            "delivery_order" => Ok(DocKind::DeliveryOrder),
            "sales_invoice" => Ok(DocKind::SalesInvoice),
            other => Err(format!("Unknown document kind '{other}'")),
        }
    }
}
