//! Order status enum.

use serde::{Deserialize, Serialize};

/// Order fulfillment status, controlled entirely by the remote service.
///
/// Progresses linearly `Pending → Processing → Shipping → Delivered`, with
/// `Cancelled` as the terminal off-path state. The client only displays it
/// and never transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Position of this status on the delivery timeline, if it is on it.
    ///
    /// `Cancelled` has no timeline position.
    #[must_use]
    pub const fn progress_step(self) -> Option<usize> {
        match self {
            Self::Pending => Some(0),
            Self::Processing => Some(1),
            Self::Shipping => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// Arabic display label for this status.
    #[must_use]
    pub const fn label_ar(self) -> &'static str {
        match self {
            Self::Pending => "قيد التنفيذ",
            Self::Processing => "جاري التجهيز",
            Self::Shipping => "في الطريق",
            Self::Delivered => "تم التوصيل",
            Self::Cancelled => "ملغي",
        }
    }
}
