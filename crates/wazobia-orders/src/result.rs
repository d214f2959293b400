//! Uniform action results.
//!
//! Service operations never let errors escape to the caller; they catch at
//! the boundary and return `{ success, message, data? }`, with the error's
//! display text as the message.

use serde::{Deserialize, Serialize};
use wazobia_commerce::CommerceError;

/// Result of a service action, shaped for direct display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResult<T = ()> {
    /// Whether the action succeeded.
    pub success: bool,
    /// User-facing message.
    pub message: String,
    /// Payload on success, when the action produces one.
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    /// A successful result with a payload.
    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A successful result without a payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// A failed result carrying the error's display text.
    pub fn err(error: &CommerceError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            data: None,
        }
    }

    /// Collapse a fallible operation into an action result, using
    /// `message` on the success path.
    pub fn from_result(
        result: Result<T, CommerceError>,
        message: impl Into<String>,
    ) -> Self {
        match result {
            Ok(data) => Self::ok_with(message, data),
            Err(e) => Self::err(&e),
        }
    }
}

/// One page of a listing, with the page count for the whole set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Total number of pages at the requested page size.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice out one 1-indexed page and compute the page count.
    pub fn paginate(mut items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = items.len().div_ceil(page_size);
        let start = page.saturating_sub(1) * page_size;
        let data = if start >= items.len() {
            Vec::new()
        } else {
            items.drain(start..(start + page_size).min(items.len())).collect()
        };
        Self { data, total_pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_err_carries_message() {
        let result: ActionResult<()> = ActionResult::err(&CommerceError::OrderAlreadyPaid);
        assert!(!result.success);
        assert_eq!(result.message, "Order is already paid");
    }

    #[test]
    fn test_from_result() {
        let ok = ActionResult::from_result(Ok(7), "done");
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));

        let err: ActionResult<i32> =
            ActionResult::from_result(Err(CommerceError::OrderNotFound), "done");
        assert!(!err.success);
        assert_eq!(err.message, "Order not found");
    }

    #[test]
    fn test_pagination() {
        let items: Vec<i32> = (1..=10).collect();
        let page = Page::paginate(items.clone(), 1, 4);
        assert_eq!(page.data, vec![1, 2, 3, 4]);
        assert_eq!(page.total_pages, 3);

        let page = Page::paginate(items.clone(), 3, 4);
        assert_eq!(page.data, vec![9, 10]);

        let page = Page::paginate(items, 4, 4);
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 3);
    }
}
